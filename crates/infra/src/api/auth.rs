//! Authentication endpoints
//!
//! `login` and `refresh` bypass the interceptor pair; `logout` and
//! `current_user` are ordinary authenticated calls.

use std::sync::Arc;

use async_trait::async_trait;
use eshop_common::TokenPair;
use eshop_core::AuthGateway;
use eshop_domain::{CurrentUser, LoginRequest, LoginResponse, TokenResponse};
use tracing::{info, instrument, warn};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// `/auth/*` endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair and persist it.
    ///
    /// # Errors
    /// `ApiError::Http` (401) for bad credentials; `ApiError::Storage` if
    /// the pair cannot be persisted.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::post("/auth/login").json(credentials)?;
        let response: LoginResponse = self.client.execute_anonymous(request).await?.json()?;

        self.client
            .tokens()
            .store_pair(&TokenPair::new(&response.access_token, &response.refresh_token))?;

        info!(role = %response.user.role, "Logged in");
        Ok(response)
    }

    /// Invalidate the session server-side. Tokens are cleared whether or
    /// not the server call succeeds.
    ///
    /// # Errors
    /// The server error if the call failed, else a storage error from
    /// clearing the tokens.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let outcome = self.client.execute(ApiRequest::post("/auth/logout")).await;
        let cleared = self.client.tokens().clear();

        if let Err(err) = &outcome {
            warn!(error = %err, "Logout call failed; local tokens cleared anyway");
        }
        outcome?;
        cleared?;
        info!("Logged out");
        Ok(())
    }

    /// Principal behind the stored access token.
    ///
    /// # Errors
    /// `ApiError::RefreshFailed` if the session cannot be refreshed.
    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.client.get("/auth/me").await
    }

    /// Exchange a refresh token for a new pair without storing it.
    ///
    /// # Errors
    /// Whatever the refresh endpoint answered.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        self.client.refresh(refresh_token).await
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn login(&self, credentials: &LoginRequest) -> eshop_domain::Result<LoginResponse> {
        Ok(Self::login(self, credentials).await?)
    }

    async fn logout(&self) -> eshop_domain::Result<()> {
        Ok(Self::logout(self).await?)
    }

    async fn current_user(&self) -> eshop_domain::Result<CurrentUser> {
        Ok(Self::current_user(self).await?)
    }
}
