//! API client with the bearer/refresh interceptor pair
//!
//! Every authenticated call goes through [`ApiClient::execute`]:
//!
//! 1. Request stage: attach `Authorization: Bearer <access>` when an access
//!    token is stored.
//! 2. Response stage: a 401 on a request that has not been replayed yet
//!    triggers a single-flight refresh (see [`super::interceptor`]) and one
//!    replay with the new token. Any other outcome passes through.
//!
//! The refresh call itself and login go through
//! [`ApiClient::execute_anonymous`], which skips both stages.

use std::sync::Arc;
use std::time::Duration;

use eshop_common::{TokenKind, TokenPair, TokenStore};
use eshop_core::navigation::ports::LoggingNavigator;
use eshop_core::{Navigator, Route};
use eshop_domain::{ApiConfig, RefreshRequest, TokenResponse};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::errors::ApiError;
use super::interceptor::{AuthInterceptorState, LeaderGuard, RefreshRole};
use super::request::{ApiRequest, ApiResponse};
use crate::http::HttpClient;

const REFRESH_PATH: &str = "/auth/refresh";

/// Configuration for API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL for authenticated endpoints (e.g. "https://shop.example.com/api")
    pub base_url: String,
    /// Site root for the public tracking endpoints
    pub public_base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    /// Honour `HTTP(S)_PROXY` from the environment
    pub use_system_proxy: bool,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            public_base_url: config.public_base_url.clone(),
            timeout: config.timeout(),
            use_system_proxy: config.use_system_proxy,
        }
    }
}

/// Authenticated client for the ordering API
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    interceptor: Arc<AuthInterceptorState>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if a base URL does not parse or the
    /// HTTP client cannot be built
    pub fn new(
        config: ApiClientConfig,
        tokens: TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        for base in [&config.base_url, &config.public_base_url] {
            Url::parse(base)
                .map_err(|e| ApiError::Config(format!("Invalid base URL {base}: {e}")))?;
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!("eshop-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let http_client = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self {
            http_client: Arc::new(http_client),
            tokens,
            navigator,
            interceptor: Arc::new(AuthInterceptorState::new()),
            config,
        })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub const fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Token store shared with the auth endpoints.
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Refresh coordination state of this client.
    pub fn interceptor(&self) -> &AuthInterceptorState {
        &self.interceptor
    }

    pub(crate) fn http(&self) -> Arc<HttpClient> {
        Arc::clone(&self.http_client)
    }

    /// Send a request through the interceptor pair.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` for non-2xx answers (including a 401 after replay),
    /// `ApiError::RefreshFailed` (carrying the refresh error) when the
    /// session could not be refreshed, `ApiError::AuthExpired` when it
    /// ended without a refresh attempt,
    /// transport errors from the HTTP core
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.dispatch(&request, true).await?;

        if response.status != 401 || request.retried {
            return response.error_for_status();
        }

        request.retried = true;
        match self.interceptor.begin() {
            RefreshRole::Follower(waiter) => {
                debug!("Access token rejected; waiting for running refresh");
                match waiter.await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => return Err(err),
                    Err(_) => return Err(ApiError::AuthExpired),
                }
            }
            RefreshRole::Leader(guard) => self.refresh_as_leader(guard, response).await?,
        }

        debug!("Replaying request with refreshed token");
        self.dispatch(&request, true).await?.error_for_status()
    }

    /// Send a request without a bearer token and without the refresh
    /// response stage.
    ///
    /// # Errors
    ///
    /// `ApiError::Http` for non-2xx answers, transport errors otherwise
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute_anonymous(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.dispatch(&request, false).await?.error_for_status()
    }

    /// Exchange a refresh token for a new pair. Does not touch the store.
    ///
    /// # Errors
    ///
    /// Whatever the refresh endpoint answered, or a transport error
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let request = ApiRequest::post(REFRESH_PATH)
            .json(&RefreshRequest { refresh_token: refresh_token.to_string() })?;
        self.execute_anonymous(request).await?.json()
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(path)).await?.json()
    }

    /// Execute a GET request with query parameters
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn get_with_query<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        params: &P,
    ) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(path).query(params)?).await?.json()
    }

    /// Execute a POST request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.execute(ApiRequest::post(path).json(body)?).await?.json()
    }

    /// Execute a PUT request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.execute(ApiRequest::put(path).json(body)?).await?.json()
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(ApiRequest::delete(path)).await?.json()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        with_auth: bool,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);
        let mut builder = self.http_client.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if with_auth {
            if let Some(token) = self.tokens.get(TokenKind::Access)? {
                builder = builder.bearer_auth(token);
            }
        }

        builder = request.body.apply(builder)?;

        let response = self.http_client.send(builder).await?;
        let status = response.status().as_u16();
        let body = self.http_client.read_body(response).await?;
        debug!(url = %url, status, retried = request.retried, "API response");

        Ok(ApiResponse { status, body })
    }

    /// Run the one refresh of this episode and settle it.
    ///
    /// `original` is the 401 that made this request the leader; it is
    /// returned as-is when there is no refresh token to try.
    async fn refresh_as_leader(
        &self,
        guard: LeaderGuard,
        original: ApiResponse,
    ) -> Result<(), ApiError> {
        let refresh_token = match self.tokens.get(TokenKind::Refresh) {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!("Access token rejected and no refresh token stored");
                self.end_session(guard, ApiError::AuthExpired);
                return Err(original.into_error());
            }
            Err(err) => {
                warn!(error = %err, "Failed to read refresh token");
                self.end_session(guard, ApiError::AuthExpired);
                return Err(ApiError::AuthExpired);
            }
        };

        let refreshed = self.refresh(&refresh_token).await.and_then(|issued| {
            let pair = TokenPair::new(issued.access_token, issued.refresh_token);
            self.tokens.store_pair(&pair).map_err(ApiError::from)
        });

        match refreshed {
            Ok(()) => {
                let released = guard.settle(Ok(()));
                info!(released, "Access token refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Token refresh failed; ending session");
                let failure = ApiError::RefreshFailed(Box::new(err));
                self.end_session(guard, failure.clone());
                Err(failure)
            }
        }
    }

    /// Clear tokens, reject the queue with `failure`, send the user to login.
    fn end_session(&self, guard: LeaderGuard, failure: ApiError) {
        if let Err(err) = self.tokens.clear() {
            warn!(error = %err, "Failed to clear tokens");
        }
        let rejected = guard.settle(Err(failure));
        debug!(rejected, "Queued requests rejected");
        self.navigator.navigate(Route::Login);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    tokens: Option<TokenStore>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the token store
    pub fn tokens(mut self, tokens: TokenStore) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Set where an expired session is redirected (defaults to logging only)
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the token store is missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let tokens =
            self.tokens.ok_or_else(|| ApiError::Config("Token store not set".to_string()))?;
        let navigator = self.navigator.unwrap_or_else(|| Arc::new(LoggingNavigator));

        ApiClient::new(config, tokens, navigator)
    }
}
