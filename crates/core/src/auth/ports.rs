//! Port interfaces for authentication
//!
//! Implemented by the infra layer over the ordering API. Token
//! persistence is the gateway's job: `login` stores the issued pair and
//! `logout` clears it whether or not the server call succeeds.

use async_trait::async_trait;
use eshop_domain::{CurrentUser, LoginRequest, LoginResponse, Result};

/// Authentication endpoints
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a token pair and the principal.
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse>;

    /// Invalidate the session server-side; tokens are cleared regardless.
    async fn logout(&self) -> Result<()>;

    /// Principal behind the stored access token.
    async fn current_user(&self) -> Result<CurrentUser>;
}
