//! Auth session store
//!
//! Holds the principal returned by login or `/auth/me` and derives the
//! role checks used by route guards and views.

use std::sync::Arc;

use eshop_common::TokenStore;
use eshop_domain::{DealerStatus, LoginRequest, Result, UserInfo, UserRole};
use parking_lot::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::AuthGateway;
use crate::errors::IntoEshopError;

/// Point-in-time copy of the session state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<UserInfo>,
    pub loading: bool,
    pub initialized: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Some(UserRole::Admin)
    }

    #[must_use]
    pub fn is_dealer(&self) -> bool {
        self.role() == Some(UserRole::Dealer)
    }

    /// Dealer whose account an admin has approved.
    #[must_use]
    pub fn is_approved_dealer(&self) -> bool {
        self.is_dealer()
            && self
                .user
                .as_ref()
                .and_then(|u| u.dealer.as_ref())
                .is_some_and(|d| d.status == DealerStatus::Approved)
    }

    #[must_use]
    pub fn dealer_id(&self) -> Option<Uuid> {
        self.user.as_ref().and_then(|u| u.dealer.as_ref()).map(|d| d.id)
    }

    fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }
}

/// Auth session store
pub struct AuthSession {
    gateway: Arc<dyn AuthGateway>,
    tokens: TokenStore,
    state: RwLock<SessionSnapshot>,
}

impl AuthSession {
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: TokenStore) -> Self {
        Self { gateway, tokens, state: RwLock::new(SessionSnapshot::default()) }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserInfo> {
        self.state.read().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin()
    }

    #[must_use]
    pub fn is_dealer(&self) -> bool {
        self.state.read().is_dealer()
    }

    #[must_use]
    pub fn is_approved_dealer(&self) -> bool {
        self.state.read().is_approved_dealer()
    }

    #[must_use]
    pub fn dealer_id(&self) -> Option<Uuid> {
        self.state.read().dealer_id()
    }

    /// Sign in and remember the principal.
    ///
    /// # Errors
    /// Propagates the gateway error (bad credentials, network failure).
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserInfo> {
        self.state.write().loading = true;
        let outcome = self.gateway.login(credentials).await;

        let mut state = self.state.write();
        state.loading = false;
        let response = outcome?;
        info!(username = %response.user.username, role = %response.user.role, "Signed in");
        state.user = Some(response.user.clone());
        Ok(response.user)
    }

    /// Sign out. The principal is dropped even when the server call fails.
    ///
    /// # Errors
    /// Propagates the gateway error after local state has been cleared.
    pub async fn logout(&self) -> Result<()> {
        self.state.write().loading = true;
        let outcome = self.gateway.logout().await;

        let mut state = self.state.write();
        state.user = None;
        state.loading = false;
        info!("Signed out");
        outcome
    }

    /// Restore the principal from the stored access token.
    ///
    /// Without a token the session is simply marked initialized. A failed
    /// lookup clears the stored tokens and leaves the session signed out.
    ///
    /// # Errors
    /// Only token store read failures are returned; lookup failures are
    /// absorbed.
    pub async fn fetch_current_user(&self) -> Result<Option<UserInfo>> {
        if !self.tokens.has_access_token().into_eshop()? {
            self.state.write().initialized = true;
            return Ok(None);
        }

        self.state.write().loading = true;
        let outcome = self.gateway.current_user().await;

        let user = match outcome {
            Ok(me) => Some(me.user),
            Err(err) => {
                warn!(error = %err, "Failed to restore session, clearing tokens");
                if let Err(clear_err) = self.tokens.clear() {
                    warn!(error = %clear_err, "Failed to clear tokens");
                }
                None
            }
        };

        let mut state = self.state.write();
        state.user.clone_from(&user);
        state.loading = false;
        state.initialized = true;
        Ok(user)
    }

    /// Forget the principal without touching tokens or the server.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.user = None;
        state.loading = false;
    }
}
