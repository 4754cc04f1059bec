//! Route guard
//!
//! Decides whether a navigation may proceed given the auth session,
//! restoring the session from the stored token on first use.

use std::sync::Arc;

use eshop_domain::Result;
use tracing::debug;

use super::routes::Route;
use crate::auth::{AuthSession, SessionSnapshot};

/// Outcome of a guarded navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    Redirect(Route),
}

impl Navigation {
    /// Route that ends up displayed.
    #[must_use]
    pub const fn target(self) -> Route {
        match self {
            Self::Proceed(route) | Self::Redirect(route) => route,
        }
    }
}

/// Applies route access rules
pub struct RouteGuard {
    session: Arc<AuthSession>,
}

impl RouteGuard {
    pub fn new(session: Arc<AuthSession>) -> Self {
        Self { session }
    }

    /// Check a navigation to `to`.
    ///
    /// # Errors
    /// Token store failures while restoring the session.
    pub async fn check(&self, to: Route) -> Result<Navigation> {
        if !self.session.is_initialized() {
            self.session.fetch_current_user().await?;
        }

        let decision = Self::decide(to, &self.session.snapshot());
        debug!(to = to.path(), target = decision.target().path(), "Route guard decision");
        Ok(decision)
    }

    /// Rules in priority order, for an already-initialized session.
    #[must_use]
    pub fn decide(to: Route, session: &SessionSnapshot) -> Navigation {
        let meta = to.meta();

        if meta.guest && session.is_authenticated() {
            let home = if session.is_admin() { Route::Admin } else { Route::Products };
            return Navigation::Redirect(home);
        }
        if meta.requires_auth && !session.is_authenticated() {
            return Navigation::Redirect(Route::Login);
        }
        if meta.requires_admin && !session.is_admin() {
            return Navigation::Redirect(Route::Home);
        }
        if meta.requires_dealer && !session.is_dealer() && !session.is_admin() {
            return Navigation::Redirect(Route::Login);
        }
        Navigation::Proceed(to)
    }
}
