//! Navigator backing the application's current route
//!
//! The interceptor pair calls [`Navigator::navigate`] with [`Route::Login`]
//! when a session cannot be refreshed. That redirect also forgets the signed
//! in principal, matching a full page reload to the login screen.

use std::sync::{Arc, Weak};

use eshop_core::{AuthSession, Navigator, Route};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::info;

/// Keeps track of the displayed route.
#[derive(Debug)]
pub struct AppNavigator {
    current: RwLock<Route>,
    session: OnceCell<Weak<AuthSession>>,
}

impl AppNavigator {
    pub fn new() -> Self {
        Self { current: RwLock::new(Route::Home), session: OnceCell::new() }
    }

    /// Session to reset on a login redirect. Only the first call has an
    /// effect; the navigator holds a weak reference to avoid a cycle through
    /// the API client.
    pub fn attach_session(&self, session: &Arc<AuthSession>) {
        let _ = self.session.set(Arc::downgrade(session));
    }

    /// Route currently displayed.
    pub fn current(&self) -> Route {
        *self.current.read()
    }
}

impl Default for AppNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for AppNavigator {
    fn navigate(&self, route: Route) {
        if route == Route::Login {
            if let Some(session) = self.session.get().and_then(Weak::upgrade) {
                session.reset();
            }
        }

        let previous = std::mem::replace(&mut *self.current.write(), route);
        info!(from = previous.path(), to = route.path(), "Navigated");
    }
}
