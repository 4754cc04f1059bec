//! Port for leaving the current view

use super::routes::Route;

/// Moves the application to another route.
///
/// Called from the HTTP layer when a session is irrecoverably expired, so
/// implementations must not block or call back into the API client.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only logs; used where no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(path = route.path(), "Navigation requested");
    }
}
