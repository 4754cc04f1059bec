//! Guarded navigation commands

use eshop_core::{Navigation, Navigator, Route};
use eshop_domain::{EshopError, Result};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Navigate to `to`, applying the route access rules.
///
/// The first call restores the session from the stored token. The returned
/// [`Navigation`] says whether the target was shown or redirected.
pub async fn navigate(ctx: &AppContext, to: Route) -> Result<Navigation> {
    execute_command("navigation::navigate", || async {
        let decision = ctx.guard.check(to).await?;
        ctx.navigator.navigate(decision.target());
        Ok(decision)
    })
    .await
}

/// Navigate by URL path (e.g. `"/admin/orders"`).
pub async fn navigate_path(ctx: &AppContext, path: &str) -> Result<Navigation> {
    let route = Route::from_path(path)
        .ok_or_else(|| EshopError::NotFound(format!("no route for path {path}")))?;
    navigate(ctx, route).await
}
