//! Sign in / sign out commands

use eshop_core::{Navigator, Route};
use eshop_domain::{LoginRequest, Result, UserInfo};
use tracing::warn;

use crate::commands::navigation::navigate;
use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Sign in and move to the role's landing page (admin dashboard or the
/// product list).
pub async fn login(ctx: &AppContext, username: &str, password: &str) -> Result<UserInfo> {
    let user = execute_command("auth::login", || async {
        ctx.session.login(&LoginRequest::new(username, password)).await
    })
    .await?;

    // The login page is guest-only, so the guard redirects to the landing page.
    navigate(ctx, Route::Login).await?;
    Ok(user)
}

/// Sign out and show the login page.
///
/// Local state is cleared even when the server call fails; that failure is
/// only logged.
pub async fn logout(ctx: &AppContext) -> Result<()> {
    execute_command("auth::logout", || async {
        if let Err(err) = ctx.session.logout().await {
            warn!(error = %err, "Server logout failed; local session cleared");
        }
        ctx.navigator.navigate(Route::Login);
        Ok(())
    })
    .await
}

/// Restore the principal from the stored token.
pub async fn current_user(ctx: &AppContext) -> Result<Option<UserInfo>> {
    execute_command("auth::current_user", || ctx.session.fetch_current_user()).await
}
