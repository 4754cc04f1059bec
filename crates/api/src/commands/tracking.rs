//! Public order tracking commands

use eshop_domain::{CatalogEntry, Result, TrackingOrder};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Search shipments by phone, order id or tracking number. The term is
/// remembered in the search history.
pub async fn track_orders(ctx: &AppContext, query: &str) -> Result<Vec<TrackingOrder>> {
    execute_command("tracking::search", || ctx.tracker.search(query)).await
}

/// Recent search terms, newest first.
pub fn search_history(ctx: &AppContext) -> Result<Vec<String>> {
    ctx.tracker.history().entries()
}

pub fn clear_search_history(ctx: &AppContext) -> Result<()> {
    ctx.tracker.history().clear()
}

/// Products shown on the public landing page.
pub async fn landing_catalog(ctx: &AppContext) -> Result<Vec<CatalogEntry>> {
    execute_command("tracking::catalog", || ctx.tracker.catalog()).await
}
