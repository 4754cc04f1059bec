//! Product catalog commands

use eshop_domain::{Paginated, Product, ProductsParams, Result};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Load the current page with the current filters.
pub async fn load_products(ctx: &AppContext) -> Result<Paginated<Product>> {
    execute_command("catalog::load_products", || {
        ctx.catalog.fetch_products(ProductsParams::default())
    })
    .await
}

/// Jump to `page`.
pub async fn go_to_page(ctx: &AppContext, page: u32) -> Result<Paginated<Product>> {
    execute_command("catalog::go_to_page", || {
        ctx.catalog.fetch_products(ProductsParams { page: Some(page), ..Default::default() })
    })
    .await
}

/// Append the next page; returns how many products were added.
pub async fn load_more_products(ctx: &AppContext) -> Result<usize> {
    execute_command("catalog::load_more", || async { Ok(ctx.catalog.load_more().await) }).await
}

/// Filter by category (`None` shows all) and reload from page 1.
pub async fn filter_by_category(
    ctx: &AppContext,
    category: Option<String>,
) -> Result<Paginated<Product>> {
    ctx.catalog.set_category(category);
    load_products(ctx).await
}

/// Filter by search text and reload from page 1.
pub async fn search_products(ctx: &AppContext, query: &str) -> Result<Paginated<Product>> {
    ctx.catalog.set_search(query);
    load_products(ctx).await
}

/// Refresh the category list.
pub async fn load_categories(ctx: &AppContext) -> Result<Vec<String>> {
    execute_command("catalog::load_categories", || async {
        ctx.catalog.fetch_categories().await;
        Ok(ctx.catalog.categories())
    })
    .await
}
