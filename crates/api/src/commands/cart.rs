//! Cart and checkout commands

use eshop_core::CartItem;
use eshop_domain::{Order, Product, Result};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Cart contents with totals, as shown on the cart page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub total_amount: f64,
}

/// Current cart contents.
pub fn cart_summary(ctx: &AppContext) -> CartSummary {
    CartSummary {
        items: ctx.cart.items(),
        total_items: ctx.cart.total_items(),
        total_amount: ctx.cart.total_amount(),
    }
}

/// Add `quantity` of a product. The product is taken from the loaded
/// catalog page, or fetched when it is not on it.
pub async fn add_to_cart(ctx: &AppContext, product_id: Uuid, quantity: u32) -> Result<CartSummary> {
    execute_command("cart::add", || async {
        let product = find_product(ctx, product_id).await?;
        ctx.cart.add_item(&product, quantity)?;
        Ok(cart_summary(ctx))
    })
    .await
}

/// Set a line's quantity; zero or less removes the line.
pub async fn update_cart_quantity(
    ctx: &AppContext,
    product_id: Uuid,
    quantity: i64,
) -> Result<CartSummary> {
    execute_command("cart::update_quantity", || async {
        ctx.cart.update_quantity(product_id, quantity)?;
        Ok(cart_summary(ctx))
    })
    .await
}

pub async fn remove_from_cart(ctx: &AppContext, product_id: Uuid) -> Result<CartSummary> {
    execute_command("cart::remove", || async {
        ctx.cart.remove_item(product_id)?;
        Ok(cart_summary(ctx))
    })
    .await
}

/// Place an order for the cart contents and empty the cart.
///
/// The cart is kept when the order is rejected. Once the server has accepted
/// the order the call succeeds even if the cart cannot be emptied.
pub async fn checkout(
    ctx: &AppContext,
    shipping_address: &str,
    notes: Option<&str>,
) -> Result<Order> {
    execute_command("cart::checkout", || async {
        let payload = ctx.cart.to_order(shipping_address, notes)?;
        let order = ctx.orders_api.create(&payload).await?;
        if let Err(err) = ctx.cart.clear() {
            warn!(order_no = %order.order_no, error = %err, "Order placed but cart not cleared");
        }
        info!(order_no = %order.order_no, "Cart checked out");
        Ok(order)
    })
    .await
}

async fn find_product(ctx: &AppContext, product_id: Uuid) -> Result<Product> {
    if let Some(product) = ctx.catalog.products().into_iter().find(|p| p.id == product_id) {
        return Ok(product);
    }
    Ok(ctx.products_api.get(product_id).await?)
}
