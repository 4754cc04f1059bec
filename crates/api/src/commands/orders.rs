//! Order commands (dealer history and admin processing)

use eshop_domain::{Order, OrderStats, OrderStatus, OrdersParams, Paginated, Result};
use uuid::Uuid;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

pub async fn list_orders(ctx: &AppContext, params: &OrdersParams) -> Result<Paginated<Order>> {
    execute_command("orders::list", || async { Ok(ctx.orders_api.list(params).await?) }).await
}

pub async fn get_order(ctx: &AppContext, id: Uuid) -> Result<Order> {
    execute_command("orders::get", || async { Ok(ctx.orders_api.get(id).await?) }).await
}

/// Cancel a pending or confirmed order.
pub async fn cancel_order(ctx: &AppContext, id: Uuid) -> Result<Order> {
    execute_command("orders::cancel", || async { Ok(ctx.orders_api.cancel(id).await?) }).await
}

/// Move an order along its lifecycle (admin).
pub async fn update_order_status(ctx: &AppContext, id: Uuid, status: OrderStatus) -> Result<Order> {
    execute_command("orders::update_status", || async {
        Ok(ctx.orders_api.update_status(id, status).await?)
    })
    .await
}

/// Dashboard counters (admin).
pub async fn order_stats(ctx: &AppContext) -> Result<OrderStats> {
    execute_command("orders::stats", || async { Ok(ctx.orders_api.stats().await?) }).await
}
