//! Admin commands for products and dealers

use eshop_domain::{
    Dealer, DealerCreate, DealerStatus, DealerUpdate, DealersParams, ImageUpload, Paginated,
    Product, ProductCreate, ProductUpdate, Result,
};
use uuid::Uuid;

use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

pub async fn create_product(ctx: &AppContext, product: &ProductCreate) -> Result<Product> {
    execute_command("admin::create_product", || async {
        Ok(ctx.products_api.create(product).await?)
    })
    .await
}

pub async fn update_product(
    ctx: &AppContext,
    id: Uuid,
    changes: &ProductUpdate,
) -> Result<Product> {
    execute_command("admin::update_product", || async {
        Ok(ctx.products_api.update(id, changes).await?)
    })
    .await
}

pub async fn delete_product(ctx: &AppContext, id: Uuid) -> Result<()> {
    execute_command("admin::delete_product", || async {
        Ok(ctx.products_api.delete(id).await?)
    })
    .await
}

pub async fn upload_product_image(
    ctx: &AppContext,
    id: Uuid,
    image: ImageUpload,
) -> Result<Product> {
    execute_command("admin::upload_product_image", || async {
        Ok(ctx.products_api.upload_image(id, image).await?)
    })
    .await
}

pub async fn list_dealers(ctx: &AppContext, params: &DealersParams) -> Result<Paginated<Dealer>> {
    execute_command("admin::list_dealers", || async { Ok(ctx.dealers_api.list(params).await?) })
        .await
}

pub async fn create_dealer(ctx: &AppContext, dealer: &DealerCreate) -> Result<Dealer> {
    execute_command("admin::create_dealer", || async {
        Ok(ctx.dealers_api.create(dealer).await?)
    })
    .await
}

pub async fn update_dealer(ctx: &AppContext, id: Uuid, changes: &DealerUpdate) -> Result<Dealer> {
    execute_command("admin::update_dealer", || async {
        Ok(ctx.dealers_api.update(id, changes).await?)
    })
    .await
}

/// Approve or suspend a dealer.
pub async fn set_dealer_status(ctx: &AppContext, id: Uuid, status: DealerStatus) -> Result<Dealer> {
    execute_command("admin::set_dealer_status", || async {
        Ok(ctx.dealers_api.update_status(id, status).await?)
    })
    .await
}

pub async fn delete_dealer(ctx: &AppContext, id: Uuid) -> Result<()> {
    execute_command("admin::delete_dealer", || async { Ok(ctx.dealers_api.delete(id).await?) })
        .await
}
