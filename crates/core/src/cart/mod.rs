//! Shopping cart store
//!
//! Lines are unique by product id and keep insertion order. Every mutation
//! is written to the key/value store under `xinyutian_cart` before the
//! call returns; the cart is rehydrated from there at construction.

use std::sync::Arc;

use eshop_common::KeyValueStore;
use eshop_domain::constants::CART_STORAGE_KEY;
use eshop_domain::{EshopError, OrderCreate, OrderItemCreate, Product, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::IntoEshopError;

/// One cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Persistent cart
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    items: Mutex<Vec<CartItem>>,
}

impl CartStore {
    /// Load the cart saved in `storage`. A missing, unreadable or corrupt
    /// payload yields an empty cart.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let items = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "Discarding unreadable saved cart");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "Failed to read saved cart");
                Vec::new()
            }
        };
        Self { storage, items: Mutex::new(items) }
    }

    /// Copy of the current lines.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.lock().clone()
    }

    /// Add `quantity` of `product`, merging into an existing line.
    ///
    /// # Errors
    /// `Validation` when `quantity` is zero; `Storage` when persisting fails.
    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(EshopError::Validation("quantity must be at least 1".into()));
        }

        self.mutate(|items| match items.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => items.push(CartItem { product: product.clone(), quantity }),
        })?;
        debug!(product_id = %product.id, quantity, "Added to cart");
        Ok(())
    }

    /// Drop the line for `product_id`, if present.
    ///
    /// # Errors
    /// `Storage` when persisting fails.
    pub fn remove_item(&self, product_id: Uuid) -> Result<()> {
        self.mutate(|items| items.retain(|line| line.product.id != product_id))
    }

    /// Set the quantity of an existing line; zero or less removes it.
    ///
    /// # Errors
    /// `Storage` when persisting fails.
    pub fn update_quantity(&self, product_id: Uuid, quantity: i64) -> Result<()> {
        let Ok(quantity) = u32::try_from(quantity) else {
            return if quantity <= 0 { self.remove_item(product_id) } else { Ok(()) };
        };
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        self.mutate(|items| {
            if let Some(line) = items.iter_mut().find(|line| line.product.id == product_id) {
                line.quantity = quantity;
            }
        })
    }

    /// Empty the cart.
    ///
    /// # Errors
    /// `Storage` when persisting fails.
    pub fn clear(&self) -> Result<()> {
        self.mutate(Vec::clear)
    }

    /// Quantity of `product_id` in the cart (zero when absent).
    #[must_use]
    pub fn item_quantity(&self, product_id: Uuid) -> u32 {
        self.items
            .lock()
            .iter()
            .find(|line| line.product.id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.lock().iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        self.items.lock().iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Read the saved cart back and count its lines.
    ///
    /// # Errors
    /// `Storage` when the store cannot be read, `Internal` when the saved
    /// payload is not a cart.
    pub fn saved_lines(&self) -> Result<usize> {
        let Some(raw) = self.storage.get(CART_STORAGE_KEY).into_eshop()? else {
            return Ok(0);
        };
        let lines: Vec<CartItem> = serde_json::from_str(&raw)
            .map_err(|e| EshopError::Internal(format!("saved cart is unreadable: {e}")))?;
        Ok(lines.len())
    }

    /// Build the order payload for checkout.
    ///
    /// # Errors
    /// `Validation` when the cart is empty or the address is blank.
    pub fn to_order(&self, shipping_address: &str, notes: Option<&str>) -> Result<OrderCreate> {
        let shipping_address = shipping_address.trim();
        if shipping_address.is_empty() {
            return Err(EshopError::Validation("shipping address is required".into()));
        }

        let items: Vec<OrderItemCreate> = self
            .items
            .lock()
            .iter()
            .map(|line| OrderItemCreate {
                product_id: line.product.id,
                product_name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price: line.product.price,
            })
            .collect();
        if items.is_empty() {
            return Err(EshopError::Validation("cart is empty".into()));
        }

        Ok(OrderCreate {
            items,
            shipping_address: shipping_address.to_string(),
            notes: notes.map(str::trim).filter(|n| !n.is_empty()).map(str::to_string),
        })
    }

    /// Apply `change` to a copy of the lines, persist the copy, then make it
    /// current. A failed write leaves the cart as it was.
    fn mutate(&self, change: impl FnOnce(&mut Vec<CartItem>)) -> Result<()> {
        let mut items = self.items.lock();
        let mut next = items.clone();
        change(&mut next);

        let payload =
            serde_json::to_string(&next).map_err(|e| EshopError::Internal(e.to_string()))?;
        self.storage.set(CART_STORAGE_KEY, &payload).into_eshop()?;

        *items = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use eshop_common::testing::MockKeyValueStore;
    use eshop_common::MemoryStore;

    use super::*;

    fn product(name: &str, price: f64) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: "甜品".to_string(),
            price,
            unit: "盒".to_string(),
            min_order_quantity: 1,
            description: None,
            image_url: None,
            stock: 100,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn cart() -> CartStore {
        CartStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn adding_same_product_merges_quantity() {
        let cart = cart();
        let p = product("芒果班戟", 18.5);
        cart.add_item(&p, 2).unwrap();
        cart.add_item(&p, 3).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_quantity(p.id), 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn update_to_zero_removes_line() {
        let cart = cart();
        let p = product("双皮奶", 12.0);
        cart.add_item(&p, 2).unwrap();
        cart.update_quantity(p.id, 0).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.item_quantity(p.id), 0);
    }

    #[test]
    fn negative_quantity_also_removes_line() {
        let cart = cart();
        let p = product("双皮奶", 12.0);
        cart.add_item(&p, 2).unwrap();
        cart.update_quantity(p.id, -3).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn zero_quantity_add_is_rejected() {
        let cart = cart();
        let err = cart.add_item(&product("x", 1.0), 0).unwrap_err();
        assert!(matches!(err, EshopError::Validation(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn totals_follow_lines_in_insertion_order() {
        let cart = cart();
        let a = product("a", 10.0);
        let b = product("b", 2.5);
        cart.add_item(&a, 1).unwrap();
        cart.add_item(&b, 4).unwrap();

        let names: Vec<_> = cart.items().into_iter().map(|l| l.product.name).collect();
        assert_eq!(names, ["a", "b"]);
        assert!((cart.total_amount() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn every_mutation_is_persisted_and_rehydrated() {
        let storage = Arc::new(MockKeyValueStore::new());
        let p = product("杨枝甘露", 22.0);
        {
            let cart = CartStore::new(storage.clone());
            cart.add_item(&p, 2).unwrap();
            cart.update_quantity(p.id, 7).unwrap();
        }
        assert_eq!(storage.set_calls(), 2);

        let restored = CartStore::new(storage);
        assert_eq!(restored.item_quantity(p.id), 7);
    }

    #[test]
    fn corrupt_saved_cart_loads_empty() {
        let storage = Arc::new(MockKeyValueStore::new().with_entry(CART_STORAGE_KEY, "{oops"));
        assert!(CartStore::new(storage).is_empty());
    }

    #[test]
    fn storage_failure_is_reported() {
        let storage = Arc::new(MockKeyValueStore::new());
        let cart = CartStore::new(storage.clone());
        storage.fail_writes(true);

        let err = cart.add_item(&product("x", 1.0), 1).unwrap_err();
        assert!(matches!(err, EshopError::Storage(_)));
    }

    #[test]
    fn saved_lines_reads_the_store_back() {
        let storage = Arc::new(MockKeyValueStore::new());
        let cart = CartStore::new(storage.clone());
        assert_eq!(cart.saved_lines().unwrap(), 0);

        cart.add_item(&product("杨枝甘露", 22.0), 1).unwrap();
        cart.add_item(&product("双皮奶", 12.0), 2).unwrap();
        assert_eq!(cart.saved_lines().unwrap(), 2);

        storage.fail_reads(true);
        assert!(matches!(cart.saved_lines(), Err(EshopError::Storage(_))));
    }

    #[test]
    fn saved_lines_rejects_a_foreign_payload() {
        let storage = Arc::new(MockKeyValueStore::new().with_entry(CART_STORAGE_KEY, "[1,2]"));
        let cart = CartStore::new(storage);
        assert!(cart.is_empty());
        assert!(matches!(cart.saved_lines(), Err(EshopError::Internal(_))));
    }

    #[test]
    fn failed_write_leaves_cart_unchanged() {
        let storage = Arc::new(MockKeyValueStore::new());
        let cart = CartStore::new(storage.clone());
        let mango = product("芒果班戟", 18.0);
        cart.add_item(&mango, 2).unwrap();
        let saved = storage.snapshot();

        storage.fail_writes(true);
        assert!(cart.add_item(&mango, 3).is_err());
        assert!(cart.add_item(&product("双皮奶", 12.0), 1).is_err());
        assert!(cart.update_quantity(mango.id, 9).is_err());
        assert!(cart.remove_item(mango.id).is_err());
        assert!(cart.clear().is_err());

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_quantity(mango.id), 2);
        assert_eq!(storage.snapshot(), saved);
    }

    #[test]
    fn checkout_payload_copies_lines() {
        let cart = cart();
        let p = product("芒果班戟", 18.5);
        cart.add_item(&p, 6).unwrap();

        let order = cart.to_order("  深圳市南山区  ", Some(" ")).unwrap();
        assert_eq!(order.shipping_address, "深圳市南山区");
        assert!(order.notes.is_none());
        assert_eq!(order.items[0].product_id, p.id);
        assert_eq!(order.items[0].quantity, 6);
    }

    #[test]
    fn checkout_requires_items_and_address() {
        let cart = cart();
        assert!(matches!(cart.to_order("addr", None), Err(EshopError::Validation(_))));
        cart.add_item(&product("x", 1.0), 1).unwrap();
        assert!(matches!(cart.to_order("   ", None), Err(EshopError::Validation(_))));
    }
}
