//! Shared fixtures and in-memory gateway doubles for core integration tests.

#![allow(dead_code)]

pub mod gateways;

use chrono::Utc;
use eshop_domain::{
    CurrentUser, DealerInfo, DealerStatus, LoginResponse, Paginated, Product, UserInfo, UserRole,
};
use uuid::Uuid;

pub fn product(name: &str, price: f64) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: "甜品".to_string(),
        price,
        unit: "盒".to_string(),
        min_order_quantity: 1,
        description: None,
        image_url: None,
        stock: 50,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Page `page` of `pages`, holding `count` freshly generated products.
pub fn page(page: u32, pages: u32, count: usize) -> Paginated<Product> {
    Paginated {
        items: (0..count).map(|i| product(&format!("p{page}-{i}"), 10.0)).collect(),
        total: u64::from(pages) * count as u64,
        page,
        page_size: 20,
        pages,
    }
}

pub fn admin() -> UserInfo {
    UserInfo {
        id: Uuid::new_v4(),
        username: "admin".to_string(),
        email: "admin@xinyutian.com".to_string(),
        role: UserRole::Admin,
        is_active: true,
        dealer: None,
    }
}

pub fn dealer(status: DealerStatus) -> UserInfo {
    UserInfo {
        id: Uuid::new_v4(),
        username: "dealer01".to_string(),
        email: "d01@example.com".to_string(),
        role: UserRole::Dealer,
        is_active: true,
        dealer: Some(DealerInfo {
            id: Uuid::new_v4(),
            company_name: "甜品批发".to_string(),
            contact_name: "王五".to_string(),
            phone: "13812345678".to_string(),
            address: None,
            status,
        }),
    }
}

pub fn login_response(user: UserInfo) -> LoginResponse {
    LoginResponse {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        token_type: "bearer".to_string(),
        user,
    }
}

pub fn current_user(user: UserInfo) -> CurrentUser {
    CurrentUser { user, created_at: Utc::now(), updated_at: Utc::now() }
}
