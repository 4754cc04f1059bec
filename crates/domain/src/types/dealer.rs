//! Dealer account types (admin management)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_domain_status_conversions;

/// Dealer approval state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealerStatus {
    #[default]
    Pending,
    Approved,
    Suspended,
}

impl_domain_status_conversions!(DealerStatus {
    Pending => "pending",
    Approved => "approved",
    Suspended => "suspended",
});

/// Login account attached to a dealer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

/// Dealer as listed in the admin console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: Uuid,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    pub status: DealerStatus,
    pub created_at: DateTime<Utc>,
    pub user: DealerUser,
}

/// Payload of `POST /dealers` (creates the login account too)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub status: DealerStatus,
}

/// Payload of `PUT /dealers/{id}`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Payload of `PUT /dealers/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerStatusUpdate {
    pub status: DealerStatus,
}

/// Query parameters for `GET /dealers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DealerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dealers_default_to_pending() {
        let create: DealerCreate = serde_json::from_value(serde_json::json!({
            "username": "d02",
            "email": "d02@example.com",
            "password": "secret",
            "company_name": "好甜食品",
            "contact_name": "李四",
            "phone": "13900000000"
        }))
        .unwrap();
        assert_eq!(create.status, DealerStatus::Pending);
    }
}
