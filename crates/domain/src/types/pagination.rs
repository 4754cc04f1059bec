//! Paged list envelope

use serde::{Deserialize, Serialize};

/// One page of a server-side list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub pages: u32,
}

impl<T> Paginated<T> {
    /// Whether pages remain after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }
}
