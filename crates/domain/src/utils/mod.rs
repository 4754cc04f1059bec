//! Pure helpers shared by the domain types

pub mod money;
pub mod phone;
