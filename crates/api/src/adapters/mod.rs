//! Adapters implementing core ports for the application layer

pub mod navigator;

pub use navigator::AppNavigator;
