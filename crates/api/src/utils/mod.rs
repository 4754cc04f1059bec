//! Command plumbing shared by the application layer

pub mod command_helpers;
pub mod health;
pub mod logging;
