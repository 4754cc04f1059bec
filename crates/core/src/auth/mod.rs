//! Signed-in principal and login lifecycle

pub mod ports;
pub mod session;

pub use session::{AuthSession, SessionSnapshot};
