//! System configuration, startup, and shutdown logic.

pub mod config;
pub mod shop_system;
pub mod telemetry;

pub use config::*;
pub use shop_system::*;
pub use telemetry::*;
