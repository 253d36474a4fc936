//! Order pricing.

pub mod error;
pub mod pricing;

pub use error::*;
pub use pricing::price_order;
