//! # Shop API
//!
//! A small e-commerce backend: a product catalog with filtered search and order
//! placement with server-side pricing, persisted in a document store.
//!
//! ## Layout
//!
//! - [`store`]: the document store seam, with MongoDB and in-memory backends.
//! - [`catalog`]: the product query builder and product validation.
//! - [`orders`]: the order pricing engine.
//! - [`clients`]: instrumented facades that tie the logic to a store.
//! - [`http`]: the axum router and handlers.
//! - [`app_system`]: configuration, tracing setup and the system lifecycle.

pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod domain;
pub mod error;
pub mod http;
pub mod orders;
pub mod store;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
