//! Product catalog logic: listing predicates and product validation.

pub mod error;
pub mod query;
pub mod validation;

pub use error::*;
pub use query::{build_filter, check_limit, SEARCH_FIELDS};
pub use validation::{parse_product_id, product_document, validate_product};
