use crate::domain::ProductQuery;
use crate::store::Filter;

use super::ProductError;

/// Fields searched by the free-text `q` parameter.
pub const SEARCH_FIELDS: [&str; 3] = ["title", "description", "category"];

const CATEGORY_FIELD: &str = "category";

/// Builds the listing predicate from the optional `category` and `q` parameters.
///
/// `category` requires exact equality. `q` requires at least one of [`SEARCH_FIELDS`] to
/// contain it as a case-insensitive substring. When both are given they are combined
/// with AND; when neither is given every product matches. Empty strings count as absent.
pub fn build_filter(query: &ProductQuery) -> Filter {
    let category = present(&query.category).map(|category| Filter::equals(CATEGORY_FIELD, category));

    let search = present(&query.q).map(|needle| {
        Filter::AnyOf(
            SEARCH_FIELDS
                .iter()
                .map(|field| Filter::contains_ignore_case(*field, needle))
                .collect(),
        )
    });

    Filter::and(category.into_iter().chain(search).collect())
}

/// Rejects negative limits. Zero means unlimited and there is no upper bound.
pub fn check_limit(limit: i64) -> Result<i64, ProductError> {
    if limit < 0 {
        return Err(ProductError::ValidationError(format!(
            "limit must not be negative, got {limit}"
        )));
    }
    Ok(limit)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
