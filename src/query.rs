//! Query-string rendering of an applied filter configuration.

use crate::filters::AppliedFilters;
use crate::model::FilterSet;

/// Render the filter facets as `key=v1,v2&key2=...`.
///
/// Facets appear in the canonical order `FilterSet::facets` defines, so
/// two calls over identical input produce identical strings. Empty facets
/// are omitted; a fully empty filter set renders to `None`.
pub fn filter_query_params(filters: &FilterSet) -> Option<String> {
    let parts: Vec<String> = filters
        .facets()
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(key, values)| format!("{}={}", key, values.join(",")))
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("&"))
}

/// Query params for a whole applied configuration. Only the filter
/// category reaches the query string; display options are not part of
/// the item-list request contract.
pub fn applied_query_params(applied: &AppliedFilters) -> Option<String> {
    filter_query_params(applied.filters.as_ref()?)
}
