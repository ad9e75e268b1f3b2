use std::collections::HashSet;

/// Ids present in the current scrape but not in the seen set.
///
/// Exact set difference; no fuzzy matching, no normalization.
pub fn new_listing_ids(
    current: &HashSet<String>,
    seen: &HashSet<String>,
) -> HashSet<String> {
    current.difference(seen).cloned().collect()
}
