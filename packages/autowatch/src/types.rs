use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// One discovered vehicle listing.
///
/// All fields default to empty; `id` is always non-empty for listings built
/// through [`Listing::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub details: String,
    pub cost: String,
    pub description: String,
    pub attention_grabber: String,
    pub url: String,
}

impl Listing {
    pub fn new(title: String) -> Self {
        Self {
            id: listing_id(&title),
            title,
            ..Default::default()
        }
    }
}

/// Mapping from listing id to listing. Later pages win on id collision.
pub type ListingSet = HashMap<String, Listing>;

/// Stable identifier for a listing, derived from its title text.
///
/// SHA-256 rather than a process-local hash so ids survive across runs and
/// processes. Distinct listings with identical titles still collide; that is
/// an accepted limitation of title-based identity.
pub fn listing_id(title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}

/// Final run summary, printed as JSON to stdout.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub ok: bool,
    pub new_cars_count: usize,
    pub total_count: usize,
    pub previously_seen: usize,
    pub currently_seen: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_id_deterministic() {
        let a = listing_id("2021 BMW 3 Series|320i M Sport");
        let b = listing_id("2021 BMW 3 Series|320i M Sport");
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_listing_id_differs_by_title() {
        assert_ne!(listing_id("2021 BMW 320i"), listing_id("2021 BMW 330e"));
    }

    #[test]
    fn test_listing_new_sets_id() {
        let listing = Listing::new("2020 BMW 318i".to_string());
        assert_eq!(listing.id, listing_id("2020 BMW 318i"));
        assert!(listing.url.is_empty());
    }
}
