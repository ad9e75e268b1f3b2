use crate::types::Listing;

/// Keywords that mark a listing as an insurance write-off or salvage.
const WRITEOFF_KEYWORDS: &[&str] = &[
    "write-off",
    "writeoff",
    "write off",
    "cat s",
    "cat n",
    "cat d",
    "cat c",
    "cat b",
    "cat a",
    "category s",
    "category n",
    "category d",
    "category c",
    "salvage",
    "damaged",
    "insurance write",
    "accident damage",
    "repaired damage",
];

/// Check whether a listing looks like a write-off.
///
/// Case-insensitive substring match over the listing's text fields; returns
/// the first matching keyword so the caller can log it, or `None` to keep
/// the listing.
pub fn writeoff_keyword(listing: &Listing) -> Option<&'static str> {
    let text = format!(
        "{} {} {} {}",
        listing.description.to_lowercase(),
        listing.attention_grabber.to_lowercase(),
        listing.details.to_lowercase(),
        listing.title.to_lowercase(),
    );

    WRITEOFF_KEYWORDS
        .iter()
        .find(|keyword| text.contains(*keyword))
        .copied()
}
