use std::collections::HashSet;

use crate::types::ListingSet;

/// Per-message character budget, kept conservatively under Telegram's 4096
/// hard limit.
pub const MESSAGE_LIMIT: usize = 4000;

const DIVIDER: &str = "========================================";

/// Render the new listings into one or more notification messages.
///
/// Ids are sorted lexicographically so output is deterministic (this is
/// sort-by-identifier, not by price or date). Whenever the next listing
/// block would push a message past [`MESSAGE_LIMIT`], the message is sealed
/// and a "Continued" message started. Returns an empty vec when there is
/// nothing new; callers must not notify in that case.
pub fn format_messages(
    new_ids: &HashSet<String>,
    listings: &ListingSet,
    make: &str,
    model: &str,
) -> Vec<String> {
    let mut messages = Vec::new();

    if new_ids.is_empty() {
        return messages;
    }

    let mut sorted_ids: Vec<&String> = new_ids.iter().collect();
    sorted_ids.sort();

    let total = sorted_ids.len();
    let header = format!(
        "🚗 New AutoTrader Alert!\n\n{total} new {make} {model}(s) found:\n\n{DIVIDER}\n"
    );

    let mut current = header;
    let mut car_count = 0usize;

    for id in sorted_ids {
        let block = listing_block(id, listings);

        if char_len(&current) + char_len(&block) > MESSAGE_LIMIT {
            messages.push(current);
            current = format!("🚗 Continued ({}/{})...\n\n", car_count + 1, total);
        }
        current.push_str(&block);
        car_count += 1;
    }

    let footer = format!(
        "\n📋 Search Criteria:\n\
         • Make/Model: {make} {model}\n\
         • Year: 2020 and newer\n\
         • Price: Under £15,000\n\
         • Mileage: Under 80,000 miles\n\
         • Transmission: Automatic only\n\
         • Condition: No write-offs\n"
    );

    if char_len(&current) + char_len(&footer) > MESSAGE_LIMIT {
        messages.push(current);
        messages.push(footer);
    } else {
        current.push_str(&footer);
        messages.push(current);
    }

    messages
}

/// One listing's section of the message, with empty fields omitted.
fn listing_block(id: &str, listings: &ListingSet) -> String {
    let mut block = String::from("\n");

    let Some(listing) = listings.get(id) else {
        block.push_str("📍 Unknown\n");
        block.push_str(&format!("\n{DIVIDER}\n"));
        return block;
    };

    block.push_str(&format!("📍 {}\n", listing.title));
    if !listing.details.is_empty() {
        block.push_str(&format!("   {}\n", listing.details));
    }
    if !listing.cost.is_empty() {
        block.push_str(&format!("   💰 {}\n", listing.cost));
    }
    if !listing.description.is_empty() {
        block.push_str(&format!("   📝 {}\n", listing.description));
    }
    if !listing.attention_grabber.is_empty() {
        block.push_str(&format!("   ⭐ {}\n", listing.attention_grabber));
    }
    if !listing.url.is_empty() {
        block.push_str(&format!("   🔗 {}\n", listing.url));
    }
    block.push_str(&format!("\n{DIVIDER}\n"));

    block
}

/// The 4000-character budget is in characters, not bytes; the emoji in the
/// headers make those differ.
fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Listing;

    fn synthetic_listings(count: usize) -> (HashSet<String>, ListingSet) {
        let mut ids = HashSet::new();
        let mut listings = ListingSet::new();

        for i in 0..count {
            let mut listing = Listing::new(format!("BMW 3 Series variant {i:03}"));
            listing.details = "2021|30,000 miles|Automatic|2.0L|Petrol".to_string();
            listing.cost = "£13,999".to_string();
            listing.description =
                "Full service history, two keys, recently serviced with new brakes all round."
                    .to_string();
            listing.attention_grabber = "Low mileage for the year".to_string();
            listing.url = format!("https://www.autotrader.co.uk/car-details/{i}");
            ids.insert(listing.id.clone());
            listings.insert(listing.id.clone(), listing);
        }

        (ids, listings)
    }

    #[test]
    fn test_empty_new_ids_yields_no_messages() {
        let (_, listings) = synthetic_listings(3);
        let messages = format_messages(&HashSet::new(), &listings, "BMW", "3 Series");
        assert!(messages.is_empty());
    }

    #[test]
    fn test_single_listing_fits_one_message() {
        let (ids, listings) = synthetic_listings(1);
        let messages = format_messages(&ids, &listings, "BMW", "3 Series");

        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("1 new BMW 3 Series(s) found"));
        assert!(messages[0].contains("BMW 3 Series variant 000"));
        assert!(messages[0].contains("Search Criteria"));
    }

    #[test]
    fn test_long_batch_splits_under_limit() {
        // Enough listings to blow well past one 4000-char message
        let (ids, listings) = synthetic_listings(40);
        let messages = format_messages(&ids, &listings, "BMW", "3 Series");

        assert!(messages.len() > 1);
        for message in &messages {
            assert!(message.chars().count() <= MESSAGE_LIMIT);
        }

        // Every title appears exactly once across the concatenation
        let all = messages.concat();
        for listing in listings.values() {
            assert_eq!(all.matches(&listing.title).count(), 1, "{}", listing.title);
        }

        // Overflow messages carry the continued header
        assert!(messages[1].starts_with("🚗 Continued ("));
    }

    #[test]
    fn test_output_is_deterministic() {
        let (ids, listings) = synthetic_listings(10);
        let a = format_messages(&ids, &listings, "BMW", "3 Series");
        let b = format_messages(&ids, &listings, "BMW", "3 Series");
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let listing = Listing::new("Bare listing".to_string());
        let mut listings = ListingSet::new();
        let mut ids = HashSet::new();
        ids.insert(listing.id.clone());
        listings.insert(listing.id.clone(), listing);

        let messages = format_messages(&ids, &listings, "BMW", "3 Series");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("📍 Bare listing"));
        assert!(!messages[0].contains("💰"));
        assert!(!messages[0].contains("🔗"));
    }
}
