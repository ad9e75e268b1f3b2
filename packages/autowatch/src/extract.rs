use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::types::Listing;

const SITE_ORIGIN: &str = "https://www.autotrader.co.uk";

struct ListingSelectors {
    title: Selector,
    details: Selector,
    cost: Selector,
    description: Selector,
    attention_grabber: Selector,
    link: Selector,
}

impl ListingSelectors {
    fn new() -> Self {
        Self {
            title: Selector::parse("h2.listing-title").expect("valid selector"),
            details: Selector::parse("ul.listing-key-specs").expect("valid selector"),
            cost: Selector::parse("div.vehicle-price").expect("valid selector"),
            description: Selector::parse("p.listing-description").expect("valid selector"),
            attention_grabber: Selector::parse("p.listing-attention-grabber")
                .expect("valid selector"),
            link: Selector::parse("a").expect("valid selector"),
        }
    }
}

/// Extract listings from one search result page.
///
/// The page exposes parallel collections of title/spec/price/description/
/// attention-grabber blocks; elements are paired by positional index,
/// truncating to the shortest collection. A page with mismatched block
/// counts silently drops the trailing unpaired entries.
pub fn extract_listings(html: &str) -> Vec<Listing> {
    let document = Html::parse_document(html);
    let selectors = ListingSelectors::new();

    let titles: Vec<_> = document.select(&selectors.title).collect();
    let details: Vec<_> = document.select(&selectors.details).collect();
    let costs: Vec<_> = document.select(&selectors.cost).collect();
    let descriptions: Vec<_> = document.select(&selectors.description).collect();
    let grabbers: Vec<_> = document.select(&selectors.attention_grabber).collect();

    let count = [
        titles.len(),
        details.len(),
        costs.len(),
        descriptions.len(),
        grabbers.len(),
    ]
    .into_iter()
    .min()
    .unwrap_or(0);

    debug!(
        titles = titles.len(),
        complete_tuples = count,
        "Extracting listings from page"
    );

    let mut listings = Vec::with_capacity(count);
    for i in 0..count {
        let mut listing = Listing::new(joined_text(&titles[i]));
        listing.details = joined_text(&details[i]);
        listing.cost = plain_text(&costs[i]);
        listing.description = joined_text(&descriptions[i]);
        listing.attention_grabber = joined_text(&grabbers[i]);
        listing.url = listing_url(&titles[i], &selectors.link);
        listings.push(listing);
    }

    listings
}

/// Collect an element's text segments, trimmed, pipe-joined.
fn joined_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}

fn plain_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolve the title's embedded link to an absolute URL, or empty if the
/// title carries no link.
fn listing_url(title: &ElementRef, link_selector: &Selector) -> String {
    title
        .select(link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| {
            Url::parse(SITE_ORIGIN)
                .ok()?
                .join(href)
                .ok()
                .map(|u| u.to_string())
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing_id;

    fn listing_block(title: &str, href: &str) -> String {
        format!(
            r#"<h2 class="listing-title"><a href="{href}">{title}</a></h2>
               <ul class="listing-key-specs"><li>2021</li><li>30,000 miles</li></ul>
               <div class="vehicle-price">£13,500</div>
               <p class="listing-description">Great condition throughout.</p>
               <p class="listing-attention-grabber">Low mileage</p>"#
        )
    }

    #[test]
    fn test_extract_complete_listing() {
        let html = format!(
            "<html><body>{}</body></html>",
            listing_block("BMW 3 Series 320i", "/car-details/12345")
        );
        let listings = extract_listings(&html);

        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.title, "BMW 3 Series 320i");
        assert_eq!(listing.details, "2021|30,000 miles");
        assert_eq!(listing.cost, "£13,500");
        assert_eq!(listing.description, "Great condition throughout.");
        assert_eq!(listing.attention_grabber, "Low mileage");
        assert_eq!(
            listing.url,
            "https://www.autotrader.co.uk/car-details/12345"
        );
        assert_eq!(listing.id, listing_id("BMW 3 Series 320i"));
    }

    #[test]
    fn test_extract_truncates_to_shortest_collection() {
        // Two titles but only one of everything else: the unpaired trailing
        // title is dropped.
        let html = format!(
            r#"<html><body>
               {}
               <h2 class="listing-title"><a href="/car-details/99">Orphan</a></h2>
               </body></html>"#,
            listing_block("BMW 318d", "/car-details/1")
        );
        let listings = extract_listings(&html);

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "BMW 318d");
    }

    #[test]
    fn test_extract_without_link_leaves_url_empty() {
        let html = r#"<html><body>
            <h2 class="listing-title">BMW 320d</h2>
            <ul class="listing-key-specs"><li>2020</li></ul>
            <div class="vehicle-price">£12,000</div>
            <p class="listing-description">Tidy example.</p>
            <p class="listing-attention-grabber">Just in</p>
        </body></html>"#;
        let listings = extract_listings(html);

        assert_eq!(listings.len(), 1);
        assert!(listings[0].url.is_empty());
    }

    #[test]
    fn test_extract_empty_page() {
        assert!(extract_listings("<html><body></body></html>").is_empty());
    }
}
