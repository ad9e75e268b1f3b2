use std::collections::HashSet;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::{Config, MAX_PAGES};
use crate::fetch::{self, PageFetcher};
use crate::types::{ListingSet, RunSummary};
use crate::{diff, extract, filter, format, search, state};

/// Trait for notification transports (to allow mocking in tests).
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

#[async_trait::async_trait]
impl Notifier for telegram::TelegramService {
    async fn notify(&self, text: &str) -> Result<()> {
        self.send_message(text).await.map_err(Into::into)
    }
}

/// Execute one watch run: fetch, filter, diff, notify, persist.
///
/// Everything after the fetch is sequential and failure-tolerant; only the
/// summary reports whether notification succeeded. State is persisted
/// regardless of notification outcome so a flaky transport cannot cause
/// repeat alerts forever.
pub async fn run(
    config: &Config,
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
) -> RunSummary {
    info!(
        make = %config.make,
        model = %config.model,
        postcode = %config.postcode,
        radius = config.radius,
        "Searching AutoTrader"
    );

    let listings = fetch_listings(config, fetcher).await;
    let current: HashSet<String> = listings.keys().cloned().collect();

    let seen = state::load(&config.state_file);
    info!(
        previously_seen = seen.len(),
        currently_found = current.len(),
        "Loaded seen set"
    );

    let new_ids = diff::new_listing_ids(&current, &seen);

    let mut ok = true;
    if new_ids.is_empty() {
        info!("No new cars found");
    } else {
        info!(new_cars = new_ids.len(), "Found new cars");

        let messages = format::format_messages(&new_ids, &listings, &config.make, &config.model);
        for (i, message) in messages.iter().enumerate() {
            info!(message = i + 1, total = messages.len(), "Sending notification");
            if let Err(e) = notifier.notify(message).await {
                error!(error = %e, "Notification failed, dropping remaining messages");
                ok = false;
                break;
            }
        }
    }

    // Persist whatever we saw this run, even if notification failed. An
    // empty scrape never wipes the state file.
    if !current.is_empty() {
        state::save(&config.state_file, &current);
    }

    RunSummary {
        ok,
        new_cars_count: new_ids.len(),
        total_count: current.len(),
        previously_seen: seen.len(),
        currently_seen: current.len(),
    }
}

/// Fetch up to [`MAX_PAGES`] result pages and accumulate write-off-filtered
/// listings. Individual page failures are logged and skipped.
async fn fetch_listings(config: &Config, fetcher: &dyn PageFetcher) -> ListingSet {
    let base = search::search_url(config);

    let reported = fetch::discover_pages(fetcher, base.as_str()).await;
    let pages = reported.min(MAX_PAGES);
    info!(reported = reported, fetching = pages, "Pagination discovered");

    let mut listings = ListingSet::new();

    for page in 1..=pages {
        let url = search::page_url(&base, page);
        let html = match fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(page = page, error = %e, "Page fetch failed, continuing with partial results");
                continue;
            }
        };

        for listing in extract::extract_listings(&html) {
            if let Some(keyword) = filter::writeoff_keyword(&listing) {
                info!(keyword = keyword, title = %listing.title, "Excluding write-off");
                continue;
            }
            listings.insert(listing.id.clone(), listing);
        }
    }

    info!(total = listings.len(), "Listings collected");
    listings
}
