//! AutoTrader listing watcher.
//!
//! Single-shot pipeline: fetch search result pages, extract listings, drop
//! write-offs, diff against the persisted seen set, notify via Telegram for
//! anything new, then persist the current set. Designed to be run from cron.

pub mod config;
pub mod diff;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod format;
pub mod run;
pub mod search;
pub mod state;
pub mod types;

pub use config::Config;
pub use run::run;
pub use types::{Listing, ListingSet, RunSummary};
