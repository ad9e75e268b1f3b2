use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

/// Trait for page fetching (to allow mocking in tests).
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher backed by a shared reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        // Browser-like User-Agent to avoid bot detection
        let user_agent =
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }
}

/// Parse the total result page count from a search page.
///
/// Looks for the pagination footer and captures its trailing integer. A
/// missing footer or unparsable text means 1 page.
pub fn page_count(html: &str) -> usize {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("li.paginationMini__count") {
        Ok(s) => s,
        Err(_) => return 1,
    };

    let Some(element) = document.select(&selector).next() else {
        info!("Could not find pagination, assuming 1 page");
        return 1;
    };

    let text = element.text().collect::<String>();
    let trailing_int = Regex::new(r"(\d+)\D*$").expect("pagination regex is valid");

    match trailing_int
        .captures(&text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
    {
        Some(pages) => {
            info!(pages = pages, "Found pagination count");
            pages
        }
        None => {
            warn!(text = %text.trim(), "Pagination footer present but unparsable, assuming 1 page");
            1
        }
    }
}

/// Fetch the first search page and discover the page count.
///
/// Any fetch failure here degrades to "assume 1 page" rather than failing
/// the run.
pub async fn discover_pages(fetcher: &dyn PageFetcher, url: &str) -> usize {
    match fetcher.fetch(url).await {
        Ok(html) => page_count(&html),
        Err(e) => {
            warn!(error = %e, "Pagination discovery fetch failed, assuming 1 page");
            1
        }
    }
}
