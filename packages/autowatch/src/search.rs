use url::Url;

use crate::config::Config;

const SEARCH_BASE: &str = "https://www.autotrader.co.uk/car-search";

/// Build the base search URL with the fixed filter criteria:
/// year 2020+, under £15,000, under 80k miles, automatic, no write-offs.
///
/// The final `page` parameter is left empty; callers append the page number
/// per fetch.
pub fn search_url(config: &Config) -> Url {
    let mut url = Url::parse(SEARCH_BASE).expect("base search URL is valid");

    url.query_pairs_mut()
        .append_pair("sort", "sponsored")
        .append_pair("radius", &config.radius.to_string())
        .append_pair("postcode", &config.postcode)
        .append_pair("onesearchad", "Used")
        .append_pair("onesearchad", "Nearly New")
        .append_pair("onesearchad", "New")
        .append_pair("make", &config.make)
        .append_pair("model", &config.model)
        .append_pair("year-from", "2020")
        .append_pair("price-to", "15000")
        .append_pair("maximum-mileage", "80000")
        .append_pair("transmission", "Automatic")
        .append_pair("exclude-writeoff-categories", "on")
        .append_pair("page", "");

    url
}

/// URL for one specific result page: the base URL with the page number
/// appended to the trailing empty `page=` slot.
pub fn page_url(base: &Url, page: usize) -> String {
    format!("{}{}", base, page)
}
