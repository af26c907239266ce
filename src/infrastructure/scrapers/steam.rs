use super::{absolute_url, parse_selector, StoreScraper, Selectors};
use crate::domain::price::normalize_price;
use crate::domain::{StoreId, StoreResult};
use crate::error::Result;
use reqwest::Url;
use scraper::{Html, Selector};
use std::time::Duration;

const RESULTS_SELECTOR: &str = "#search_resultsRows";
const RESULTS_TIMEOUT: Duration = Duration::from_millis(10_000);

pub struct SteamScraper {
    selectors: Selectors,
    discount: Selector,
    platforms: Vec<(Selector, &'static str)>,
}

impl SteamScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new(
                "#search_resultsRows > a",
                ".title",
                ".discount_final_price, .search_price",
            )?,
            discount: parse_selector(".discount_pct")?,
            platforms: vec![
                (parse_selector(".platform_img.win")?, "Windows"),
                (parse_selector(".platform_img.mac")?, "Mac"),
                (parse_selector(".platform_img.linux")?, "Linux"),
            ],
        })
    }
}

impl StoreScraper for SteamScraper {
    fn store(&self) -> StoreId {
        StoreId::Steam
    }

    fn search_url(&self, game_name: &str) -> String {
        format!(
            "https://store.steampowered.com/search/?term={}",
            urlencoding::encode(game_name)
        )
    }

    fn ready_selector(&self) -> &str {
        RESULTS_SELECTOR
    }

    fn ready_timeout(&self) -> Duration {
        RESULTS_TIMEOUT
    }

    fn extract(&self, document: &Html, page_url: &Url) -> Option<StoreResult> {
        let result = self.selectors.first(document)?;

        // "-33%" -> "33"
        let discount = super::text_of(result, &self.discount)
            .map(|pct| pct.chars().filter(char::is_ascii_digit).collect::<String>())
            .filter(|pct| !pct.is_empty());

        let platforms = self
            .platforms
            .iter()
            .filter(|(selector, _)| result.select(selector).next().is_some())
            .map(|(_, name)| name.to_string())
            .collect();

        Some(StoreResult {
            name: self.selectors.title(result),
            price: Some(normalize_price(self.selectors.price(result))),
            discount,
            image: self.selectors.image(result, page_url),
            platforms,
            genres: Vec::new(),
            url: result
                .value()
                .attr("href")
                .and_then(|href| absolute_url(page_url, href)),
        })
    }
}
