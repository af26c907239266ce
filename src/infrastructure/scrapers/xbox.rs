use super::{Selectors, StoreScraper};
use crate::domain::price::normalize_price;
use crate::domain::{StoreId, StoreResult};
use crate::error::Result;
use reqwest::Url;
use scraper::Html;

const FIRST_RESULT: &str = ".ProductCard";

pub struct XboxScraper {
    selectors: Selectors,
}

impl XboxScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new(FIRST_RESULT, ".ProductCard-title", ".ProductCard-price")?,
        })
    }
}

impl StoreScraper for XboxScraper {
    fn store(&self) -> StoreId {
        StoreId::Xbox
    }

    fn search_url(&self, game_name: &str) -> String {
        format!(
            "https://www.xbox.com/en-us/search?q={}",
            urlencoding::encode(game_name)
        )
    }

    fn ready_selector(&self) -> &str {
        FIRST_RESULT
    }

    fn extract(&self, document: &Html, page_url: &Url) -> Option<StoreResult> {
        let result = self.selectors.first(document)?;

        Some(StoreResult {
            name: self.selectors.title(result),
            price: Some(normalize_price(self.selectors.price(result))),
            discount: None,
            image: self.selectors.image(result, page_url),
            platforms: vec!["Xbox".to_string()],
            genres: Vec::new(),
            url: None,
        })
    }
}
