use super::{Selectors, StoreScraper};
use crate::domain::price::normalize_price;
use crate::domain::{StoreId, StoreResult};
use crate::error::Result;
use reqwest::Url;
use scraper::Html;

const FIRST_RESULT: &str = ".coveo-result-frame";

pub struct NintendoScraper {
    selectors: Selectors,
}

impl NintendoScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new(FIRST_RESULT, ".coveo-title", ".coveo-result-cell.price")?,
        })
    }
}

impl StoreScraper for NintendoScraper {
    fn store(&self) -> StoreId {
        StoreId::Nintendo
    }

    // The query lives in the fragment; the results are rendered client-side.
    fn search_url(&self, game_name: &str) -> String {
        format!(
            "https://www.nintendo.com/us/search/#q={}",
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
            platforms: vec!["Nintendo Switch".to_string()],
            genres: Vec::new(),
            url: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://www.nintendo.com/us/search/#q=Hades").unwrap()
    }

    #[test]
    fn extracts_first_frame() {
        let page = r#"
            <div class="coveo-result-list">
              <div class="coveo-result-frame">
                <img src="/content/dam/hades-switch.jpg">
                <a class="coveo-title">Hades</a>
                <div class="coveo-result-cell price">$24.99</div>
              </div>
              <div class="coveo-result-frame"><a class="coveo-title">Other</a></div>
            </div>
        "#;
        let scraper = NintendoScraper::new().unwrap();
        let result = scraper
            .extract(&Html::parse_document(page), &page_url())
            .unwrap();

        assert_eq!(result.name.as_deref(), Some("Hades"));
        assert_eq!(result.price.as_deref(), Some("$24.99"));
        assert_eq!(
            result.image.as_deref(),
            Some("https://www.nintendo.com/content/dam/hades-switch.jpg")
        );
        assert_eq!(result.platforms, ["Nintendo Switch"]);
        assert_eq!(result.url, None);
    }

    #[test]
    fn price_cell_needs_both_classes() {
        let page = r#"
            <div class="coveo-result-frame">
              <a class="coveo-title">Hades</a>
              <div class="price">$24.99</div>
            </div>
        "#;
        let scraper = NintendoScraper::new().unwrap();
        let result = scraper
            .extract(&Html::parse_document(page), &page_url())
            .unwrap();
        assert_eq!(result.price.as_deref(), Some("N/A"));
    }
}
