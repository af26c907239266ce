use super::{Selectors, StoreScraper};
use crate::domain::price::normalize_price;
use crate::domain::{StoreId, StoreResult};
use crate::error::Result;
use reqwest::Url;
use scraper::Html;

const STORE_ORIGIN: &str = "https://store.epicgames.com";
const FIRST_RESULT: &str = r#"[data-component="CardGridDesktopBase"] a"#;

pub struct EpicScraper {
    selectors: Selectors,
}

impl EpicScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: Selectors::new(
                FIRST_RESULT,
                r#"[data-component="Message"]"#,
                r#"[data-component="PriceLayout"]"#,
            )?,
        })
    }
}

impl StoreScraper for EpicScraper {
    fn store(&self) -> StoreId {
        StoreId::Epic
    }

    fn search_url(&self, game_name: &str) -> String {
        format!(
            "{STORE_ORIGIN}/en-US/browse?q={}&sortBy=relevancy&sortDir=DESC",
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
            platforms: vec!["PC".to_string()],
            genres: Vec::new(),
            // Card links are site-relative paths like "/en-US/p/hades".
            url: result
                .value()
                .attr("href")
                .map(|href| format!("{STORE_ORIGIN}{href}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://store.epicgames.com/en-US/browse?q=Hades").unwrap()
    }

    #[test]
    fn extracts_first_card() {
        let page = r#"
            <section data-component="CardGridDesktopBase">
              <ul>
                <li>
                  <a href="/en-US/p/hades">
                    <img src="https://cdn1.epicgames.com/hades-tall.jpg" alt="">
                    <div data-component="Message">Hades</div>
                    <div data-component="PriceLayout"><span>$24.99</span></div>
                  </a>
                </li>
                <li><a href="/en-US/p/hades-ii"><div data-component="Message">Hades II</div></a></li>
              </ul>
            </section>
        "#;
        let scraper = EpicScraper::new().unwrap();
        let result = scraper
            .extract(&Html::parse_document(page), &page_url())
            .unwrap();

        assert_eq!(result.name.as_deref(), Some("Hades"));
        assert_eq!(result.price.as_deref(), Some("$24.99"));
        assert_eq!(result.discount, None);
        assert_eq!(
            result.image.as_deref(),
            Some("https://cdn1.epicgames.com/hades-tall.jpg")
        );
        assert_eq!(result.platforms, ["PC"]);
        assert_eq!(
            result.url.as_deref(),
            Some("https://store.epicgames.com/en-US/p/hades")
        );
    }

    #[test]
    fn free_games_report_free() {
        let page = r#"
            <div data-component="CardGridDesktopBase">
              <a href="/en-US/p/fortnite">
                <div data-component="Message">Fortnite</div>
                <div data-component="PriceLayout">Free</div>
              </a>
            </div>
        "#;
        let scraper = EpicScraper::new().unwrap();
        let result = scraper
            .extract(&Html::parse_document(page), &page_url())
            .unwrap();
        assert_eq!(result.price.as_deref(), Some("Free"));
    }

    #[test]
    fn no_cards_yield_nothing() {
        let scraper = EpicScraper::new().unwrap();
        let document = Html::parse_document("<main><p>No results found</p></main>");
        assert_eq!(scraper.extract(&document, &page_url()), None);
    }
}
