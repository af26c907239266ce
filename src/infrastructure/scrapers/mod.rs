use crate::domain::StoreId;
use crate::domain::StoreResult;
use crate::error::{GameError, Result};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

pub(crate) mod epic;
pub(crate) mod nintendo;
pub(crate) mod playstation;
pub(crate) mod steam;
pub(crate) mod xbox;

/// How long client-rendered stores get to show their first result.
pub const SETTLE_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Store-specific knowledge needed to turn a search page into a [`StoreResult`].
pub trait StoreScraper: Send + Sync {
    fn store(&self) -> StoreId;

    fn search_url(&self, game_name: &str) -> String;

    /// Selector whose presence means the results have rendered.
    fn ready_selector(&self) -> &str;

    fn ready_timeout(&self) -> Duration {
        SETTLE_TIMEOUT
    }

    /// Reads the first search result. `None` when the page has no result
    /// element, which covers both "no such game" and "markup changed".
    fn extract(&self, document: &Html, page_url: &Url) -> Option<StoreResult>;
}

/// The selectors every store needs.
pub struct Selectors {
    pub first_result: Selector,
    pub title: Selector,
    pub price: Selector,
    pub image: Selector,
}

impl Selectors {
    pub fn new(first_result: &str, title: &str, price: &str) -> Result<Self> {
        Ok(Self {
            first_result: parse_selector(first_result)?,
            title: parse_selector(title)?,
            price: parse_selector(price)?,
            image: parse_selector("img")?,
        })
    }

    pub fn first<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.first_result).next()
    }

    pub fn title(&self, result: ElementRef) -> Option<String> {
        text_of(result, &self.title)
    }

    pub fn price(&self, result: ElementRef) -> Option<String> {
        text_of(result, &self.price)
    }

    pub fn image(&self, result: ElementRef, page_url: &Url) -> Option<String> {
        result
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| absolute_url(page_url, src))
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| GameError::Selector(e.to_string()))
}

/// Trimmed text of the first element matching `selector` inside `scope`.
pub(crate) fn text_of(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

pub(crate) fn absolute_url(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

/// One scraper per store, in store order.
pub fn all() -> Result<Vec<Box<dyn StoreScraper>>> {
    Ok(vec![
        Box::new(steam::SteamScraper::new()?),
        Box::new(epic::EpicScraper::new()?),
        Box::new(playstation::PlayStationScraper::new()?),
        Box::new(xbox::XboxScraper::new()?),
        Box::new(nintendo::NintendoScraper::new()?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapers_cover_every_store_in_order() {
        let stores: Vec<StoreId> = all().unwrap().iter().map(|s| s.store()).collect();
        assert_eq!(stores, StoreId::ALL);
    }

    #[test]
    fn search_urls_percent_encode_the_name() {
        for scraper in all().unwrap() {
            let url = scraper.search_url("Baldur's Gate 3 & more");
            assert!(!url.contains(' '), "{url}");
            assert!(!url.contains("& more"), "{url}");
            assert!(url.contains("Baldur%27s%20Gate%203%20%26%20more"), "{url}");
        }
    }

    #[test]
    fn relative_links_resolve_against_the_page() {
        let base = Url::parse("https://store.playstation.com/en-us/search/hades").unwrap();
        assert_eq!(
            absolute_url(&base, "/en-us/product/UP1").as_deref(),
            Some("https://store.playstation.com/en-us/product/UP1")
        );
        assert_eq!(
            absolute_url(&base, "https://image.api.playstation.com/a.png").as_deref(),
            Some("https://image.api.playstation.com/a.png")
        );
    }

    #[test]
    fn invalid_selector_is_an_error() {
        assert!(matches!(
            Selectors::new("[[", ".title", ".price"),
            Err(GameError::Selector(_))
        ));
    }
}
