pub(crate) mod browser;
pub(crate) mod scrapers;

pub use browser::{
    http::HttpSource, webdriver::WebDriverSource, BrowserProfile, PageSession, PageSource,
    NAVIGATION_TIMEOUT, USER_AGENT,
};
pub use scrapers::StoreScraper;
