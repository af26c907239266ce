use super::{BrowserProfile, PageSession, PageSource};
use crate::error::{GameError, Result};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use thirtyfour::extensions::cdp::ChromeDevTools;
use thirtyfour::prelude::*;
use thirtyfour::{CapabilitiesHelper, ChromeCapabilities, PageLoadStrategy};
use tracing::{debug, warn};

const STEALTH_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => false });";
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Headless Chrome driven through a WebDriver endpoint (chromedriver).
pub struct WebDriverSource {
    server_url: String,
    profile: BrowserProfile,
}

impl WebDriverSource {
    pub fn new(server_url: impl Into<String>, profile: BrowserProfile) -> Self {
        Self {
            server_url: server_url.into(),
            profile,
        }
    }

    fn capabilities(&self) -> Result<ChromeCapabilities> {
        let mut caps = DesiredCapabilities::chrome();
        for arg in self.profile.launch_args() {
            caps.add_chrome_arg(&arg)?;
        }
        caps.add_chrome_option("excludeSwitches", ["enable-automation"])?;
        // Navigation returns at DOMContentLoaded; readiness is handled by `wait_for`.
        caps.add("pageLoadStrategy", PageLoadStrategy::Eager)?;
        Ok(caps)
    }
}

#[async_trait]
impl PageSource for WebDriverSource {
    async fn open(&self) -> Result<Box<dyn PageSession>> {
        let driver = WebDriver::new(&self.server_url, self.capabilities()?).await?;

        if let Err(e) = disguise(&driver, &self.profile).await {
            if let Err(quit_err) = driver.quit().await {
                warn!("Failed to quit browser after setup error: {quit_err}");
            }
            return Err(e);
        }

        Ok(Box::new(WebDriverSession {
            driver: Some(driver),
        }))
    }
}

/// Hides the automation flag and pins locale and timezone for every page the
/// session loads.
async fn disguise(driver: &WebDriver, profile: &BrowserProfile) -> Result<()> {
    let dev_tools = ChromeDevTools::new(driver.handle.clone());
    dev_tools
        .execute_cdp_with_params(
            "Page.addScriptToEvaluateOnNewDocument",
            json!({ "source": STEALTH_SCRIPT }),
        )
        .await?;
    dev_tools
        .execute_cdp_with_params(
            "Emulation.setTimezoneOverride",
            json!({ "timezoneId": profile.timezone }),
        )
        .await?;
    dev_tools
        .execute_cdp_with_params(
            "Emulation.setLocaleOverride",
            json!({ "locale": profile.locale }),
        )
        .await?;
    Ok(())
}

struct WebDriverSession {
    driver: Option<WebDriver>,
}

impl WebDriverSession {
    fn driver(&self) -> Result<&WebDriver> {
        self.driver
            .as_ref()
            .ok_or_else(|| GameError::Other("browser session already closed".to_string()))
    }
}

#[async_trait]
impl PageSession for WebDriverSession {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()> {
        let driver = self.driver()?;
        driver.set_page_load_timeout(timeout).await?;
        driver.goto(url).await?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool> {
        let found = self
            .driver()?
            .query(By::Css(selector))
            .wait(timeout, POLL_INTERVAL)
            .exists()
            .await?;
        if !found {
            debug!("'{selector}' did not appear within {timeout:?}");
        }
        Ok(found)
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.driver()?.source().await?)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(driver) = self.driver.take() {
            driver.quit().await?;
        }
        Ok(())
    }
}
