use super::{PageSession, PageSource};
use crate::error::{GameError, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

/// Fetches pages over plain HTTP without running any scripts.
///
/// Only stores that render their search results server-side (Steam) produce
/// anything useful through it, but it needs no browser installed.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn open(&self) -> Result<Box<dyn PageSession>> {
        Ok(Box::new(HttpSession {
            client: self.client.clone(),
            body: None,
        }))
    }
}

struct HttpSession {
    client: Client,
    body: Option<String>,
}

impl HttpSession {
    fn body(&self) -> Result<&str> {
        self.body
            .as_deref()
            .ok_or_else(|| GameError::Other("no page loaded".to_string()))
    }
}

#[async_trait]
impl PageSession for HttpSession {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        self.body = Some(response.text().await?);
        Ok(())
    }

    // A static page never changes after loading, so there is nothing to wait for.
    async fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<bool> {
        let selector =
            Selector::parse(selector).map_err(|e| GameError::Selector(e.to_string()))?;
        let document = Html::parse_document(self.body()?);
        let found = document.select(&selector).next().is_some();
        Ok(found)
    }

    async fn content(&mut self) -> Result<String> {
        Ok(self.body()?.to_string())
    }

    async fn close(&mut self) -> Result<()> {
        self.body = None;
        Ok(())
    }
}
