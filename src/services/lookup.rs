use crate::domain::{StoreId, StoreOutcome, StoreResult};
use crate::error::{GameError, Result};
use crate::infrastructure::{PageSession, PageSource, StoreScraper, NAVIGATION_TIMEOUT};
use async_trait::async_trait;
use reqwest::Url;
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, warn};

/// Looks a game up in one store.
#[async_trait]
pub trait StoreLookup: Send + Sync {
    fn store(&self) -> StoreId;

    /// Never fails: problems are logged and reported as [`StoreOutcome::Failed`].
    async fn search(&self, game_name: &str) -> StoreOutcome;
}

/// A store lookup backed by a browsing session per search.
pub struct StoreAdapter {
    source: Arc<dyn PageSource>,
    scraper: Box<dyn StoreScraper>,
}

impl StoreAdapter {
    pub fn new(source: Arc<dyn PageSource>, scraper: Box<dyn StoreScraper>) -> Self {
        Self { source, scraper }
    }

    async fn scrape(
        &self,
        session: &mut dyn PageSession,
        game_name: &str,
    ) -> Result<Option<StoreResult>> {
        let search_url = self.scraper.search_url(game_name);
        let page_url = Url::parse(&search_url).map_err(|e| GameError::Parse(e.to_string()))?;

        session.goto(&search_url, NAVIGATION_TIMEOUT).await?;

        let ready = session
            .wait_for(self.scraper.ready_selector(), self.scraper.ready_timeout())
            .await?;
        if !ready {
            debug!(store = %self.store(), "Results did not render in time, reading page as is");
        }

        let html = session.content().await?;
        Ok(self.extract(&html, &page_url))
    }

    fn extract(&self, html: &str, page_url: &Url) -> Option<StoreResult> {
        let document = Html::parse_document(html);
        self.scraper.extract(&document, page_url)
    }
}

#[async_trait]
impl StoreLookup for StoreAdapter {
    fn store(&self) -> StoreId {
        self.scraper.store()
    }

    async fn search(&self, game_name: &str) -> StoreOutcome {
        let store = self.store();

        let mut session = match self.source.open().await {
            Ok(session) => session,
            Err(e) => {
                warn!(%store, "Failed to open browsing session: {e}");
                return StoreOutcome::Failed(e.to_string());
            }
        };

        let result = self.scrape(session.as_mut(), game_name).await;

        if let Err(e) = session.close().await {
            warn!(%store, "Failed to close browsing session: {e}");
        }

        match result {
            Ok(Some(found)) => StoreOutcome::Found(found),
            Ok(None) => {
                debug!(%store, "No result for '{game_name}'");
                StoreOutcome::NotFound
            }
            Err(e) => {
                warn!(%store, "Scraping error: {e}");
                StoreOutcome::Failed(e.to_string())
            }
        }
    }
}

/// One adapter per store, all sharing `source`.
pub fn store_adapters(source: Arc<dyn PageSource>) -> Result<Vec<Arc<dyn StoreLookup>>> {
    Ok(crate::infrastructure::scrapers::all()?
        .into_iter()
        .map(|scraper| {
            Arc::new(StoreAdapter::new(Arc::clone(&source), scraper)) as Arc<dyn StoreLookup>
        })
        .collect())
}
