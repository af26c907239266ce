use super::lookup::StoreLookup;
use crate::domain::{
    AggregatedGame, BatchFailure, BatchGame, BatchResponse, BatchSummary, StoreMap,
};
use crate::error::{GameError, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// Pause between games of a batch, to go easy on the stores.
pub const BATCH_DELAY: Duration = Duration::from_millis(1_000);

/// Fans a game name out to every store and merges what comes back.
#[derive(Clone)]
pub struct Aggregator {
    lookups: Arc<Vec<Arc<dyn StoreLookup>>>,
}

impl Aggregator {
    pub fn new(lookups: Vec<Arc<dyn StoreLookup>>) -> Self {
        Self {
            lookups: Arc::new(lookups),
        }
    }

    pub async fn search(&self, game_name: &str) -> Result<AggregatedGame> {
        let game_name = validate_name(game_name)?;
        info!("Searching for: {game_name}");

        let stores = self.fan_out(game_name).await;
        Ok(AggregatedGame::new(game_name, stores))
    }

    /// Searches each entry in turn. An entry that fails is reported in place
    /// and does not stop the rest of the batch.
    pub async fn batch_search(&self, games: &[Value]) -> BatchResponse {
        info!("Batch searching {} games", games.len());

        let mut results = Vec::with_capacity(games.len());
        for (i, entry) in games.iter().enumerate() {
            let game = match self.batch_entry(entry).await {
                Ok(summary) => BatchGame::Found(summary),
                Err(e) => {
                    error!("Error searching {entry}: {e}");
                    BatchGame::Failed(BatchFailure::new(entry.clone(), e.to_string()))
                }
            };
            results.push(game);

            if i + 1 < games.len() {
                sleep(BATCH_DELAY).await;
            }
        }

        BatchResponse::new(results)
    }

    async fn batch_entry(&self, entry: &Value) -> Result<BatchSummary> {
        let game_name = entry
            .as_str()
            .ok_or_else(|| GameError::InvalidInput("game name must be a string".to_string()))
            .and_then(validate_name)?;

        let stores = self.fan_out(game_name).await;
        Ok(BatchSummary::new(game_name, stores))
    }

    /// Runs every lookup as its own task and waits for all of them. A task
    /// that panics only loses its own store.
    async fn fan_out(&self, game_name: &str) -> StoreMap {
        let tasks: Vec<_> = self
            .lookups
            .iter()
            .map(|lookup| {
                let lookup = Arc::clone(lookup);
                let game_name = game_name.to_string();
                let store = lookup.store();
                (store, tokio::spawn(async move { lookup.search(&game_name).await }))
            })
            .collect();

        let mut stores = StoreMap::default();
        for (store, task) in tasks {
            let result = match task.await {
                Ok(outcome) => outcome.into_result(),
                Err(e) => {
                    warn!(%store, "Lookup task failed: {e}");
                    None
                }
            };
            stores.set(store, result);
        }
        stores
    }
}

fn validate_name(game_name: &str) -> Result<&str> {
    if game_name.trim().is_empty() {
        return Err(GameError::InvalidInput(
            "game name must not be empty".to_string(),
        ));
    }
    Ok(game_name)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{StoreId, StoreOutcome, StoreResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;

    /// Answers from a table of game name to price, and panics on "boom".
    pub(crate) struct FakeLookup {
        pub store: StoreId,
        pub prices: HashMap<&'static str, &'static str>,
    }

    impl FakeLookup {
        pub(crate) fn arc(
            store: StoreId,
            prices: &[(&'static str, &'static str)],
        ) -> Arc<dyn StoreLookup> {
            Arc::new(Self {
                store,
                prices: prices.iter().copied().collect(),
            })
        }
    }

    #[async_trait]
    impl StoreLookup for FakeLookup {
        fn store(&self) -> StoreId {
            self.store
        }

        async fn search(&self, game_name: &str) -> StoreOutcome {
            if game_name == "boom" {
                panic!("lookup crashed");
            }
            match self.prices.get(game_name) {
                Some(price) => StoreOutcome::Found(StoreResult {
                    name: Some(game_name.to_string()),
                    price: Some(price.to_string()),
                    discount: None,
                    image: Some(format!("https://{}/{game_name}.jpg", self.store)),
                    platforms: vec![self.store.to_string()],
                    genres: Vec::new(),
                    url: None,
                }),
                None => StoreOutcome::Failed("layout changed".to_string()),
            }
        }
    }

    /// Takes a second to answer, every store with the same price.
    struct SlowLookup {
        store: StoreId,
    }

    #[async_trait]
    impl StoreLookup for SlowLookup {
        fn store(&self) -> StoreId {
            self.store
        }

        async fn search(&self, game_name: &str) -> StoreOutcome {
            sleep(Duration::from_secs(1)).await;
            StoreOutcome::Found(StoreResult {
                name: Some(game_name.to_string()),
                price: Some("$9.99".to_string()),
                discount: None,
                image: None,
                platforms: vec![self.store.to_string()],
                genres: Vec::new(),
                url: None,
            })
        }
    }

    pub(crate) fn aggregator() -> Aggregator {
        Aggregator::new(vec![
            FakeLookup::arc(StoreId::Steam, &[("Hades", "$19.99"), ("B", "$5.00")]),
            FakeLookup::arc(StoreId::Epic, &[("Hades", "$24.99"), ("B", "Free")]),
            FakeLookup::arc(StoreId::PlayStation, &[]),
            FakeLookup::arc(StoreId::Xbox, &[("Hades", "N/A")]),
            FakeLookup::arc(StoreId::Nintendo, &[]),
        ])
    }

    #[tokio::test]
    async fn single_search_merges_all_stores() {
        let game = aggregator().search("Hades").await.unwrap();

        assert_eq!(game.name, "Hades");
        assert_eq!(game.best_price.as_deref(), Some("$19.99"));
        assert_eq!(game.platforms, ["steam", "epic", "xbox"]);
        assert!(game.genres.is_empty());
        assert_eq!(
            game.images,
            [
                "https://steam/Hades.jpg",
                "https://epic/Hades.jpg",
                "https://xbox/Hades.jpg"
            ]
        );
        assert!(game.stores.playstation.is_none());
        assert!(game.stores.nintendo.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stores_are_searched_concurrently() {
        let aggregator = Aggregator::new(
            StoreId::ALL
                .into_iter()
                .map(|store| Arc::new(SlowLookup { store }) as Arc<dyn StoreLookup>)
                .collect(),
        );
        let started = tokio::time::Instant::now();

        let game = aggregator.search("Celeste").await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed < Duration::from_secs(2), "{elapsed:?}");
        assert_eq!(game.stores.found().count(), 5);
        assert_eq!(game.platforms.len(), 5);
    }

    #[tokio::test]
    async fn every_store_failing_still_aggregates() {
        let game = aggregator().search("Unknown").await.unwrap();

        assert!(game.stores.is_empty());
        assert_eq!(game.best_price, None);
        assert!(game.platforms.is_empty());
        assert!(game.images.is_empty());
    }

    #[tokio::test]
    async fn panicking_lookups_become_null() {
        let game = aggregator().search("boom").await.unwrap();
        assert!(game.stores.is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let err = aggregator().search("   ").await.unwrap_err();
        assert!(matches!(err, GameError::InvalidInput(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn batch_reports_failures_inline_and_continues() {
        let started = tokio::time::Instant::now();

        let response = aggregator().batch_search(&[json!(null), json!("B")]).await;

        assert_eq!(response.total, 2);
        assert!(matches!(&response.games[0], BatchGame::Failed(f) if f.name == Value::Null));
        let BatchGame::Found(b) = &response.games[1] else {
            panic!("second game should succeed");
        };
        assert!(b.stores.steam.is_some());
        let derived = b.derived.as_ref().unwrap();
        assert_eq!(derived.best_price.as_deref(), Some("$5.00"));
        assert_eq!(derived.image.as_deref(), Some("https://steam/B.jpg"));

        // One pause between the two games, none after the last.
        let elapsed = started.elapsed();
        assert!(elapsed >= BATCH_DELAY && elapsed < BATCH_DELAY * 2, "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn batch_serializes_error_entries() {
        let response = aggregator().batch_search(&[json!(""), json!("Hades")]).await;
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["total"], json!(2));
        assert_eq!(value["games"][0]["name"], json!(""));
        assert_eq!(value["games"][0]["stores"], json!({}));
        assert!(value["games"][0]["error"].is_string());
        assert_eq!(value["games"][1]["bestPrice"], json!("$19.99"));
        assert!(value["games"][1].get("error").is_none());
    }
}
