use super::price::best_price;
use super::store::{StoreId, StoreResult};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Per-store results of one lookup, keyed by store id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreMap {
    pub steam: Option<StoreResult>,
    pub epic: Option<StoreResult>,
    pub playstation: Option<StoreResult>,
    pub xbox: Option<StoreResult>,
    pub nintendo: Option<StoreResult>,
}

impl StoreMap {
    pub fn get(&self, store: StoreId) -> Option<&StoreResult> {
        match store {
            StoreId::Steam => self.steam.as_ref(),
            StoreId::Epic => self.epic.as_ref(),
            StoreId::PlayStation => self.playstation.as_ref(),
            StoreId::Xbox => self.xbox.as_ref(),
            StoreId::Nintendo => self.nintendo.as_ref(),
        }
    }

    pub fn set(&mut self, store: StoreId, result: Option<StoreResult>) {
        let slot = match store {
            StoreId::Steam => &mut self.steam,
            StoreId::Epic => &mut self.epic,
            StoreId::PlayStation => &mut self.playstation,
            StoreId::Xbox => &mut self.xbox,
            StoreId::Nintendo => &mut self.nintendo,
        };
        *slot = result;
    }

    /// Results that were found, in store order.
    pub fn found(&self) -> impl Iterator<Item = &StoreResult> {
        StoreId::ALL.into_iter().filter_map(|store| self.get(store))
    }

    pub fn is_empty(&self) -> bool {
        self.found().next().is_none()
    }
}

/// Fields derived from the found results of a [`StoreMap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub best_price: Option<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
    pub images: Vec<String>,
}

impl Summary {
    pub fn from_stores(stores: &StoreMap) -> Self {
        let best_price = best_price(stores.found().filter_map(|s| s.price.as_deref()));
        let platforms = unique(stores.found().flat_map(|s| s.platforms.iter()));
        let genres = unique(stores.found().flat_map(|s| s.genres.iter()));
        let images = stores
            .found()
            .filter_map(|s| s.image.clone())
            .collect();

        Self {
            best_price,
            platforms,
            genres,
            images,
        }
    }
}

/// Union that keeps the first occurrence of each value.
fn unique<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(value.as_str()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedGame {
    pub name: String,
    pub stores: StoreMap,
    pub best_price: Option<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
    pub images: Vec<String>,
}

impl AggregatedGame {
    pub fn new(name: impl Into<String>, stores: StoreMap) -> Self {
        let summary = Summary::from_stores(&stores);
        Self {
            name: name.into(),
            stores,
            best_price: summary.best_price,
            platforms: summary.platforms,
            genres: summary.genres,
            images: summary.images,
        }
    }
}

/// One entry of a batch response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchGame {
    Found(BatchSummary),
    Failed(BatchFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub name: String,
    pub stores: StoreMap,
    /// Only present when at least one store returned a result.
    #[serde(flatten)]
    pub derived: Option<BatchDerived>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDerived {
    pub best_price: Option<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
    pub image: Option<String>,
}

impl BatchSummary {
    pub fn new(name: impl Into<String>, stores: StoreMap) -> Self {
        let derived = (!stores.is_empty()).then(|| {
            let summary = Summary::from_stores(&stores);
            BatchDerived {
                best_price: summary.best_price,
                platforms: summary.platforms,
                genres: summary.genres,
                image: summary.images.into_iter().next(),
            }
        });

        Self {
            name: name.into(),
            stores,
            derived,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFailure {
    /// The entry exactly as it was submitted, which may not be a string.
    pub name: Value,
    pub error: String,
    pub stores: Map<String, Value>,
}

impl BatchFailure {
    pub fn new(name: Value, error: impl Into<String>) -> Self {
        Self {
            name,
            error: error.into(),
            stores: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResponse {
    pub games: Vec<BatchGame>,
    pub total: usize,
}

impl BatchResponse {
    pub fn new(games: Vec<BatchGame>) -> Self {
        let total = games.len();
        Self { games, total }
    }
}
