use serde::Serialize;
use std::fmt;

/// The storefronts a game is looked up in, in the order results are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreId {
    Steam,
    Epic,
    PlayStation,
    Xbox,
    Nintendo,
}

impl StoreId {
    pub const ALL: [StoreId; 5] = [
        StoreId::Steam,
        StoreId::Epic,
        StoreId::PlayStation,
        StoreId::Xbox,
        StoreId::Nintendo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreId::Steam => "steam",
            StoreId::Epic => "epic",
            StoreId::PlayStation => "playstation",
            StoreId::Xbox => "xbox",
            StoreId::Nintendo => "nintendo",
        }
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First search hit scraped from a single store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreResult {
    pub name: Option<String>,
    pub price: Option<String>,
    pub discount: Option<String>,
    pub image: Option<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
    pub url: Option<String>,
}

/// What a single store lookup ended with.
///
/// Callers of the HTTP API only ever see `Found` as a result and the other two
/// as `null`, but keeping them apart makes the logs useful when a store
/// changes its markup.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Found(StoreResult),
    NotFound,
    Failed(String),
}

impl StoreOutcome {
    pub fn into_result(self) -> Option<StoreResult> {
        match self {
            StoreOutcome::Found(result) => Some(result),
            StoreOutcome::NotFound | StoreOutcome::Failed(_) => None,
        }
    }
}
