mod game;
pub(crate) mod price;
mod store;

pub use game::{AggregatedGame, BatchFailure, BatchGame, BatchResponse, BatchSummary, StoreMap};
pub use store::{StoreId, StoreOutcome, StoreResult};
