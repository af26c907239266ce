pub(crate) mod aggregation;
pub(crate) mod lookup;

pub use aggregation::Aggregator;
pub use lookup::store_adapters;
