#![warn(unreachable_pub)]
#![warn(dead_code)]

pub mod analytics;
pub mod autocomplete;
pub mod cli;
pub mod engine;
pub mod error;
pub mod existence;
pub mod recommend;
pub mod routes;
pub mod search;
pub mod server;
pub mod store;
pub mod tracing;
pub mod types;

// Re-export common types
pub use analytics::SearchAnalytics;
pub use autocomplete::AutocompleteTrie;
pub use engine::{AnalyticsReport, Engine, EngineConfig, SearchFilters, SearchResponse};
pub use error::{EngineError, Result};
pub use existence::ExistenceFilter;
pub use recommend::{Recommendation, RecommendEngine};
pub use search::InvertedIndex;
pub use store::ProductStore;
pub use types::{PriceBucket, Product, SearchHit};
