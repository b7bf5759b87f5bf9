//! Network-facing half of the ckw wallet core: the ckb-indexer JSON-RPC
//! client with its streaming cell-selection protocol, and the collector
//! capability built on top of it.

pub mod collector;
pub mod error;
pub mod indexer_client;
pub mod indexer_types;
pub mod traits;
mod utils;

pub use collector::{Collector, CollectorError, CollectorOptions, DummyCollector, IndexerCollector};
pub use error::IndexerError;
pub use indexer_client::{collect_all_cells, collect_cells, CellDecision, CkbIndexerClient};
