//! The cell-collection capability. `IndexerCollector` is the production
//! implementation over the remote indexing service; `DummyCollector` runs
//! the same operations over a pre-seeded in-memory cell set.

mod dummy_collector;
mod indexer_collector;
mod traits;

pub use dummy_collector::DummyCollector;
pub use indexer_collector::IndexerCollector;
pub use traits::{Collector, CollectorError, CollectorOptions};
