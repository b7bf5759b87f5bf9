use thiserror::Error;

/// Transport or RPC failure talking to the indexing service. Raised by
/// `request()` itself; response parse failures surface separately.
#[derive(Error, Debug)]
#[error("indexer rpc error, method: {method} error: {source}")]
pub struct IndexerError {
    pub method: String,
    pub source: anyhow::Error,
}

impl IndexerError {
    pub fn new<E: Into<anyhow::Error>>(method: String, source: E) -> Self {
        IndexerError {
            method,
            source: source.into(),
        }
    }
}
