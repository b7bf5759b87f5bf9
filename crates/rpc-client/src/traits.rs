use crate::indexer_client::CkbIndexerClient;
use crate::indexer_types::{Cell, Order, Pagination, SearchKey};

use anyhow::Result;
use async_jsonrpc_client::Params;
use async_trait::async_trait;
use ckb_jsonrpc_types::{JsonBytes, Uint32};
use serde_json::json;

/// Paged access to an indexed cell set. The RPC client implements it over
/// the wire; tests implement it over in-memory pages.
#[async_trait]
pub trait IndexedCells {
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        order: &Order,
        limit: &Uint32,
        cursor: Option<JsonBytes>,
    ) -> Result<Pagination<Cell>>;
}

#[async_trait]
impl IndexedCells for CkbIndexerClient {
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        order: &Order,
        limit: &Uint32,
        cursor: Option<JsonBytes>,
    ) -> Result<Pagination<Cell>> {
        self.request(
            "get_cells",
            Some(Params::Array(vec![
                json!(search_key),
                json!(order),
                json!(limit),
                json!(cursor),
            ])),
        )
        .await
    }
}
