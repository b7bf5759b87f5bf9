use crate::error::IndexerError;
use crate::indexer_types::{Cell, Order, Pagination, SearchKey, Tip};
use crate::traits::IndexedCells;
use crate::utils::{to_result, DEFAULT_HTTP_TIMEOUT, DEFAULT_QUERY_LIMIT};
use anyhow::Result;
use async_jsonrpc_client::{HttpClient, Params as ClientParams, Transport};
use ckb_jsonrpc_types::{JsonBytes, Uint32};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::instrument;

/// Per-candidate verdict of a terminator: `push` keeps the cell in the
/// result, `stop` ends the scan without fetching further pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellDecision {
    pub stop: bool,
    pub push: bool,
}

#[derive(Clone)]
pub struct CkbIndexerClient(HttpClient);

impl CkbIndexerClient {
    pub fn new(client: HttpClient) -> Self {
        Self(client)
    }

    pub fn with_url(url: &str) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build(url)?;
        Ok(Self::new(client))
    }

    fn client(&self) -> &HttpClient {
        &self.0
    }

    #[instrument(skip_all, fields(method = method))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<ClientParams>,
    ) -> Result<T> {
        let response = self
            .client()
            .request(method, params)
            .await
            .map_err(|err| IndexerError::new(method.to_string(), err))?;
        let response_str = response.to_string();
        match to_result(response) {
            Ok(r) => Ok(r),
            Err(err) => {
                log::error!(
                    "[ckb-indexer-client] failed to parse response, method: {}, response: {}",
                    method,
                    response_str
                );
                Err(err)
            }
        }
    }

    pub async fn get_cells(
        &self,
        search_key: &SearchKey,
        order: &Order,
        limit: Option<Uint32>,
        cursor: &Option<JsonBytes>,
    ) -> Result<Pagination<Cell>> {
        self.request(
            "get_cells",
            Some(ClientParams::Array(vec![
                json!(search_key),
                json!(order),
                json!(limit.unwrap_or_else(|| (DEFAULT_QUERY_LIMIT as u32).into())),
                json!(cursor),
            ])),
        )
        .await
    }

    pub async fn get_tip(&self) -> Result<Option<Tip>> {
        self.request("get_tip", None).await
    }
}

/// Stream candidate cells page by page in indexer order, applying
/// `terminator` to each. `push` keeps the candidate in the result; `stop`
/// ends the scan after the current decision, dropping the rest of the
/// already-fetched page and fetching no further page. A terminator error
/// aborts the whole call, returning no cells.
pub async fn collect_cells<P, F>(
    provider: &P,
    search_key: &SearchKey,
    mut terminator: F,
) -> Result<Vec<Cell>>
where
    P: IndexedCells + Sync,
    F: FnMut(usize, &Cell) -> Result<CellDecision>,
{
    let order = Order::Asc;
    let limit = Uint32::from(DEFAULT_QUERY_LIMIT as u32);
    let mut cursor: Option<JsonBytes> = None;
    let mut cells = Vec::new();
    let mut index = 0usize;

    loop {
        let Pagination {
            objects,
            last_cursor,
        } = provider
            .get_cells(search_key, &order, &limit, cursor)
            .await?;
        log::debug!("fetched {} candidate cells from indexer", objects.len());

        for cell in objects {
            let decision = terminator(index, &cell)?;
            index += 1;
            if decision.push {
                cells.push(cell);
            }
            if decision.stop {
                return Ok(cells);
            }
        }

        if last_cursor.is_empty() {
            return Ok(cells);
        }
        cursor = Some(last_cursor);
    }
}

/// Materialize the full match set; used by balance queries.
pub async fn collect_all_cells<P>(provider: &P, search_key: &SearchKey) -> Result<Vec<Cell>>
where
    P: IndexedCells + Sync,
{
    collect_cells(provider, search_key, |_index, _cell| {
        Ok(CellDecision {
            stop: false,
            push: true,
        })
    })
    .await
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::*;
    use async_trait::async_trait;
    use ckb_jsonrpc_types::{CellOutput, OutPoint as JsonOutPoint, Script as JsonScript};
    use ckb_types::h256;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves pre-split pages of cells; the cursor encodes the next page
    /// index, and the final non-empty page hands out a cursor to an empty
    /// terminal page, the way the real indexer does.
    pub struct PagedCells {
        pub pages: Vec<Vec<Cell>>,
        pub fetches: AtomicUsize,
    }

    impl PagedCells {
        pub fn new(pages: Vec<Vec<Cell>>) -> Self {
            PagedCells {
                pages,
                fetches: AtomicUsize::new(0),
            }
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IndexedCells for PagedCells {
        async fn get_cells(
            &self,
            _search_key: &SearchKey,
            _order: &Order,
            _limit: &Uint32,
            cursor: Option<JsonBytes>,
        ) -> Result<Pagination<Cell>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let page = cursor
                .map(|cursor| cursor.as_bytes()[0] as usize)
                .unwrap_or(0);
            let objects = self.pages.get(page).cloned().unwrap_or_default();
            let last_cursor = if objects.is_empty() {
                JsonBytes::default()
            } else {
                JsonBytes::from_vec(vec![(page + 1) as u8])
            };
            Ok(Pagination {
                objects,
                last_cursor,
            })
        }
    }

    pub fn plain_cell(index: u32, capacity: u64) -> Cell {
        wire_cell(index, capacity, None, Vec::new())
    }

    pub fn wire_cell(
        index: u32,
        capacity: u64,
        type_: Option<JsonScript>,
        data: Vec<u8>,
    ) -> Cell {
        Cell {
            output: CellOutput {
                capacity: capacity.into(),
                lock: JsonScript::default(),
                type_,
            },
            output_data: JsonBytes::from_vec(data),
            out_point: JsonOutPoint {
                tx_hash: h256!("0x79221866125b9aff33c4303a6c35bde25d235e7e10025a86ca2a5d6ad657f51f"),
                index: index.into(),
            },
            block_number: 0u64.into(),
            tx_index: 0u32.into(),
        }
    }
}
