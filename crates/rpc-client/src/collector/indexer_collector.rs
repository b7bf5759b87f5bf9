use super::traits::{Collector, CollectorOptions};

use crate::indexer_client::{collect_all_cells, collect_cells, CellDecision, CkbIndexerClient};
use crate::indexer_types::{self, SearchKey, SearchKeyFilter};
use anyhow::Result;
use async_trait::async_trait;
use ckw_types::{Address, Amount, AmountError, Cell, Sudt};

/// Production collector, backed by the remote indexing service.
pub struct IndexerCollector {
    indexer: CkbIndexerClient,
}

impl IndexerCollector {
    pub fn new(indexer: CkbIndexerClient) -> Self {
        IndexerCollector { indexer }
    }

    pub fn with_url(url: &str) -> Result<Self> {
        Ok(IndexerCollector::new(CkbIndexerClient::with_url(url)?))
    }
}

/// Cells guarded by the address' lock that carry no data. The type script
/// check stays client side.
fn capacity_search_key(address: &Address) -> SearchKey {
    SearchKey::with_lock(address.lock_script()).with_filter(Some(SearchKeyFilter {
        output_data_len_range: Some([0u64.into(), 1u64.into()]),
        ..Default::default()
    }))
}

/// Cells guarded by the address' lock whose type script is the token's.
fn sudt_search_key(sudt: &Sudt, address: &Address) -> SearchKey {
    SearchKey::with_lock(address.lock_script()).with_filter(Some(SearchKeyFilter {
        script: Some(sudt.type_script().into()),
        ..Default::default()
    }))
}

/// Decide one plain-capacity candidate. A cell carrying a type script or any
/// data must never be spent by capacity selection, so it is excluded without
/// ending the scan.
pub(crate) fn capacity_decision(
    accumulated: Amount,
    needed: Amount,
    cell: &indexer_types::Cell,
) -> Result<(CellDecision, Amount)> {
    if accumulated >= needed {
        return Ok((
            CellDecision {
                stop: true,
                push: false,
            },
            accumulated,
        ));
    }
    if cell.output.type_.is_some() || !cell.output_data.is_empty() {
        return Ok((
            CellDecision {
                stop: false,
                push: false,
            },
            accumulated,
        ));
    }
    let capacity = Amount::from(cell.output.capacity.value());
    let accumulated = accumulated
        .checked_add(capacity)
        .ok_or(AmountError::Overflow)?;
    Ok((
        CellDecision {
            stop: false,
            push: true,
        },
        accumulated,
    ))
}

/// Decide one sUDT candidate. The search key already filters on the type
/// script, so every candidate counts.
pub(crate) fn sudt_decision(
    accumulated: Amount,
    needed: Amount,
    cell: &indexer_types::Cell,
) -> Result<(CellDecision, Amount)> {
    if accumulated >= needed {
        return Ok((
            CellDecision {
                stop: true,
                push: false,
            },
            accumulated,
        ));
    }
    let amount = Amount::from_uint128_le(cell.output_data.as_bytes())?;
    let accumulated = accumulated
        .checked_add(amount)
        .ok_or(AmountError::Overflow)?;
    Ok((
        CellDecision {
            stop: false,
            push: true,
        },
        accumulated,
    ))
}

#[async_trait]
impl Collector for IndexerCollector {
    async fn get_balance(&self, address: &Address) -> Result<Amount> {
        let search_key = capacity_search_key(address);
        let cells = collect_all_cells(&self.indexer, &search_key).await?;
        let mut balance = Amount::ZERO;
        for cell in cells.iter().filter(|cell| cell.output.type_.is_none()) {
            let capacity = Amount::from(cell.output.capacity.value());
            balance = balance
                .checked_add(capacity)
                .ok_or(AmountError::Overflow)?;
        }
        Ok(balance)
    }

    async fn collect(&self, address: &Address, options: &CollectorOptions) -> Result<Vec<Cell>> {
        let needed = options.needed_amount()?;
        let search_key = capacity_search_key(address);
        let mut accumulated = Amount::ZERO;
        let cells = collect_cells(&self.indexer, &search_key, |_index, cell| {
            let (decision, next) = capacity_decision(accumulated, needed, cell)?;
            accumulated = next;
            Ok(decision)
        })
        .await?;
        Ok(cells
            .into_iter()
            .map(indexer_types::Cell::into_cell)
            .collect())
    }

    async fn get_sudt_balance(&self, sudt: &Sudt, address: &Address) -> Result<Amount> {
        let search_key = sudt_search_key(sudt, address);
        let cells = collect_all_cells(&self.indexer, &search_key).await?;
        let mut balance = Amount::ZERO;
        for cell in &cells {
            let amount = Amount::from_uint128_le(cell.output_data.as_bytes())?;
            balance = balance.checked_add(amount).ok_or(AmountError::Overflow)?;
        }
        Ok(balance)
    }

    async fn collect_sudt(
        &self,
        sudt: &Sudt,
        address: &Address,
        options: &CollectorOptions,
    ) -> Result<Vec<Cell>> {
        let needed = options.needed_amount()?;
        let search_key = sudt_search_key(sudt, address);
        let mut accumulated = Amount::ZERO;
        let cells = collect_cells(&self.indexer, &search_key, |_index, cell| {
            let (decision, next) = sudt_decision(accumulated, needed, cell)?;
            accumulated = next;
            Ok(decision)
        })
        .await?;
        Ok(cells
            .into_iter()
            .map(indexer_types::Cell::into_cell)
            .collect())
    }
}
