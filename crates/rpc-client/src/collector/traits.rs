use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use ckw_types::{Address, Amount, Cell, Sudt};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectorError {
    #[error("`needed_amount` in options must be provided")]
    MissingNeededAmount,
}

#[derive(Debug, Default, Clone)]
pub struct CollectorOptions {
    pub needed_amount: Option<Amount>,
}

impl CollectorOptions {
    pub fn new(needed_amount: Amount) -> Self {
        CollectorOptions {
            needed_amount: Some(needed_amount),
        }
    }

    /// Selection refuses to run without a target amount; checked before any
    /// network round trip.
    pub fn needed_amount(&self) -> Result<Amount, CollectorError> {
        self.needed_amount
            .ok_or(CollectorError::MissingNeededAmount)
    }
}

/// Balance queries and greedy selection over the two resource kinds a cell
/// can hold: plain capacity and an sUDT balance.
#[async_trait]
pub trait Collector {
    /// Exact shannon sum over every plain-capacity cell guarded by `address`.
    async fn get_balance(&self, address: &Address) -> Result<Amount>;

    /// The minimal prefix, in indexer order, of plain-capacity cells whose
    /// capacities reach `needed_amount`. Cells carrying a type script or any
    /// data are skipped without ending the scan. If the address cannot cover
    /// the amount, every eligible cell is returned.
    async fn collect(&self, address: &Address, options: &CollectorOptions) -> Result<Vec<Cell>>;

    /// Exact sum of decoded balances over every cell of the token guarded by
    /// `address`.
    async fn get_sudt_balance(&self, sudt: &Sudt, address: &Address) -> Result<Amount>;

    /// The minimal prefix, in indexer order, of the token's cells whose
    /// balances reach `needed_amount`.
    async fn collect_sudt(
        &self,
        sudt: &Sudt,
        address: &Address,
        options: &CollectorOptions,
    ) -> Result<Vec<Cell>>;
}
