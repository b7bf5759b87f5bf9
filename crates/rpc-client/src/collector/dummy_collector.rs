use super::traits::{Collector, CollectorOptions};

use anyhow::Result;
use async_trait::async_trait;
use ckw_types::{Address, Amount, AmountError, Cell, Sudt};

/// Collector over a pre-seeded cell set, evaluated in seed order. Lets tests
/// and bootstrapping flows run every selection operation without a network.
pub struct DummyCollector {
    cells: Vec<Cell>,
}

impl DummyCollector {
    pub fn new(cells: Vec<Cell>) -> Self {
        DummyCollector { cells }
    }

    fn owned_by<'a>(&'a self, address: &Address) -> impl Iterator<Item = &'a Cell> {
        let lock = address.lock_script();
        self.cells.iter().filter(move |cell| cell.lock == lock)
    }
}

#[async_trait]
impl Collector for DummyCollector {
    async fn get_balance(&self, address: &Address) -> Result<Amount> {
        let mut balance = Amount::ZERO;
        for cell in self
            .owned_by(address)
            .filter(|cell| cell.is_plain_capacity())
        {
            balance = balance
                .checked_add(cell.capacity)
                .ok_or(AmountError::Overflow)?;
        }
        Ok(balance)
    }

    async fn collect(&self, address: &Address, options: &CollectorOptions) -> Result<Vec<Cell>> {
        let needed = options.needed_amount()?;
        let mut accumulated = Amount::ZERO;
        let mut selected = Vec::new();
        for cell in self.owned_by(address) {
            if accumulated >= needed {
                break;
            }
            if !cell.is_plain_capacity() {
                continue;
            }
            accumulated = accumulated
                .checked_add(cell.capacity)
                .ok_or(AmountError::Overflow)?;
            selected.push(cell.clone());
        }
        Ok(selected)
    }

    async fn get_sudt_balance(&self, sudt: &Sudt, address: &Address) -> Result<Amount> {
        let type_script = sudt.type_script();
        let mut balance = Amount::ZERO;
        for cell in self
            .owned_by(address)
            .filter(|cell| cell.type_.as_ref() == Some(&type_script))
        {
            balance = balance
                .checked_add(cell.sudt_amount()?)
                .ok_or(AmountError::Overflow)?;
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
        let type_script = sudt.type_script();
        let mut accumulated = Amount::ZERO;
        let mut selected = Vec::new();
        for cell in self
            .owned_by(address)
            .filter(|cell| cell.type_.as_ref() == Some(&type_script))
        {
            if accumulated >= needed {
                break;
            }
            accumulated = accumulated
                .checked_add(cell.sudt_amount()?)
                .ok_or(AmountError::Overflow)?;
            selected.push(cell.clone());
        }
        Ok(selected)
    }
}
