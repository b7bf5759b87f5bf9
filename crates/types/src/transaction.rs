use std::collections::HashSet;

use ckb_hash::blake2b_256;
use ckb_types::{bytes::Bytes, packed, prelude::*, H256};
use thiserror::Error;

use crate::amount::Amount;
use crate::cell::{Cell, CellDep, OutPoint};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("transaction has no inputs")]
    EmptyInputs,

    #[error("transaction has no outputs")]
    EmptyOutputs,

    #[error("input cell has no out point")]
    UnresolvedInput,

    #[error("duplicated input out point {0:?}")]
    DuplicatedInput(OutPoint),

    #[error("duplicated cell dep on {0:?}")]
    DuplicatedCellDep(OutPoint),

    #[error("capacity {0:#} exceeds the 64-bit capacity field")]
    CapacityOverflow(Amount),
}

/// The unsigned body of a transaction: inputs consumed by reference, outputs
/// created by value, and the cell deps verification needs. Construct it once
/// from a finalized set; `validate` and `hash` are pure reads.
#[derive(Debug, Clone)]
pub struct RawTransaction {
    pub version: u32,
    pub cell_deps: Vec<CellDep>,
    pub header_deps: Vec<H256>,
    pub inputs: Vec<Cell>,
    pub outputs: Vec<Cell>,
    /// Placeholder until the signing flow fills witnesses in. Never part of
    /// the transaction hash.
    pub witnesses: Vec<Bytes>,
}

impl RawTransaction {
    pub fn new(inputs: Vec<Cell>, outputs: Vec<Cell>, cell_deps: Vec<CellDep>) -> RawTransaction {
        RawTransaction {
            version: 0,
            cell_deps,
            header_deps: Vec::new(),
            inputs,
            outputs,
            witnesses: Vec::new(),
        }
    }

    /// Check the structural invariants, naming the violated one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inputs.is_empty() {
            return Err(ValidationError::EmptyInputs);
        }
        if self.outputs.is_empty() {
            return Err(ValidationError::EmptyOutputs);
        }

        let mut seen_inputs = HashSet::new();
        for cell in &self.inputs {
            let out_point = cell
                .out_point
                .as_ref()
                .ok_or(ValidationError::UnresolvedInput)?;
            if !seen_inputs.insert(out_point) {
                return Err(ValidationError::DuplicatedInput(out_point.clone()));
            }
        }

        let mut seen_deps = HashSet::new();
        for dep in &self.cell_deps {
            if !seen_deps.insert((dep.dep_type, &dep.out_point)) {
                return Err(ValidationError::DuplicatedCellDep(dep.out_point.clone()));
            }
        }

        for cell in self.inputs.iter().chain(self.outputs.iter()) {
            if cell.capacity.as_capacity().is_none() {
                return Err(ValidationError::CapacityOverflow(cell.capacity));
            }
        }

        Ok(())
    }

    /// Serialize into the ledger's canonical `RawTransaction` molecule
    /// encoding. The field order (version, cell_deps, header_deps, inputs,
    /// outputs, outputs_data) is fixed by the schema; input and output order
    /// is exactly the construction order, witnesses are excluded.
    pub fn to_packed(&self) -> Result<packed::RawTransaction, ValidationError> {
        let mut inputs = Vec::with_capacity(self.inputs.len());
        for cell in &self.inputs {
            inputs.push(cell.to_input().ok_or(ValidationError::UnresolvedInput)?);
        }

        let mut outputs = Vec::with_capacity(self.outputs.len());
        let mut outputs_data = Vec::with_capacity(self.outputs.len());
        for cell in &self.outputs {
            let output = cell
                .to_output()
                .ok_or(ValidationError::CapacityOverflow(cell.capacity))?;
            outputs.push(output);
            outputs_data.push(cell.data.pack());
        }

        let cell_deps: Vec<packed::CellDep> = self.cell_deps.iter().map(Into::into).collect();
        let header_deps: Vec<packed::Byte32> =
            self.header_deps.iter().map(|hash| hash.pack()).collect();

        Ok(packed::RawTransaction::new_builder()
            .version(self.version.pack())
            .cell_deps(cell_deps.pack())
            .header_deps(header_deps.pack())
            .inputs(inputs.pack())
            .outputs(outputs.pack())
            .outputs_data(outputs_data.pack())
            .build())
    }

    /// The canonical transaction hash: blake2b-256 over the packed raw
    /// transaction bytes. This is the identifier out points use to refer to
    /// the cells this transaction creates.
    pub fn hash(&self) -> Result<H256, ValidationError> {
        let raw = self.to_packed()?;
        Ok(blake2b_256(raw.as_slice()).into())
    }
}
