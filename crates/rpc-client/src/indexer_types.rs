//! Wire types of the ckb-indexer `get_cells` protocol.

use ckb_fixed_hash::H256;
use ckb_jsonrpc_types::{BlockNumber, CellOutput, JsonBytes, OutPoint, Script, Uint32, Uint64};
use serde::{Deserialize, Serialize};

use ckw_types::Amount;

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct SearchKey {
    pub script: Script,
    pub script_type: ScriptType,
    pub filter: Option<SearchKeyFilter>,
}

impl SearchKey {
    /// Search for cells guarded by this lock script prefix.
    pub fn with_lock(script: ckb_types::packed::Script) -> Self {
        Self {
            script: script.into(),
            script_type: ScriptType::Lock,
            filter: None,
        }
    }

    /// Search for cells carrying this type script prefix.
    pub fn with_type(script: ckb_types::packed::Script) -> Self {
        Self {
            script: script.into(),
            script_type: ScriptType::Type,
            filter: None,
        }
    }

    pub fn with_filter(self, filter: Option<SearchKeyFilter>) -> Self {
        Self { filter, ..self }
    }
}

#[derive(Deserialize, Serialize, Default, Clone, Debug)]
pub struct SearchKeyFilter {
    pub script: Option<Script>,
    pub output_data_len_range: Option<[Uint64; 2]>,
    pub output_capacity_range: Option<[Uint64; 2]>,
    pub block_range: Option<[BlockNumber; 2]>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ScriptType {
    Lock,
    Type,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Desc,
    Asc,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Tip {
    pub block_hash: H256,
    pub block_number: BlockNumber,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Cell {
    pub output: CellOutput,
    pub output_data: JsonBytes,
    pub out_point: OutPoint,
    pub block_number: BlockNumber,
    pub tx_index: Uint32,
}

impl Cell {
    /// Lift the wire cell into the domain value object.
    pub fn into_cell(self) -> ckw_types::Cell {
        ckw_types::Cell {
            out_point: Some(self.out_point.into()),
            capacity: Amount::from(self.output.capacity.value()),
            lock: self.output.lock.into(),
            type_: self.output.type_.map(Into::into),
            data: self.output_data.into_bytes(),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct Pagination<T> {
    pub objects: Vec<T>,
    pub last_cursor: JsonBytes,
}
