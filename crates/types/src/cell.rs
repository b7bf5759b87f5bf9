use ckb_types::core::DepType;
use ckb_types::{bytes::Bytes, packed, prelude::*, H256};

use crate::amount::{Amount, AmountError};

/// Reference to the `index`-th output of the transaction with `tx_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutPoint {
    pub tx_hash: H256,
    pub index: u32,
}

impl OutPoint {
    pub fn new(tx_hash: H256, index: u32) -> OutPoint {
        OutPoint { tx_hash, index }
    }
}

impl From<&OutPoint> for packed::OutPoint {
    fn from(out_point: &OutPoint) -> packed::OutPoint {
        packed::OutPoint::new_builder()
            .tx_hash(out_point.tx_hash.pack())
            .index(out_point.index.pack())
            .build()
    }
}

impl From<ckb_jsonrpc_types::OutPoint> for OutPoint {
    fn from(out_point: ckb_jsonrpc_types::OutPoint) -> OutPoint {
        OutPoint {
            tx_hash: out_point.tx_hash,
            index: out_point.index.value(),
        }
    }
}

/// A dependency a transaction needs resolved during verification, either a
/// single code cell or a dep group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellDep {
    pub dep_type: DepType,
    pub out_point: OutPoint,
}

impl CellDep {
    pub fn new(dep_type: DepType, out_point: OutPoint) -> CellDep {
        CellDep {
            dep_type,
            out_point,
        }
    }
}

impl From<&CellDep> for packed::CellDep {
    fn from(dep: &CellDep) -> packed::CellDep {
        packed::CellDep::new_builder()
            .out_point((&dep.out_point).into())
            .dep_type(dep.dep_type.into())
            .build()
    }
}

/// A live or under-construction cell. `out_point` is `None` while the cell
/// is a pending output of a transaction that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub out_point: Option<OutPoint>,
    pub capacity: Amount,
    pub lock: packed::Script,
    pub type_: Option<packed::Script>,
    pub data: Bytes,
}

impl Cell {
    /// A pending cell holding nothing but capacity.
    pub fn new(capacity: Amount, lock: packed::Script) -> Cell {
        Cell {
            out_point: None,
            capacity,
            lock,
            type_: None,
            data: Bytes::new(),
        }
    }

    /// A cell eligible for capacity selection: no type script and no data.
    pub fn is_plain_capacity(&self) -> bool {
        self.type_.is_none() && self.data.is_empty()
    }

    /// Decode the sUDT balance carried in `data`.
    pub fn sudt_amount(&self) -> Result<Amount, AmountError> {
        Amount::from_uint128_le(&self.data)
    }

    /// The input form of this cell; `None` while the cell has no out point.
    pub fn to_input(&self) -> Option<packed::CellInput> {
        let out_point = self.out_point.as_ref()?;
        Some(
            packed::CellInput::new_builder()
                .since(0u64.pack())
                .previous_output(out_point.into())
                .build(),
        )
    }

    /// The output form of this cell; `None` if the capacity does not fit the
    /// 64-bit capacity field.
    pub fn to_output(&self) -> Option<packed::CellOutput> {
        let capacity = self.capacity.as_capacity()?;
        Some(
            packed::CellOutput::new_builder()
                .capacity(capacity.pack())
                .lock(self.lock.clone())
                .type_(
                    packed::ScriptOpt::new_builder()
                        .set(self.type_.clone())
                        .build(),
                )
                .build(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ckb_types::core::ScriptHashType;
    use ckb_types::h256;

    fn lock() -> packed::Script {
        packed::Script::new_builder()
            .code_hash(
                h256!("0x9bd7e06f3ecf4be0f2fcd2188b23f1b9fcc88e5d4b65a8637b17723bbda3cce8")
                    .pack(),
            )
            .hash_type(ScriptHashType::Type.into())
            .args([0u8; 20].pack())
            .build()
    }

    #[test]
    fn test_plain_capacity_predicate() {
        let mut cell = Cell::new(Amount::from_shannons(500), lock());
        assert!(cell.is_plain_capacity());

        cell.data = Bytes::from(vec![0u8; 16]);
        assert!(!cell.is_plain_capacity());

        cell.data = Bytes::new();
        cell.type_ = Some(lock());
        assert!(!cell.is_plain_capacity());
    }

    #[test]
    fn test_sudt_amount() {
        let mut cell = Cell::new(Amount::from_shannons(500), lock());
        cell.data = Bytes::from(777u128.to_le_bytes().to_vec());
        assert_eq!(cell.sudt_amount(), Ok(Amount::from_shannons(777)));

        cell.data = Bytes::from(vec![0u8; 4]);
        assert_eq!(cell.sudt_amount(), Err(AmountError::Decode(4)));
    }

    #[test]
    fn test_input_output_forms() {
        let mut cell = Cell::new(Amount::from_shannons(500), lock());
        assert!(cell.to_input().is_none());

        cell.out_point = Some(OutPoint::new(h256!("0x1"), 7));
        let input = cell.to_input().unwrap();
        let index: u32 = input.previous_output().index().unpack();
        assert_eq!(index, 7);

        let output = cell.to_output().unwrap();
        let capacity: u64 = output.capacity().unpack();
        assert_eq!(capacity, 500);

        cell.capacity = Amount::from_shannons(u64::MAX as u128 + 1);
        assert!(cell.to_output().is_none());
    }
}
