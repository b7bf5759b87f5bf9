//! Value objects shared by the ckw wallet core.
//!
//! Everything here is pure data: amounts in shannons, cells and their
//! references, and the raw transaction with its structural validation and
//! canonical hash. Network access lives in `ckw-rpc-client`.

pub mod address;
pub mod amount;
pub mod cell;
pub mod sudt;
pub mod transaction;

pub use address::Address;
pub use amount::{Amount, AmountError, AmountUnit, ONE_CKB};
pub use cell::{Cell, CellDep, OutPoint};
pub use sudt::{Sudt, SUDT_CODE_HASH_MAINNET, SUDT_CODE_HASH_TESTNET};
pub use transaction::{RawTransaction, ValidationError};

pub use ckb_types::core::DepType;
