use ckb_types::{packed, prelude::*, H256};

/// The owner of cells, identified by the lock script guarding them.
///
/// Encoding and decoding of human-readable address strings belongs to the
/// external address codec; this type only carries the decoded lock script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    lock: packed::Script,
}

impl Address {
    pub fn new(lock: packed::Script) -> Address {
        Address { lock }
    }

    pub fn lock_script(&self) -> packed::Script {
        self.lock.clone()
    }

    /// blake2b-256 hash of the lock script; sUDT issuance uses it as the
    /// owner identity.
    pub fn lock_hash(&self) -> H256 {
        self.lock.calc_script_hash().unpack()
    }
}
