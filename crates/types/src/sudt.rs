use ckb_types::core::ScriptHashType;
use ckb_types::{h256, packed, prelude::*, H256};

/// Code hash of the sUDT type script deployed on mainnet.
pub const SUDT_CODE_HASH_MAINNET: H256 =
    h256!("0x5e7a36a77e68eecc013dfa2fe6a23f3b6c344b04005808694ae6dd45eea4cfd5");

/// Code hash of the sUDT type script deployed on testnet.
pub const SUDT_CODE_HASH_TESTNET: H256 =
    h256!("0xc5e5dcf215925f7ef4dfaf5f4b4f105bc321c02776d6e7d52a1db3fcd9d011a4");

/// A simple UDT, identified by the sUDT code hash plus the issuer's lock
/// hash in the type script args. A cell carrying this type script holds its
/// balance as a 128-bit little-endian integer in output data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudt {
    code_hash: H256,
    hash_type: ScriptHashType,
    owner_lock_hash: H256,
}

impl Sudt {
    pub fn new(code_hash: H256, owner_lock_hash: H256) -> Sudt {
        Sudt {
            code_hash,
            hash_type: ScriptHashType::Type,
            owner_lock_hash,
        }
    }

    pub fn mainnet(owner_lock_hash: H256) -> Sudt {
        Sudt::new(SUDT_CODE_HASH_MAINNET, owner_lock_hash)
    }

    pub fn testnet(owner_lock_hash: H256) -> Sudt {
        Sudt::new(SUDT_CODE_HASH_TESTNET, owner_lock_hash)
    }

    /// The canonical type script marking cells of this token.
    pub fn type_script(&self) -> packed::Script {
        packed::Script::new_builder()
            .code_hash(self.code_hash.pack())
            .hash_type(self.hash_type.into())
            .args(self.owner_lock_hash.as_bytes().pack())
            .build()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_type_script_shape() {
        let owner = h256!("0x32e555f3ff8e135cece1351ee6acbaba136976fb59c9fbf9384d2a91a079cb19");
        let sudt = Sudt::mainnet(owner.clone());
        let script = sudt.type_script();

        let code_hash: H256 = script.code_hash().unpack();
        assert_eq!(code_hash, SUDT_CODE_HASH_MAINNET);
        assert_eq!(script.args().raw_data().as_ref(), owner.as_bytes());

        assert_ne!(
            Sudt::testnet(owner.clone()).type_script(),
            Sudt::mainnet(owner).type_script()
        );
    }
}
