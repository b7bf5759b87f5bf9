use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Shannons per CKB.
pub const ONE_CKB: u64 = 100_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount overflow")]
    Overflow,

    #[error("expected 16 bytes of little-endian amount, got {0}")]
    Decode(usize),

    #[error("invalid amount string: {0}")]
    Parse(String),
}

/// The unit a raw magnitude is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountUnit {
    Shannon,
    Ckb,
}

/// An exact quantity of the native asset or of an sUDT balance, stored as a
/// count of the smallest unit (shannon). All arithmetic is integer and
/// checked; there is no floating point involved anywhere.
///
/// The same representation covers cell capacities (which the ledger limits
/// to 64 bits, see [`Amount::as_capacity`]) and 128-bit sUDT balances.
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn new(magnitude: u128, unit: AmountUnit) -> Result<Amount, AmountError> {
        match unit {
            AmountUnit::Shannon => Ok(Amount(magnitude)),
            AmountUnit::Ckb => magnitude
                .checked_mul(ONE_CKB as u128)
                .map(Amount)
                .ok_or(AmountError::Overflow),
        }
    }

    pub const fn from_shannons(shannons: u128) -> Amount {
        Amount(shannons)
    }

    /// Decode a 16-byte little-endian unsigned 128-bit integer, the encoding
    /// sUDT cells use for their balance in `output_data`.
    pub fn from_uint128_le(data: &[u8]) -> Result<Amount, AmountError> {
        let buf: [u8; 16] = data
            .try_into()
            .map_err(|_| AmountError::Decode(data.len()))?;
        Ok(Amount(u128::from_le_bytes(buf)))
    }

    pub fn to_uint128_le(self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn as_shannons(self) -> u128 {
        self.0
    }

    /// A cell capacity must fit the ledger's 64-bit capacity field.
    pub fn as_capacity(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }
}

impl From<u64> for Amount {
    fn from(shannons: u64) -> Amount {
        Amount(shannons as u128)
    }
}

impl FromStr for Amount {
    type Err = AmountError;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts = input.trim().split('.').collect::<Vec<_>>();
        let ckb = parts
            .first()
            .ok_or_else(|| AmountError::Parse("missing input".to_owned()))?
            .parse::<u128>()
            .map_err(|err| AmountError::Parse(err.to_string()))?;
        let mut shannons = ckb
            .checked_mul(ONE_CKB as u128)
            .ok_or(AmountError::Overflow)?;
        if let Some(decimal_str) = parts.get(1) {
            let decimal_str = decimal_str.trim();
            if decimal_str.len() > 8 {
                return Err(AmountError::Parse(format!(
                    "decimal part too long: {}",
                    decimal_str.len()
                )));
            }
            let mut decimal = decimal_str
                .parse::<u32>()
                .map_err(|err| AmountError::Parse(err.to_string()))?;
            for _ in 0..(8 - decimal_str.len()) {
                decimal *= 10;
            }
            shannons = shannons
                .checked_add(u128::from(decimal))
                .ok_or(AmountError::Overflow)?;
        }
        Ok(Amount(shannons))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let ckb_part = self.0 / ONE_CKB as u128;
        let shannon_part = (self.0 % ONE_CKB as u128) as u64;
        let shannon_part_string = format!("{:0>8}", shannon_part);
        let mut base = 10;
        let mut suffix_zero = 7;
        for i in 0..8 {
            if shannon_part % base > 0 {
                suffix_zero = i;
                break;
            }
            base *= 10;
        }
        if f.alternate() {
            write!(
                f,
                "{}.{} (CKB)",
                ckb_part,
                &shannon_part_string[..(8 - suffix_zero)]
            )
        } else {
            write!(
                f,
                "{}.{}",
                ckb_part,
                &shannon_part_string[..(8 - suffix_zero)]
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        for (input, shannons) in &[
            ("3.0", 3 * ONE_CKB as u128),
            ("300.0", 300 * ONE_CKB as u128),
            ("3.56", 356_000_000),
            ("3.0056", 300_560_000),
            ("3.10056", 310_056_000),
            ("3.10056123", 310_056_123),
            ("0.0056", 560_000),
            ("0.10056123", 10_056_123),
            ("12345.234", 12345 * ONE_CKB as u128 + 23_400_000),
            ("12345.23442222", 12345 * ONE_CKB as u128 + 23_442_222),
        ] {
            assert_eq!(
                Amount::from_str(input).unwrap(),
                Amount::from_shannons(*shannons)
            );
            assert_eq!(Amount::from_shannons(*shannons).to_string(), *input);
        }

        // Parse without decimal part
        assert_eq!(
            Amount::from_str("12345"),
            Ok(Amount::from_shannons(12345 * ONE_CKB as u128))
        );

        // Parse failures
        assert!(Amount::from_str("12345.234422224").is_err());
        assert!(Amount::from_str("abc.234422224").is_err());
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("-234").is_err());
        assert!(Amount::from_str("-234.3").is_err());
    }

    #[test]
    fn test_unit_normalization() {
        assert_eq!(
            Amount::new(3, AmountUnit::Ckb).unwrap(),
            Amount::from_shannons(300_000_000)
        );
        assert_eq!(
            Amount::new(300_000_000, AmountUnit::Shannon).unwrap(),
            Amount::new(3, AmountUnit::Ckb).unwrap()
        );
        assert_eq!(
            Amount::new(u128::MAX, AmountUnit::Ckb),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_checked_add() {
        let a = Amount::from_shannons(500);
        let b = Amount::from_shannons(300);
        assert_eq!(a.checked_add(b), Some(Amount::from_shannons(800)));
        assert_eq!(Amount::from_shannons(u128::MAX).checked_add(a), None);
    }

    #[test]
    fn test_ordering() {
        let needed = Amount::from_shannons(700);
        assert!(Amount::from_shannons(800) >= needed);
        assert!(Amount::from_shannons(700) >= needed);
        assert!(Amount::from_shannons(699) < needed);
    }

    #[test]
    fn test_uint128_le_round_trip() {
        let amount = Amount::from_shannons(0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10);
        let bytes = amount.to_uint128_le();
        assert_eq!(Amount::from_uint128_le(&bytes), Ok(amount));

        let raw = 1_000_000u128.to_le_bytes();
        assert_eq!(
            Amount::from_uint128_le(&raw).unwrap(),
            Amount::from_shannons(1_000_000)
        );

        assert_eq!(Amount::from_uint128_le(&[0u8; 8]), Err(AmountError::Decode(8)));
        assert_eq!(
            Amount::from_uint128_le(&[0u8; 17]),
            Err(AmountError::Decode(17))
        );
    }

    #[test]
    fn test_capacity_width() {
        assert_eq!(Amount::from_shannons(42).as_capacity(), Some(42));
        assert_eq!(
            Amount::from_shannons(u64::MAX as u128 + 1).as_capacity(),
            None
        );
    }
}
