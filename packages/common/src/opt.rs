//! Named token options
//!
//! Options travel as `{key, value}` pairs so new settings do not change the
//! message shape. Value encodings:
//! - flags: one byte, non-zero means `true`
//! - amounts: 8-byte little-endian `i64` in atomic units
//! - durations: 8-byte little-endian `u64` seconds

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, StdError, StdResult};

#[cw_serde]
pub struct Opt {
    pub key: String,
    pub value: Binary,
}

impl Opt {
    pub fn flag(key: &str, value: bool) -> Self {
        Self {
            key: key.to_string(),
            value: Binary::from(vec![value as u8]),
        }
    }

    pub fn amount(key: &str, value: i64) -> Self {
        Self {
            key: key.to_string(),
            value: Binary::from(value.to_le_bytes().to_vec()),
        }
    }

    pub fn seconds(key: &str, value: u64) -> Self {
        Self {
            key: key.to_string(),
            value: Binary::from(value.to_le_bytes().to_vec()),
        }
    }

    pub fn as_bool(&self) -> StdResult<bool> {
        match self.value.as_slice() {
            [b] => Ok(*b != 0),
            _ => Err(self.invalid_value()),
        }
    }

    pub fn as_i64(&self) -> StdResult<i64> {
        Ok(i64::from_le_bytes(self.eight_bytes()?))
    }

    pub fn as_u64(&self) -> StdResult<u64> {
        Ok(u64::from_le_bytes(self.eight_bytes()?))
    }

    fn eight_bytes(&self) -> StdResult<[u8; 8]> {
        self.value
            .as_slice()
            .try_into()
            .map_err(|_| self.invalid_value())
    }

    fn invalid_value(&self) -> StdError {
        StdError::generic_err(format!("invalid value for option `{}`", self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_encoding() {
        let opt = Opt::flag("paused", true);
        assert_eq!(opt.value.as_slice(), &[1u8]);
        assert!(opt.as_bool().unwrap());
        assert!(!Opt::flag("paused", false).as_bool().unwrap());
        assert!(opt.as_i64().is_err());
    }

    #[test]
    fn test_numeric_encoding() {
        let delay = Opt::seconds("withdraw_delay_sec", 86_400);
        assert_eq!(delay.as_u64().unwrap(), 86_400);
        assert_eq!(delay.value.len(), 8);

        let min = Opt::amount("withdraw_min_amount", 1_000);
        assert_eq!(min.as_i64().unwrap(), 1_000);

        let bad = Opt {
            key: "withdraw_delay_sec".to_string(),
            value: Binary::from(vec![1u8, 2]),
        };
        assert_eq!(
            bad.as_u64().unwrap_err(),
            StdError::generic_err("invalid value for option `withdraw_delay_sec`")
        );
    }
}
