//! Asset types with a fixed decimal precision
//!
//! Amounts are signed 64-bit integers scaled by the symbol precision. On the
//! wire every type is a compact string:
//!
//! | Type                 | Example               |
//! |----------------------|-----------------------|
//! | `Symbol`             | `3,HOBL`              |
//! | `Asset`              | `500.000 HOBL`        |
//! | `ExtendedSymbolCode` | `HOBL@conr2d`         |
//! | `ExtendedSymbol`     | `3,HOBL@conr2d`       |
//! | `ExtendedAsset`      | `500.000 HOBL@conr2d` |

use std::fmt;
use std::str::FromStr;

use cosmwasm_std::{StdError, StdResult};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Constants
// ============================================================================

/// Largest magnitude an asset amount may carry
pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

/// Largest supported number of decimal places
pub const MAX_PRECISION: u8 = 18;

/// Longest symbol code in characters
pub const MAX_CODE_LEN: usize = 7;

fn invalid_format(target: &str, input: &str) -> StdError {
    StdError::parse_err(target, format!("invalid format `{}`", input))
}

/// Symbol codes are 1 to 7 upper-case latin letters.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LEN && code.bytes().all(|b| b.is_ascii_uppercase())
}

macro_rules! string_codec {
    ($ty:ident) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(de::Error::custom)
            }
        }

        impl JsonSchema for $ty {
            fn schema_name() -> String {
                stringify!($ty).to_string()
            }

            fn json_schema(gen: &mut SchemaGenerator) -> Schema {
                String::json_schema(gen)
            }
        }
    };
}

// ============================================================================
// Symbol
// ============================================================================

/// Token code together with its decimal precision
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub precision: u8,
    pub code: String,
}

impl Symbol {
    pub fn new(precision: u8, code: impl Into<String>) -> StdResult<Self> {
        let symbol = Self {
            precision,
            code: code.into(),
        };
        if !symbol.is_valid() {
            return Err(StdError::generic_err(format!(
                "invalid symbol name `{}`",
                symbol.code
            )));
        }
        Ok(symbol)
    }

    pub fn is_valid(&self) -> bool {
        self.precision <= MAX_PRECISION && is_valid_code(&self.code)
    }

    /// 10^precision as a wide integer.
    pub fn unit(&self) -> i128 {
        10i128.pow(self.precision as u32)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let (precision, code) = s.split_once(',').ok_or_else(|| invalid_format("Symbol", s))?;
        let precision = precision
            .parse::<u8>()
            .map_err(|_| invalid_format("Symbol", s))?;
        Symbol::new(precision, code)
    }
}

string_codec!(Symbol);

// ============================================================================
// Asset
// ============================================================================

/// An amount of a symbol, e.g. `500.000 HOBL`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    pub fn zero(symbol: Symbol) -> Self {
        Self::new(0, symbol)
    }

    /// Same symbol, different amount.
    pub fn with_amount(&self, amount: i64) -> Self {
        Self::new(amount, self.symbol.clone())
    }

    pub fn is_amount_within_range(&self) -> bool {
        (-MAX_AMOUNT..=MAX_AMOUNT).contains(&self.amount)
    }

    pub fn is_valid(&self) -> bool {
        self.is_amount_within_range() && self.symbol.is_valid()
    }

    pub fn checked_add(&self, other: &Asset) -> StdResult<Asset> {
        if self.symbol != other.symbol {
            return Err(StdError::generic_err(
                "attempt to add asset with different symbol",
            ));
        }
        let amount = self.amount + other.amount;
        if amount > MAX_AMOUNT {
            return Err(StdError::generic_err("addition overflow"));
        }
        if amount < -MAX_AMOUNT {
            return Err(StdError::generic_err("addition underflow"));
        }
        Ok(self.with_amount(amount))
    }

    pub fn checked_sub(&self, other: &Asset) -> StdResult<Asset> {
        if self.symbol != other.symbol {
            return Err(StdError::generic_err(
                "attempt to subtract asset with different symbol",
            ));
        }
        let amount = self.amount - other.amount;
        if amount < -MAX_AMOUNT {
            return Err(StdError::generic_err("subtraction underflow"));
        }
        if amount > MAX_AMOUNT {
            return Err(StdError::generic_err("subtraction overflow"));
        }
        Ok(self.with_amount(amount))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let precision = self.symbol.precision as usize;
        if precision == 0 {
            return write!(f, "{}{} {}", sign, abs, self.symbol.code);
        }
        let unit = 10u64.pow(precision as u32);
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            abs / unit,
            abs % unit,
            self.symbol.code,
            width = precision
        )
    }
}

impl FromStr for Asset {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let (number, code) = s.split_once(' ').ok_or_else(|| invalid_format("Asset", s))?;
        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid_format("Asset", s));
        }
        if digits.contains('.') && frac_part.is_empty() {
            return Err(invalid_format("Asset", s));
        }
        if frac_part.len() > MAX_PRECISION as usize {
            return Err(StdError::generic_err("precision should be <= 18"));
        }

        let symbol = Symbol::new(frac_part.len() as u8, code)?;
        let out_of_range = || StdError::generic_err("magnitude of asset amount must be less than 2^62");
        let int_value = int_part.parse::<i128>().map_err(|_| out_of_range())?;
        let frac_value = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse::<i128>().map_err(|_| out_of_range())?
        };
        let magnitude = int_value
            .checked_mul(symbol.unit())
            .and_then(|v| v.checked_add(frac_value))
            .filter(|v| *v <= MAX_AMOUNT as i128)
            .ok_or_else(out_of_range)?;
        let amount = if negative { -magnitude } else { magnitude };

        Ok(Asset::new(amount as i64, symbol))
    }
}

string_codec!(Asset);

// ============================================================================
// Extended Types (bound to an issuing contract)
// ============================================================================

/// Symbol code qualified by its issuing contract, e.g. `HOBL@conr2d`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtendedSymbolCode {
    pub code: String,
    pub contract: String,
}

impl ExtendedSymbolCode {
    pub fn new(code: impl Into<String>, contract: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            contract: contract.into(),
        }
    }
}

impl fmt::Display for ExtendedSymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.code, self.contract)
    }
}

impl FromStr for ExtendedSymbolCode {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let (code, contract) = s
            .split_once('@')
            .filter(|(code, contract)| is_valid_code(code) && !contract.is_empty())
            .ok_or_else(|| invalid_format("ExtendedSymbolCode", s))?;
        Ok(Self::new(code, contract))
    }
}

string_codec!(ExtendedSymbolCode);

/// Symbol with precision qualified by its issuing contract, e.g. `3,HOBL@conr2d`
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtendedSymbol {
    pub symbol: Symbol,
    pub contract: String,
}

impl ExtendedSymbol {
    pub fn new(symbol: Symbol, contract: impl Into<String>) -> Self {
        Self {
            symbol,
            contract: contract.into(),
        }
    }

    pub fn code(&self) -> ExtendedSymbolCode {
        ExtendedSymbolCode::new(self.symbol.code.clone(), self.contract.clone())
    }
}

impl fmt::Display for ExtendedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.contract)
    }
}

impl FromStr for ExtendedSymbol {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let (symbol, contract) = s
            .split_once('@')
            .filter(|(_, contract)| !contract.is_empty())
            .ok_or_else(|| invalid_format("ExtendedSymbol", s))?;
        Ok(Self::new(symbol.parse()?, contract))
    }
}

string_codec!(ExtendedSymbol);

/// Asset qualified by its issuing contract, e.g. `500.000 HOBL@conr2d`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedAsset {
    pub quantity: Asset,
    pub contract: String,
}

impl ExtendedAsset {
    pub fn new(quantity: Asset, contract: impl Into<String>) -> Self {
        Self {
            quantity,
            contract: contract.into(),
        }
    }

    pub fn extended_symbol(&self) -> ExtendedSymbol {
        ExtendedSymbol::new(self.quantity.symbol.clone(), self.contract.clone())
    }

    pub fn code(&self) -> ExtendedSymbolCode {
        ExtendedSymbolCode::new(self.quantity.symbol.code.clone(), self.contract.clone())
    }

    /// Same token, different amount.
    pub fn with_amount(&self, amount: i64) -> Self {
        Self::new(self.quantity.with_amount(amount), self.contract.clone())
    }
}

impl fmt::Display for ExtendedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.quantity, self.contract)
    }
}

impl FromStr for ExtendedAsset {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let (quantity, contract) = s
            .rsplit_once('@')
            .filter(|(_, contract)| !contract.is_empty())
            .ok_or_else(|| invalid_format("ExtendedAsset", s))?;
        Ok(Self::new(quantity.parse()?, contract))
    }
}

string_codec!(ExtendedAsset);

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{from_json, to_json_string};

    #[test]
    fn test_parse_and_display_asset() {
        let asset: Asset = "500.000 HOBL".parse().unwrap();
        assert_eq!(asset.amount, 500_000);
        assert_eq!(asset.symbol, Symbol::new(3, "HOBL").unwrap());
        assert_eq!(asset.to_string(), "500.000 HOBL");

        let negative: Asset = "-0.05 ENC".parse().unwrap();
        assert_eq!(negative.amount, -5);
        assert_eq!(negative.to_string(), "-0.05 ENC");

        let integral: Asset = "42 GXC".parse().unwrap();
        assert_eq!(integral.symbol.precision, 0);
        assert_eq!(integral.to_string(), "42 GXC");
    }

    #[test]
    fn test_reject_malformed_asset() {
        assert!("500.000HOBL".parse::<Asset>().is_err());
        assert!("500. HOBL".parse::<Asset>().is_err());
        assert!(".5 HOBL".parse::<Asset>().is_err());
        assert!("+5 HOBL".parse::<Asset>().is_err());
        assert!("5.0 hobl".parse::<Asset>().is_err());
        assert!("5.0 TOOLONGCODE".parse::<Asset>().is_err());
        // 2^62 atomic units is one past the limit
        assert!("4611686018427387904 BIG".parse::<Asset>().is_err());
        assert!("4611686018427387903 BIG".parse::<Asset>().is_ok());
    }

    #[test]
    fn test_checked_arithmetic() {
        let a: Asset = "1.50 ENC".parse().unwrap();
        let b: Asset = "0.75 ENC".parse().unwrap();
        assert_eq!(a.checked_add(&b).unwrap().to_string(), "2.25 ENC");
        assert_eq!(b.checked_sub(&a).unwrap().to_string(), "-0.75 ENC");

        let other: Asset = "1.500 ENC".parse().unwrap();
        assert!(a.checked_add(&other).is_err());

        let max = Asset::new(MAX_AMOUNT, a.symbol.clone());
        assert_eq!(
            max.checked_add(&a).unwrap_err(),
            StdError::generic_err("addition overflow")
        );
    }

    #[test]
    fn test_extended_formats() {
        let ext: ExtendedAsset = "1000.000 HOBL@conr2d".parse().unwrap();
        assert_eq!(ext.contract, "conr2d");
        assert_eq!(ext.code().to_string(), "HOBL@conr2d");
        assert_eq!(ext.extended_symbol().to_string(), "3,HOBL@conr2d");

        let sym: ExtendedSymbol = "4,GXC@gxc".parse().unwrap();
        assert_eq!(sym.code(), ExtendedSymbolCode::new("GXC", "gxc"));

        assert!("HOBL".parse::<ExtendedSymbolCode>().is_err());
        assert!("hobl@conr2d".parse::<ExtendedSymbolCode>().is_err());
    }

    #[test]
    fn test_json_encoding() {
        let ext: ExtendedAsset = "5000.00 ENC@eun2ce".parse().unwrap();
        let json = to_json_string(&ext).unwrap();
        assert_eq!(json, "\"5000.00 ENC@eun2ce\"");
        let back: ExtendedAsset = from_json(json.as_bytes()).unwrap();
        assert_eq!(back, ext);
    }
}
