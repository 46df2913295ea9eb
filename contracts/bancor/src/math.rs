//! Bonding curve arithmetic in deterministic fixed point
//!
//! Values carry 36 decimals on `Uint256`. `ln` reduces its argument by powers
//! of two and sums the atanh series, `exp` reduces by ln 2 and sums the Taylor
//! series. Every step truncates, so a curve never pays out more than the exact
//! value would.

use common::asset::MAX_AMOUNT;
use cosmwasm_std::{Decimal, StdError, StdResult, Uint128, Uint256, Uint512};

/// 1.0 in fixed point
pub const SCALE: Uint256 = Uint256::from_u128(1_000_000_000_000_000_000_000_000_000_000_000_000);

/// ln 2 in fixed point
const LN2: Uint256 = Uint256::from_u128(693_147_180_559_945_309_417_232_121_458_176_568);

/// `Decimal` carries 18 decimals, the curve 36
const DECIMAL_TO_FIXED: u128 = 1_000_000_000_000_000_000;

// ============================================================================
// Conversion Results
// ============================================================================

/// Exact share of the offered input a conversion actually used
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ratio {
    pub numerator: Uint256,
    pub denominator: Uint256,
}

impl Ratio {
    pub const ONE: Ratio = Ratio {
        numerator: Uint256::from_u128(1),
        denominator: Uint256::from_u128(1),
    };

    pub fn new(numerator: Uint256, denominator: Uint256) -> Self {
        if denominator.is_zero() {
            return Self::ONE;
        }
        Self {
            numerator,
            denominator,
        }
    }

    /// Part of `amount` left over, rounded down.
    pub fn unused(&self, amount: i64) -> StdResult<i64> {
        let rest = self.denominator.checked_sub(self.numerator)?;
        to_amount(mul_div(atoms(amount)?, rest, self.denominator)?)
    }

    /// `amount` minus its unused part.
    pub fn consumed(&self, amount: i64) -> StdResult<i64> {
        Ok(amount - self.unused(amount)?)
    }
}

/// Outcome of a curve evaluation: `value` is produced for `delta` of the
/// input, `ratio` tells how much of the offered input that is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Converted {
    pub value: i64,
    pub delta: i64,
    pub ratio: Ratio,
}

impl Converted {
    fn nothing() -> Self {
        Self {
            value: 0,
            delta: 0,
            ratio: Ratio::ONE,
        }
    }
}

// ============================================================================
// Curve
// ============================================================================

/// Smart tokens issued for paying `paid` into a pool:
/// `dS = S * ((1 + dC / C)^w - 1)`, truncated, with the payment scaled down
/// to what the truncated amount is worth.
pub fn to_smart(supply: i64, balance: i64, paid: i64, weight: Decimal) -> StdResult<Converted> {
    check_pool(supply, balance)?;
    let growth = pow_ratio(
        u128_of(balance)? + u128_of(paid)?,
        u128_of(balance)?,
        to_fixed(weight)?,
    )?
    .saturating_sub(SCALE);

    let exact = atoms(supply)?.checked_mul(growth)?;
    let value = exact.checked_div(SCALE)?;
    if value.is_zero() {
        return Ok(Converted::nothing());
    }

    let ratio = Ratio::new(value.checked_mul(SCALE)?, exact);
    Ok(Converted {
        value: to_amount(value)?,
        delta: ratio.consumed(paid)?,
        ratio,
    })
}

/// Connected tokens paid out for selling `sold` smart tokens:
/// `dC = C * (1 - (1 - dS / S)^(1 / w))`, truncated.
pub fn from_smart(supply: i64, balance: i64, sold: i64, weight: Decimal) -> StdResult<Converted> {
    check_pool(supply, balance)?;
    let pool = atoms(balance)?.checked_mul(SCALE)?;
    let exact = if sold >= supply {
        pool
    } else {
        let shrink = pow_ratio(
            u128_of(supply)?,
            u128_of(supply)? - u128_of(sold)?,
            inverse(to_fixed(weight)?)?,
        )?;
        mul_div(pool, shrink.checked_sub(SCALE)?, shrink)?
    };

    let value = exact.checked_div(SCALE)?;
    if value.is_zero() {
        return Ok(Converted::nothing());
    }
    let value_amount = to_amount(value)?;
    Ok(Converted {
        value: value_amount,
        delta: value_amount,
        ratio: Ratio::new(value.checked_mul(SCALE)?, exact),
    })
}

/// Connected tokens needed to get exactly `wanted` smart tokens:
/// `dC = C * ((1 + dS / S)^(1 / w) - 1)`, rounded up.
pub fn exact_smart_cost(supply: i64, balance: i64, wanted: i64, weight: Decimal) -> StdResult<i64> {
    check_pool(supply, balance)?;
    let growth = pow_ratio(
        u128_of(supply)? + u128_of(wanted)?,
        u128_of(supply)?,
        inverse(to_fixed(weight)?)?,
    )?;
    let exact = atoms(balance)?.checked_mul(growth.checked_sub(SCALE)?)?;
    to_amount(ceil_div(exact, SCALE)?)
}

/// Smart tokens needed to get exactly `payout` connected tokens:
/// `dS = S * (1 - (1 - dC / C)^w)`, rounded up.
pub fn exact_smart_input(supply: i64, balance: i64, payout: i64, weight: Decimal) -> StdResult<i64> {
    check_pool(supply, balance)?;
    if payout >= balance {
        return Err(StdError::generic_err("connector balance not enough"));
    }
    let shrink = pow_ratio(
        u128_of(balance)?,
        u128_of(balance)? - u128_of(payout)?,
        to_fixed(weight)?,
    )?;
    let exact = mul_div(
        atoms(supply)?.checked_mul(SCALE)?,
        shrink.checked_sub(SCALE)?,
        shrink,
    )?;
    to_amount(ceil_div(exact, SCALE)?)
}

/// `amount * numerator / denominator`, rounded down.
pub fn floor_ratio(amount: i64, numerator: i64, denominator: i64) -> StdResult<i64> {
    to_amount(mul_div(atoms(amount)?, atoms(numerator)?, atoms(denominator)?)?)
}

/// `amount * numerator / denominator`, rounded up.
pub fn ceil_ratio(amount: i64, numerator: i64, denominator: i64) -> StdResult<i64> {
    let exact = atoms(amount)?.checked_mul(atoms(numerator)?)?;
    to_amount(ceil_div(exact, atoms(denominator)?)?)
}

/// `a * b` widened for building exact ratios.
pub fn product(a: i64, b: i64) -> StdResult<Uint256> {
    Ok(atoms(a)?.checked_mul(atoms(b)?)?)
}

// ============================================================================
// Fixed Point Primitives
// ============================================================================

/// `(n / d)^w` for `n >= d`.
pub fn pow_ratio(n: u128, d: u128, w: Uint256) -> StdResult<Uint256> {
    let exponent = ln_ratio(n, d)?.checked_mul(w)?.checked_div(SCALE)?;
    exp(exponent)
}

/// `ln(n / d)` for `n >= d > 0`.
fn ln_ratio(n: u128, d: u128) -> StdResult<Uint256> {
    if d == 0 || n < d {
        return Err(StdError::generic_err("logarithm of a ratio below one"));
    }

    // n / (d * 2^k) lands in [1, 2)
    let mut k = d.leading_zeros() - n.leading_zeros();
    if k > 0 && n < d << k {
        k -= 1;
    }
    let m = Uint256::from(n)
        .checked_mul(SCALE)?
        .checked_div(Uint256::from(d).checked_shl(k)?)?;

    // ln(m) = 2 * atanh((m - 1) / (m + 1))
    let s = m
        .checked_sub(SCALE)?
        .checked_mul(SCALE)?
        .checked_div(m.checked_add(SCALE)?)?;
    let s2 = s.checked_mul(s)?.checked_div(SCALE)?;
    let mut term = s;
    let mut series = Uint256::zero();
    let mut i = 1u32;
    while !term.is_zero() {
        series = series.checked_add(term.checked_div(Uint256::from(i))?)?;
        term = term.checked_mul(s2)?.checked_div(SCALE)?;
        i += 2;
    }

    Ok(LN2
        .checked_mul(Uint256::from(k))?
        .checked_add(series.checked_mul(Uint256::from(2u8))?)?)
}

/// `e^z`.
fn exp(z: Uint256) -> StdResult<Uint256> {
    let k = z.checked_div(LN2)?;
    let r = z.checked_sub(k.checked_mul(LN2)?)?;

    let mut term = SCALE;
    let mut sum = SCALE;
    let mut i = 1u128;
    loop {
        term = term
            .checked_mul(r)?
            .checked_div(SCALE.checked_mul(Uint256::from(i))?)?;
        if term.is_zero() {
            break;
        }
        sum = sum.checked_add(term)?;
        i += 1;
    }

    let k = u32::try_from(Uint128::try_from(k)?.u128())
        .map_err(|_| StdError::generic_err("exponent out of range"))?;
    Ok(sum.checked_mul(Uint256::from(2u8).checked_pow(k)?)?)
}

fn to_fixed(weight: Decimal) -> StdResult<Uint256> {
    Ok(Uint256::from(weight.atomics()).checked_mul(Uint256::from(DECIMAL_TO_FIXED))?)
}

fn inverse(w: Uint256) -> StdResult<Uint256> {
    Ok(SCALE.checked_mul(SCALE)?.checked_div(w)?)
}

fn mul_div(a: Uint256, b: Uint256, c: Uint256) -> StdResult<Uint256> {
    let wide = Uint512::from(a)
        .checked_mul(Uint512::from(b))?
        .checked_div(Uint512::from(c))?;
    Ok(Uint256::try_from(wide)?)
}

fn ceil_div(a: Uint256, b: Uint256) -> StdResult<Uint256> {
    let q = a.checked_div(b)?;
    if q.checked_mul(b)? == a {
        Ok(q)
    } else {
        Ok(q.checked_add(Uint256::one())?)
    }
}

fn check_pool(supply: i64, balance: i64) -> StdResult<()> {
    if supply <= 0 || balance <= 0 {
        return Err(StdError::generic_err("connector is empty"));
    }
    Ok(())
}

fn u128_of(amount: i64) -> StdResult<u128> {
    u128::try_from(amount).map_err(|_| StdError::generic_err("negative amount"))
}

fn atoms(amount: i64) -> StdResult<Uint256> {
    Ok(Uint256::from(u128_of(amount)?))
}

fn to_amount(value: Uint256) -> StdResult<i64> {
    let value = Uint128::try_from(value)?.u128();
    match i64::try_from(value) {
        Ok(amount) if amount <= MAX_AMOUNT => Ok(amount),
        _ => Err(StdError::generic_err("conversion result out of range")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half() -> Decimal {
        Decimal::percent(50)
    }

    #[test]
    fn test_pow_ratio() {
        let half = SCALE.checked_div(Uint256::from(2u8)).unwrap();
        assert_eq!(pow_ratio(4, 1, half).unwrap(), Uint256::from(2u8) * SCALE);
        assert_eq!(ln_ratio(2, 1).unwrap(), LN2);
        assert_eq!(ln_ratio(7, 7).unwrap(), Uint256::zero());

        // 1.5 within the last places
        let got = pow_ratio(9, 4, half).unwrap();
        let expected = Uint256::from(3u8) * SCALE / Uint256::from(2u8);
        assert!(got <= expected);
        assert!(expected - got < Uint256::from(1000u32));
    }

    #[test]
    fn test_to_smart() {
        let c = to_smart(10_000, 1_000, 1_000, half()).unwrap();
        assert_eq!((c.value, c.delta), (4142, 1000));

        let c = to_smart(1_000_000_000, 10_000_000, 1000, half()).unwrap();
        assert_eq!((c.value, c.delta), (49_998, 1000));

        // one token is worth 21 of the 37 offered
        let c = to_smart(100, 1_000, 37, half()).unwrap();
        assert_eq!((c.value, c.delta), (1, 21));
        assert_eq!(c.ratio.unused(37).unwrap(), 16);

        let c = to_smart(10, 1_000, 7, half()).unwrap();
        assert_eq!(c.value, 0);
    }

    #[test]
    fn test_from_smart() {
        let c = from_smart(1_000_000_000, 10_000_000, 1000, half()).unwrap();
        assert_eq!(c.value, 19);

        // selling the whole supply drains the pool
        let c = from_smart(1_000_000_000, 10_000_000, 1_000_000_000, half()).unwrap();
        assert_eq!(c.value, 10_000_000);
    }

    #[test]
    fn test_round_trip_never_gains() {
        let bought = to_smart(100_000_000, 10_000_000, 10_000_000, half()).unwrap();
        assert_eq!((bought.value, bought.delta), (41_421_356, 10_000_000));

        let sold = from_smart(
            100_000_000 + bought.value,
            10_000_000 + bought.delta,
            bought.value,
            half(),
        )
        .unwrap();
        assert_eq!(sold.value, 9_999_999);
    }

    #[test]
    fn test_exact_amounts() {
        assert_eq!(
            exact_smart_cost(1_000_000_000, 10_000_000, 100_000, half()).unwrap(),
            2001
        );
        assert_eq!(
            exact_smart_input(1_000_000_000, 10_000_000, 1000, half()).unwrap(),
            50_002
        );
        assert!(exact_smart_input(1_000, 1_000, 1_000, half()).is_err());
    }

    #[test]
    fn test_ratio_rounding() {
        assert_eq!(floor_ratio(7, 10, 3).unwrap(), 23);
        assert_eq!(ceil_ratio(7, 10, 3).unwrap(), 24);
        assert_eq!(ceil_ratio(6, 10, 3).unwrap(), 20);

        let ratio = Ratio::new(product(2, 3).unwrap(), product(7, 1).unwrap());
        assert_eq!(ratio.unused(70).unwrap(), 10);
        assert_eq!(ratio.consumed(70).unwrap(), 60);
        assert_eq!(Ratio::ONE.unused(70).unwrap(), 0);
    }

    #[test]
    fn test_empty_pool() {
        assert!(to_smart(0, 1_000, 10, half()).is_err());
        assert!(from_smart(1_000, 0, 10, half()).is_err());
    }
}
