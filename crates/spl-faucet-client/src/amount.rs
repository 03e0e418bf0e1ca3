//! UI amount normalization.
//!
//! Amounts are held as exact decimal digits and scaled by the mint's
//! `decimals` with integer arithmetic. Digits beyond the mint's precision are
//! rounded half away from zero, so any value already expressible at the mint's
//! precision normalizes exactly.

use std::fmt;
use std::iter;
use std::str::FromStr;

use solana_program::pubkey::Pubkey;
use tracing::debug;

use crate::error::{FaucetError, FaucetResult};
use crate::ledger::LedgerReader;

/// A non-negative decimal amount as a user would type it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiAmount {
    // No leading zeros.
    whole: String,
    // No trailing zeros.
    fraction: String,
}

impl UiAmount {
    /// Build from a float using its shortest round-trip decimal form.
    pub fn from_f64(value: f64) -> FaucetResult<Self> {
        if !value.is_finite() {
            return Err(FaucetError::invalid_amount(format!("{value} is not finite")));
        }
        if value < 0.0 {
            return Err(FaucetError::invalid_amount(format!("{value} is negative")));
        }
        if value == 0.0 {
            return "0".parse();
        }
        // f64 Display never uses exponent notation.
        value.to_string().parse()
    }

    /// Scale into base units: `round(self * 10^decimals)`.
    pub fn to_base_units(&self, decimals: u8) -> FaucetResult<u64> {
        let places = usize::from(decimals);
        let overflow = || FaucetError::invalid_amount(format!("{self} overflows u64 at {decimals} decimals"));

        let fraction = self.fraction.bytes().chain(iter::repeat(b'0')).take(places);
        let mut units: u128 = 0;
        for digit in self.whole.bytes().chain(fraction) {
            units = units * 10 + u128::from(digit - b'0');
            if units > u128::from(u64::MAX) {
                return Err(overflow());
            }
        }

        if self.fraction.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
            units += 1;
        }

        u64::try_from(units).map_err(|_| overflow())
    }
}

impl FromStr for UiAmount {
    type Err = FaucetError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        if s.starts_with('-') {
            return Err(FaucetError::invalid_amount(format!("{s} is negative")));
        }
        let s = s.strip_prefix('+').unwrap_or(s);
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));

        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !digits(whole) || !digits(fraction) {
            return Err(FaucetError::invalid_amount(format!("{input:?} is not a decimal number")));
        }

        Ok(Self {
            whole: whole.trim_start_matches('0').to_string(),
            fraction: fraction.trim_end_matches('0').to_string(),
        })
    }
}

impl TryFrom<f64> for UiAmount {
    type Error = FaucetError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl fmt::Display for UiAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = if self.whole.is_empty() { "0" } else { &self.whole };
        if self.fraction.is_empty() {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.{}", self.fraction)
        }
    }
}

/// Fetch the mint's decimals and scale `amount` into base units.
pub async fn normalize<R>(reader: &R, mint: &Pubkey, amount: &UiAmount) -> FaucetResult<u64>
where
    R: LedgerReader + ?Sized,
{
    let info = reader.get_mint_info(mint).await?;
    let units = amount.to_base_units(info.decimals)?;
    debug!(%mint, %amount, decimals = info.decimals, units, "normalized amount");
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn units(s: &str, decimals: u8) -> u64 {
        s.parse::<UiAmount>().unwrap().to_base_units(decimals).unwrap()
    }

    #[test]
    fn scales_exact_values() {
        assert_eq!(units("1.5", 6), 1_500_000);
        assert_eq!(units("0.000001", 6), 1);
        assert_eq!(units("42", 0), 42);
        assert_eq!(units("1000", 9), 1_000_000_000_000);
        assert_eq!(units("0", 9), 0);
        assert_eq!(units(".25", 2), 25);
        assert_eq!(units("7.", 3), 7_000);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(units("1.2345", 2), 123);
        assert_eq!(units("1.235", 2), 124);
        assert_eq!(units("0.5", 0), 1);
        assert_eq!(units("0.49999", 0), 0);
        assert_eq!(units("0.0000015", 6), 2);
    }

    #[test]
    fn float_input_uses_shortest_representation() {
        let a = UiAmount::from_f64(1.5).unwrap();
        assert_eq!(a.to_base_units(6).unwrap(), 1_500_000);
        // 0.1 + 0.2 is 0.30000000000000004 as a float; beyond 9 decimals it rounds away.
        let b = UiAmount::from_f64(0.1 + 0.2).unwrap();
        assert_eq!(b.to_base_units(9).unwrap(), 300_000_000);
        assert_eq!(UiAmount::from_f64(0.0).unwrap().to_base_units(6).unwrap(), 0);
        assert_eq!(UiAmount::from_f64(1e-7).unwrap().to_string(), "0.0000001");
    }

    #[test]
    fn scaling_is_monotonic() {
        let inputs = ["0", "0.0000004", "0.0000005", "0.1", "0.15", "1", "1.4999999", "1.5", "2"];
        let scaled: Vec<u64> = inputs.iter().map(|s| units(s, 6)).collect();
        assert!(scaled.windows(2).all(|w| w[0] <= w[1]), "{scaled:?}");
    }

    #[test]
    fn rejects_bad_amounts() {
        assert_matches!(UiAmount::from_f64(-1.0), Err(FaucetError::InvalidAmount(_)));
        assert_matches!(UiAmount::from_f64(f64::NAN), Err(FaucetError::InvalidAmount(_)));
        assert_matches!(UiAmount::from_f64(f64::INFINITY), Err(FaucetError::InvalidAmount(_)));
        assert_matches!("-0.5".parse::<UiAmount>(), Err(FaucetError::InvalidAmount(_)));
        assert_matches!("1e5".parse::<UiAmount>(), Err(FaucetError::InvalidAmount(_)));
        assert_matches!(".".parse::<UiAmount>(), Err(FaucetError::InvalidAmount(_)));
        assert_matches!("".parse::<UiAmount>(), Err(FaucetError::InvalidAmount(_)));
    }

    #[test]
    fn rejects_overflow() {
        let max: UiAmount = u64::MAX.to_string().parse().unwrap();
        assert_eq!(max.to_base_units(0).unwrap(), u64::MAX);
        assert_matches!(max.to_base_units(1), Err(FaucetError::InvalidAmount(_)));
        assert_matches!(units_err("18446744073709551615.5", 0), Err(FaucetError::InvalidAmount(_)));
        assert_matches!(units_err("1", 255), Err(FaucetError::InvalidAmount(_)));
    }

    fn units_err(s: &str, decimals: u8) -> FaucetResult<u64> {
        s.parse::<UiAmount>()?.to_base_units(decimals)
    }

    #[test]
    fn display_is_canonical() {
        let a: UiAmount = "0012.5000".parse().unwrap();
        assert_eq!(a.to_string(), "12.5");
        let b: UiAmount = "+000".parse().unwrap();
        assert_eq!(b.to_string(), "0");
    }
}
