use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::{ClientError, ClientResult};

/// Largest magnitude, in cents, that survives a trip through an `f64`
/// without losing whole cents.
const MAX_CENTS: i64 = 9_000_000_000_000_000;

/// A signed fixed-point money value stored as whole cents.
///
/// Arithmetic is exact; rounding to two decimals only happens when a raw
/// user value is converted in. Serialized as a JSON number with at most two
/// decimals so stored ledgers stay readable by other tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a value in major units to the nearest cent of its binary
    /// `f64` value. Inputs that sit exactly on a half cent in decimal may be
    /// stored just below it (`1.005` becomes `1.00`). Returns `None` for NaN,
    /// infinities, and magnitudes too large to hold exactly.
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * 100.0).round();
        if scaled.abs() > MAX_CENTS as f64 {
            return None;
        }
        Some(Self(scaled as i64))
    }

    pub fn as_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Exact sum, or `None` when the result leaves the range
    /// [`Amount::from_major`] accepts.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0
            .checked_add(rhs.0)
            .filter(|cents| cents.unsigned_abs() <= MAX_CENTS.unsigned_abs())
            .map(Self)
    }
}

/// Coerces raw user input to a number, rejecting anything that is not a
/// finite decimal value.
pub fn parse_raw_amount(raw: &str) -> ClientResult<f64> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ClientError::invalid_amount(raw))?;
    if !value.is_finite() {
        return Err(ClientError::invalid_amount(raw));
    }
    Ok(value)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

// `+` saturates at the `i64` bounds so totals over a stored ledger never
// wrap. Writes go through `checked_add` and keep sums inside `MAX_CENTS`.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Amount::from_major(value)
            .ok_or_else(|| de::Error::custom(format!("amount `{value}` is out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Amount, parse_raw_amount};

    #[test]
    fn from_major_rounds_to_cents() {
        assert_eq!(Amount::from_major(12.345), Some(Amount::from_cents(1235)));
        assert_eq!(Amount::from_major(-0.004), Some(Amount::from_cents(0)));
        assert_eq!(Amount::from_major(0.1 + 0.2), Some(Amount::from_cents(30)));
    }

    #[test]
    fn from_major_rounds_the_binary_value_not_the_decimal_text() {
        assert_eq!(Amount::from_major(1.005), Some(Amount::from_cents(100)));
        assert_eq!(Amount::from_major(0.285), Some(Amount::from_cents(28)));
    }

    #[test]
    fn checked_add_stays_within_representable_range() {
        let near_limit = Amount::from_cents(8_900_000_000_000_000);
        assert_eq!(
            near_limit.checked_add(Amount::from_cents(100_000_000_000_000)),
            Some(Amount::from_cents(9_000_000_000_000_000))
        );
        assert_eq!(near_limit.checked_add(near_limit), None);
        assert_eq!((-near_limit).checked_add(-near_limit), None);
        assert_eq!(
            near_limit.checked_add(-near_limit),
            Some(Amount::ZERO)
        );
    }

    #[test]
    fn plain_addition_saturates_instead_of_wrapping() {
        let big = Amount::from_cents(i64::MAX - 1);
        assert_eq!(big + Amount::from_cents(10), Amount::from_cents(i64::MAX));

        let mut running = Amount::from_cents(i64::MIN + 1);
        running += Amount::from_cents(-10);
        assert_eq!(running, Amount::from_cents(i64::MIN));

        let total = std::iter::repeat_n(Amount::from_cents(8_900_000_000_000_000), 1_100)
            .sum::<Amount>();
        assert_eq!(total, Amount::from_cents(i64::MAX));
    }

    #[test]
    fn from_major_rejects_non_finite_and_huge_values() {
        assert_eq!(Amount::from_major(f64::NAN), None);
        assert_eq!(Amount::from_major(f64::INFINITY), None);
        assert_eq!(Amount::from_major(1e300), None);
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::from_cents(75_000).to_string(), "750.00");
        assert_eq!(Amount::from_cents(-25_005).to_string(), "-250.05");
        assert_eq!(Amount::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn parse_raw_amount_rejects_text_and_non_finite_input() {
        assert!(parse_raw_amount("abc").is_err());
        assert!(parse_raw_amount("").is_err());
        assert!(parse_raw_amount("NaN").is_err());
        assert!(parse_raw_amount("inf").is_err());

        let parsed = parse_raw_amount(" 42.15 ");
        assert!(parsed.is_ok());
        if let Ok(value) = parsed {
            assert!((value - 42.15).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn serializes_as_json_number() {
        let encoded = serde_json::to_string(&Amount::from_cents(-25_050));
        assert!(encoded.is_ok());
        if let Ok(text) = encoded {
            assert_eq!(text, "-250.5");
        }

        let decoded = serde_json::from_str::<Amount>("1000");
        assert!(decoded.is_ok());
        if let Ok(amount) = decoded {
            assert_eq!(amount, Amount::from_cents(100_000));
        }

        assert!(serde_json::from_str::<Amount>("null").is_err());
    }
}
