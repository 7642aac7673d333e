use std::fmt;

use fixed::types::U80F48;
use serde::{Deserialize, Serialize};

use crate::error::{ArithmeticError, SnapshotError};

/// Number of fractional bits in a [`Numeric`].
pub const FRACTIONAL_BITS: u32 = 48;

/// Unsigned fixed-point number with 48 fractional bits, as stored by the
/// boost program in its rewards-factor accumulators.
///
/// The value is `bits / 2^48`. On chain it occupies 16 bytes, little-endian.
/// Products and quotients truncate, never round. Overflow and underflow are
/// reported instead of wrapping.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NumericSnapshot", into = "NumericSnapshot")]
pub struct Numeric {
    value: U80F48,
}

impl Numeric {
    pub const ZERO: Numeric = Numeric {
        value: U80F48::ZERO,
    };
    pub const ONE: Numeric = Numeric { value: U80F48::ONE };

    pub const fn from_bits(bits: u128) -> Self {
        Self {
            value: U80F48::from_bits(bits),
        }
    }

    pub const fn to_bits(self) -> u128 {
        self.value.to_bits()
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self {
            value: U80F48::from_le_bytes(bytes),
        }
    }

    pub const fn to_bytes(self) -> [u8; 16] {
        self.value.to_le_bytes()
    }

    pub const fn from_u64(value: u64) -> Self {
        Self::from_bits((value as u128) << FRACTIONAL_BITS)
    }

    /// `numerator / denominator`, truncated to 48 fractional bits.
    pub fn from_fraction(numerator: u64, denominator: u64) -> Result<Self, ArithmeticError> {
        Self::from_u64(numerator).checked_div(Self::from_u64(denominator))
    }

    /// Integer part, or `Overflow` if it does not fit in a `u64`.
    pub fn try_to_u64(self) -> Result<u64, ArithmeticError> {
        self.value
            .checked_to_num::<u64>()
            .ok_or(ArithmeticError::Overflow)
    }

    /// Integer part, truncating the fraction. Saturates at `u64::MAX`.
    pub fn to_u64(self) -> u64 {
        self.value.saturating_to_num::<u64>()
    }

    /// Lossy conversion for display.
    pub fn to_f64(self) -> f64 {
        self.value.to_num::<f64>()
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.value
            .checked_add(rhs.value)
            .map(|value| Self { value })
            .ok_or(ArithmeticError::Overflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.value
            .checked_sub(rhs.value)
            .map(|value| Self { value })
            .ok_or(ArithmeticError::Underflow)
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.value
            .checked_mul(rhs.value)
            .map(|value| Self { value })
            .ok_or(ArithmeticError::Overflow)
    }

    pub fn checked_div(self, rhs: Self) -> Result<Self, ArithmeticError> {
        if rhs.value == U80F48::ZERO {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.value
            .checked_div(rhs.value)
            .map(|value| Self { value })
            .ok_or(ArithmeticError::Overflow)
    }
}

impl From<u64> for Numeric {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl fmt::Debug for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Numeric({}, bits={})", self.value, self.to_bits())
    }
}

const SNAPSHOT_KIND: &str = "Numeric";

/// Persisted form of a [`Numeric`]: `{ "kind": "Numeric", "bits": "<decimal>" }`.
///
/// The magnitude travels as a decimal string so that no JSON consumer has a
/// chance to round it through a double.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericSnapshot {
    pub kind: String,
    pub bits: String,
}

impl From<Numeric> for NumericSnapshot {
    fn from(value: Numeric) -> Self {
        Self {
            kind: SNAPSHOT_KIND.to_string(),
            bits: value.to_bits().to_string(),
        }
    }
}

impl TryFrom<NumericSnapshot> for Numeric {
    type Error = SnapshotError;

    fn try_from(snapshot: NumericSnapshot) -> Result<Self, Self::Error> {
        if snapshot.kind != SNAPSHOT_KIND {
            return Err(SnapshotError::WrongKind(snapshot.kind));
        }
        // u128::from_str accepts a leading '+', the persisted form never has one.
        if snapshot.bits.is_empty() || !snapshot.bits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SnapshotError::InvalidBits(snapshot.bits));
        }
        snapshot
            .bits
            .parse::<u128>()
            .map(Numeric::from_bits)
            .map_err(|_| SnapshotError::InvalidBits(snapshot.bits))
    }
}
