//! Exact sample volumes.
//!
//! Volumes are summed recursively over delivery trees and recomputed after
//! every edit, so they are kept as fixed-point thousandths instead of floats.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};
use core::str::FromStr;

use crate::TnError;

/// Number of stored units per whole volume unit.
const SCALE: u64 = 1000;
const DECIMALS: usize = 3;

/// Non-negative volume with three exact decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Volume(u64);

impl Volume {
    pub const ZERO: Volume = Volume(0);

    /// Whole units, e.g. `Volume::units(5)` is `5`.
    pub const fn units(units: u64) -> Self {
        Self(units * SCALE)
    }

    /// Thousandths of a unit, e.g. `Volume::from_milli(2500)` is `2.5`.
    pub const fn from_milli(milli: u64) -> Self {
        Self(milli)
    }

    pub const fn milli(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for Volume {
    type Output = Volume;

    fn add(self, rhs: Self) -> Self::Output {
        Volume(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Volume {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Volume {
    fn sum<I: Iterator<Item = Volume>>(iter: I) -> Self {
        iter.fold(Volume::ZERO, Add::add)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Volume {
    type Err = TnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = |reason| TnError::InvalidVolume {
            text: text.to_string(),
            reason,
        };

        if text.is_empty() {
            return Err(invalid("empty"));
        }
        if text.starts_with('-') {
            return Err(invalid("must be non-negative"));
        }

        let (whole, frac) = match text.split_once('.') {
            Some((w, f)) => (w, f),
            None => (text, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("no digits"));
        }
        if frac.len() > DECIMALS {
            return Err(invalid("more than three decimals"));
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(invalid("not a decimal number"));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("too large"))?
        };
        let mut frac_milli = 0_u64;
        for (i, b) in frac.bytes().enumerate() {
            frac_milli += u64::from(b - b'0') * 10_u64.pow((DECIMALS - 1 - i) as u32);
        }

        whole
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_milli))
            .map(Volume)
            .ok_or_else(|| invalid("too large"))
    }
}

impl From<Volume> for String {
    fn from(v: Volume) -> Self {
        v.to_string()
    }
}

impl TryFrom<String> for Volume {
    type Error = TnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
