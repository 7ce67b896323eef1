//! Decimal compiler levels (`1.5`, `1.8`, `11`).
//!
//! A `Level` remembers the scale it was written with, so `1.50` renders back as `1.50` while
//! still comparing equal to `1.5`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelParseError {
    #[error("empty decimal")]
    Empty,

    #[error("invalid decimal: {0:?}")]
    Invalid(String),

    #[error("decimal exponent out of range: {0:?}")]
    ExponentOutOfRange(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Level {
    negative: bool,
    /// Unscaled magnitude, no leading zeros, `"0"` for zero.
    digits: String,
    scale: i64,
}

impl Level {
    /// `unscaled * 10^-scale`.
    pub fn from_unscaled(unscaled: u64, scale: i64) -> Self {
        Self {
            negative: false,
            digits: unscaled.to_string(),
            scale,
        }
    }

    fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    fn signum(&self) -> i8 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// Position of the most significant digit relative to the decimal point.
    fn adjusted_exponent(&self) -> i64 {
        self.digits.len() as i64 - 1 - self.scale
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        self.adjusted_exponent()
            .cmp(&other.adjusted_exponent())
            .then_with(|| {
                let width = self.digits.len().max(other.digits.len());
                let a = format!("{:0<width$}", self.digits);
                let b = format!("{:0<width$}", other.digits);
                a.cmp(&b)
            })
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(LevelParseError::Empty);
        }
        let invalid = || LevelParseError::Invalid(s.to_string());

        let (negative, body) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty()
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(invalid());
        }

        let exponent: i64 = match exponent {
            None => 0,
            Some(e) => {
                let unsigned = e.strip_prefix(['+', '-']).unwrap_or(e);
                if unsigned.is_empty() || !all_digits(unsigned) {
                    return Err(invalid());
                }
                e.parse::<i32>()
                    .map(i64::from)
                    .map_err(|_| LevelParseError::ExponentOutOfRange(s.to_string()))?
            }
        };

        let scale = frac_part.len() as i64 - exponent;

        let joined = format!("{int_part}{frac_part}");
        let trimmed = joined.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };

        Ok(Self {
            negative,
            digits: digits.to_string(),
            scale,
        })
    }
}

impl TryFrom<String> for Level {
    type Error = LevelParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(value: Level) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.signum() < 0 {
            f.write_str("-")?;
        }

        let coeff = self.digits.as_str();
        let adjusted = self.adjusted_exponent();

        if self.scale >= 0 && adjusted >= -6 {
            let scale = self.scale as usize;
            if scale == 0 {
                f.write_str(coeff)
            } else if coeff.len() > scale {
                let (int, frac) = coeff.split_at(coeff.len() - scale);
                write!(f, "{int}.{frac}")
            } else {
                write!(f, "0.{}{coeff}", "0".repeat(scale - coeff.len()))
            }
        } else {
            let (first, rest) = coeff.split_at(1);
            f.write_str(first)?;
            if !rest.is_empty() {
                write!(f, ".{rest}")?;
            }
            if adjusted != 0 {
                f.write_str("E")?;
                if adjusted > 0 {
                    f.write_str("+")?;
                }
                write!(f, "{adjusted}")?;
            }
            Ok(())
        }
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.signum(), other.signum());
        if a != b {
            return a.cmp(&b);
        }
        match a {
            0 => Ordering::Equal,
            1 => self.cmp_magnitude(other),
            _ => other.cmp_magnitude(self),
        }
    }
}
