//! Fraction normalization: parsing, gcd reduction and mixed-number decomposition
//!
//! Everything here is pure. The denominator of a [`Fraction`] is always
//! positive, so the sign of the value lives in the numerator alone.

use std::cmp::Ordering;
use std::fmt;
use std::num::{IntErrorKind, NonZeroU64};
use std::str::FromStr;

use num_integer::Integer;

use super::error::{FractionError, Result};

/// A signed, possibly improper fraction with a positive denominator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: NonZeroU64,
}

/// Absolute value of a fraction reduced to lowest terms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SimplifiedFraction {
    pub numerator: u64,
    pub denominator: NonZeroU64,
}

/// Whole-number-plus-proper-fraction view of a [`Fraction`]
///
/// `whole * denominator + remainder` equals the absolute numerator and
/// `remainder < denominator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MixedForm {
    pub negative: bool,
    pub whole: u64,
    pub remainder: u64,
    pub denominator: NonZeroU64,
}

fn parse_int(token: &str) -> Result<i64> {
    token.trim().parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => FractionError::Overflow,
        _ => FractionError::NotInteger,
    })
}

impl Fraction {
    /// Build a fraction from raw parts, moving a negative sign off the denominator
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        let Some(den) = NonZeroU64::new(denominator.unsigned_abs()) else {
            return Err(FractionError::ZeroDenominator);
        };
        let numerator = if denominator < 0 {
            numerator.checked_neg().ok_or(FractionError::Overflow)?
        } else {
            numerator
        };
        Ok(Self {
            numerator,
            denominator: den,
        })
    }

    /// Read `"N/D"` or `"N D"`
    ///
    /// A slash anywhere in the input selects the slash form; otherwise the
    /// input is split on whitespace. Either way exactly two tokens must remain.
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        let (num, den) = if s.contains('/') {
            let mut parts = s.split('/');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(n), Some(d), None) => (n, d),
                _ => return Err(FractionError::SLASH_FORMAT),
            }
        } else {
            let mut parts = s.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(n), Some(d), None) => (n, d),
                _ => return Err(FractionError::SPACE_FORMAT),
            }
        };

        let numerator = parse_int(num)?;
        let denominator = parse_int(den)?;
        let fraction = Self::new(numerator, denominator)?;
        log::debug!("Parsed {:?} as {}", input, fraction);
        Ok(fraction)
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator.get()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Reduce `|numerator| / denominator` by their gcd
    pub fn simplify(&self) -> SimplifiedFraction {
        SimplifiedFraction::reduce(self.numerator.unsigned_abs(), self.denominator)
    }

    /// Split into sign, whole part and remainder
    pub fn to_mixed(&self) -> MixedForm {
        let an = self.numerator.unsigned_abs();
        let d = self.denominator.get();
        MixedForm {
            negative: self.is_negative(),
            whole: an / d,
            remainder: an % d,
            denominator: self.denominator,
        }
    }

    /// Exact sum over the least common multiple of both denominators
    ///
    /// The result is not reduced, so `1/4 + 1/4` is `2/4`.
    pub fn checked_add(&self, other: &Fraction) -> Result<Fraction> {
        let (d1, d2) = (self.denominator.get(), other.denominator.get());
        let lcm = (d1 as u128).lcm(&(d2 as u128));
        let n1 = self.numerator as i128 * (lcm / d1 as u128) as i128;
        let n2 = other.numerator as i128 * (lcm / d2 as u128) as i128;

        let numerator = n1
            .checked_add(n2)
            .and_then(|n| i64::try_from(n).ok())
            .ok_or(FractionError::Overflow)?;
        let denominator = u64::try_from(lcm)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(FractionError::Overflow)?;
        Ok(Fraction {
            numerator,
            denominator,
        })
    }

    /// Compare by value rather than by representation (`1/2` equals `2/4`)
    pub fn cmp_value(&self, other: &Fraction) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator.get() as i128;
        let rhs = other.numerator as i128 * self.denominator.get() as i128;
        lhs.cmp(&rhs)
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator.get() as f64
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl SimplifiedFraction {
    /// Divide both parts by their gcd
    pub fn reduce(numerator: u64, denominator: NonZeroU64) -> Self {
        let g = numerator.gcd(&denominator.get());
        // g divides a non-zero denominator, so it is at least 1 and the quotient stays non-zero
        let denominator = NonZeroU64::new(denominator.get() / g).unwrap_or(NonZeroU64::MIN);
        Self {
            numerator: numerator / g,
            denominator,
        }
    }
}

impl TryFrom<SimplifiedFraction> for Fraction {
    type Error = FractionError;

    fn try_from(value: SimplifiedFraction) -> Result<Self> {
        let numerator = i64::try_from(value.numerator).map_err(|_| FractionError::Overflow)?;
        Ok(Fraction {
            numerator,
            denominator: value.denominator,
        })
    }
}

impl fmt::Display for SimplifiedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl MixedForm {
    pub fn sign(&self) -> &'static str {
        if self.negative { "-" } else { "" }
    }

    /// Remainder over the denominator in lowest terms, `0/1` when there is none
    pub fn reduced_remainder(&self) -> SimplifiedFraction {
        if self.remainder == 0 {
            SimplifiedFraction {
                numerator: 0,
                denominator: NonZeroU64::MIN,
            }
        } else {
            SimplifiedFraction::reduce(self.remainder, self.denominator)
        }
    }
}

impl fmt::Display for MixedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = self.sign();
        if self.remainder == 0 {
            write!(f, "{sign}{}", self.whole)
        } else if self.whole == 0 {
            write!(f, "{sign}{}/{}", self.remainder, self.denominator)
        } else {
            write!(
                f,
                "{sign}{} {}/{}",
                self.whole, self.remainder, self.denominator
            )
        }
    }
}
