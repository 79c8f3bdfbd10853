use std::ops::{RangeFrom, RangeInclusive, RangeToInclusive};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound used when a range leaves `max` unspecified (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Closed integer interval `[min, max]` used for integer values, string
/// lengths, array lengths and object widths.
///
/// A single integer means `min = max`; an absent range (`Range::default()`)
/// means `[0, MAX_SAFE_INTEGER]`; a partial bound keeps the default for the
/// missing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RangeRepr", into = "RangeRepr")]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn exact(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub const fn at_least(min: i64) -> Self {
        Self {
            min,
            max: MAX_SAFE_INTEGER,
        }
    }

    pub const fn at_most(max: i64) -> Self {
        Self { min: 0, max }
    }

    /// Checks `min <= max`.
    pub fn validate(self, ctx: &str) -> Result<Self> {
        if self.min > self.max {
            return Err(Error::InvalidRange(format!(
                "{ctx}: min must be <= max (got {}..={})",
                self.min, self.max
            )));
        }
        Ok(self)
    }

    /// Checks `0 <= min <= max`, as required for lengths and widths.
    pub fn validate_length(self, ctx: &str) -> Result<Self> {
        let range = self.validate(ctx)?;
        if range.min < 0 {
            return Err(Error::InvalidRange(format!(
                "{ctx}: length must be >= 0 (got min {})",
                range.min
            )));
        }
        Ok(range)
    }

    /// Shifts both bounds down by `amount`, clamping at zero.
    pub fn shrink_by(self, amount: i64) -> Self {
        Self {
            min: self.min.saturating_sub(amount).max(0),
            max: self.max.saturating_sub(amount).max(0),
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0, MAX_SAFE_INTEGER)
    }
}

macro_rules! range_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Range {
                fn from(value: $ty) -> Self {
                    Self::exact(value as i64)
                }
            }

            impl From<RangeInclusive<$ty>> for Range {
                fn from(value: RangeInclusive<$ty>) -> Self {
                    Self::new(*value.start() as i64, *value.end() as i64)
                }
            }

            impl From<RangeFrom<$ty>> for Range {
                fn from(value: RangeFrom<$ty>) -> Self {
                    Self::at_least(value.start as i64)
                }
            }

            impl From<RangeToInclusive<$ty>> for Range {
                fn from(value: RangeToInclusive<$ty>) -> Self {
                    Self::at_most(value.end as i64)
                }
            }

            impl From<($ty, $ty)> for Range {
                fn from((min, max): ($ty, $ty)) -> Self {
                    Self::new(min as i64, max as i64)
                }
            }
        )*
    };
}

range_from_int!(i32, i64, u32);

impl From<usize> for Range {
    fn from(value: usize) -> Self {
        Self::exact(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<Option<Range>> for Range {
    fn from(value: Option<Range>) -> Self {
        value.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RangeRepr {
    Exact(i64),
    Bounds {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
}

impl From<RangeRepr> for Range {
    fn from(repr: RangeRepr) -> Self {
        match repr {
            RangeRepr::Exact(value) => Range::exact(value),
            RangeRepr::Bounds { min, max } => Range::new(
                min.unwrap_or(0),
                max.unwrap_or(MAX_SAFE_INTEGER),
            ),
        }
    }
}

impl From<Range> for RangeRepr {
    fn from(range: Range) -> Self {
        RangeRepr::Bounds {
            min: Some(range.min),
            max: Some(range.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_range_spans_zero_to_max_safe_integer() {
        let range = Range::default();
        assert_eq!(range.min, 0);
        assert_eq!(range.max, MAX_SAFE_INTEGER);
        assert_eq!(Range::from(None::<Range>), range);
    }

    #[test]
    fn conversions_follow_bounds() {
        assert_eq!(Range::from(5), Range::new(5, 5));
        assert_eq!(Range::from(1..=3), Range::new(1, 3));
        assert_eq!(Range::from(7..), Range::new(7, MAX_SAFE_INTEGER));
        assert_eq!(Range::from(..=9), Range::new(0, 9));
        assert_eq!(Range::from((-2_i64, 2_i64)), Range::new(-2, 2));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let err = Range::new(10, 1).validate("int").unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
        assert!(Range::new(-5, -5).validate("int").is_ok());
    }

    #[test]
    fn validate_length_rejects_negative_min() {
        assert!(Range::new(-1, 3).validate_length("array").is_err());
        assert!(Range::new(0, 0).validate_length("array").is_ok());
    }

    #[test]
    fn shrink_by_clamps_at_zero() {
        assert_eq!(Range::new(0, 4).shrink_by(1), Range::new(0, 3));
        assert_eq!(Range::new(1, 1).shrink_by(1), Range::new(0, 0));
    }
}
