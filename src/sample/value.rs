use serde::{Serialize, Deserialize};

use std::fmt;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::constants::MISSING_VALUE;


/// A single attribute value of a record.
/// Nominal values are strings, numeric values are `f64`.
/// The nominal value `"-"` marks a missing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Continuous value.
    Numeric(f64),
    /// Categorical value.
    Nominal(String),
}


impl Value {
    /// Returns the missing-value sentinel.
    #[inline]
    pub fn missing() -> Self {
        Self::Nominal(MISSING_VALUE.to_string())
    }


    /// Returns `true` if `self` is the missing-value sentinel.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Nominal(s) if s == MISSING_VALUE)
    }


    /// Returns the numeric value, if any.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(x) => Some(*x),
            Self::Nominal(_) => None,
        }
    }


    /// Returns the nominal value, if any.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Nominal(s) => Some(s.as_str()),
        }
    }


    /// `-0.0` and `0.0` must compare and hash as the same key.
    #[inline(always)]
    fn bits(x: f64) -> u64 {
        if x == 0f64 { 0f64.to_bits() } else { x.to_bits() }
    }
}


impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => {
                Self::bits(*a) == Self::bits(*b)
            },
            (Self::Nominal(a), Self::Nominal(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}


impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Numeric(x) => {
                0u8.hash(state);
                Self::bits(*x).hash(state);
            },
            Self::Nominal(s) => {
                1u8.hash(state);
                s.hash(state);
            },
        }
    }
}


impl PartialOrd for Value {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


/// Numeric values come first, ordered by `f64::total_cmp`,
/// then nominal values in lexicographic order.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => {
                f64::from_bits(Self::bits(*a))
                    .total_cmp(&f64::from_bits(Self::bits(*b)))
            },
            (Self::Numeric(_), Self::Nominal(_)) => Ordering::Less,
            (Self::Nominal(_), Self::Numeric(_)) => Ordering::Greater,
            (Self::Nominal(a), Self::Nominal(b)) => a.cmp(b),
        }
    }
}


impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(x) => write!(f, "{x}"),
            Self::Nominal(s) => write!(f, "{s}"),
        }
    }
}


impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Nominal(value.to_string())
    }
}


impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Nominal(value)
    }
}


impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}


impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Numeric(value as f64)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_missing_sentinel() {
        assert!(Value::missing().is_missing());
        assert!(Value::from("-").is_missing());
        assert!(!Value::from("Alta").is_missing());
        assert!(!Value::from(0.0).is_missing());
    }

    #[test]
    fn test_signed_zero_is_one_key() {
        let mut set = HashSet::new();
        set.insert(Value::from(0.0));
        set.insert(Value::from(-0.0));
        assert_eq!(set.len(), 1);
        assert_eq!(Value::from(0.0), Value::from(-0.0));
    }

    #[test]
    fn test_order() {
        let mut values = vec![
            Value::from("b"),
            Value::from(3.5),
            Value::from("a"),
            Value::from(-1),
        ];
        values.sort();
        let exp = vec![
            Value::from(-1),
            Value::from(3.5),
            Value::from("a"),
            Value::from("b"),
        ];
        assert_eq!(exp, values, "expected {exp:?}, got {values:?}.");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(1.0).to_string(), "1");
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::from("Yes").to_string(), "Yes");
    }
}
