//! # Property notifications and their payload values.
//!
//! - [`PropertyChanging`] is raised **before** a write and can be cancelled.
//! - [`PropertyChanged`] is raised **after** a write (and for every derived
//!   property whose value moved).
//! - [`Value`] carries the new value without tying the channel to one type.
//!
//! ## Example
//! ```rust
//! use eventvisor::{PropertyChanging, Value};
//!
//! let ev = PropertyChanging::new("age", 12u32);
//! assert_eq!(ev.name(), "age");
//! assert_eq!(ev.value().as_int(), Some(12));
//!
//! ev.cancel();
//! assert!(ev.is_cancelled());
//! assert_eq!(Value::from(true).to_string(), "true");
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

/// Dynamically-typed property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(Arc<str>),
}

impl Value {
    /// Returns the value as `bool`, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Returns the value as `f64` for any numeric variant.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            Value::UInt(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(&**s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! value_from_int {
    ($variant:ident => $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v.into())
                }
            }
        )+
    };
}

value_from_int!(Int => i8, i16, i32, i64);
value_from_int!(UInt => u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(v: Arc<str>) -> Self {
        Value::Text(v)
    }
}

/// Pre-write notification; any subscriber may cancel the write.
///
/// The cancellation flag is set through `&self`, so handlers receive the
/// notification by shared reference like every other payload.
#[derive(Debug)]
pub struct PropertyChanging {
    name: Arc<str>,
    value: Value,
    cancelled: AtomicBool,
}

impl PropertyChanging {
    /// Creates a notification for a proposed write of `value` to `name`.
    pub fn new(name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Property being written.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Proposed new value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Vetoes the write. Cannot be undone.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, AtomicOrdering::Release);
    }

    /// True once any subscriber has vetoed the write.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(AtomicOrdering::Acquire)
    }
}

/// Post-write notification.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChanged {
    /// Property (or derived property) that changed.
    pub name: Arc<str>,
    /// Its new value.
    pub value: Value,
}

impl PropertyChanged {
    /// Creates a notification that `name` now holds `value`.
    pub fn new(name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for PropertyChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(20u32), Value::UInt(20));
        assert_eq!(Value::from(-3i32), Value::Int(-3));
        assert_eq!(Value::from("Ann"), Value::Text("Ann".into()));
        assert_eq!(Value::from(20u32).as_int(), Some(20));
        assert_eq!(Value::UInt(u64::MAX).as_int(), None);
        assert_eq!(Value::from(1.5f64).as_float(), Some(1.5));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(true).as_int(), None);
        assert_eq!(Value::from("x").as_text(), Some("x"));
    }

    #[test]
    fn test_changing_cancel_is_sticky() {
        let ev = PropertyChanging::new("age", 12u32);
        assert!(!ev.is_cancelled());
        ev.cancel();
        ev.cancel();
        assert!(ev.is_cancelled());
    }

    #[test]
    fn test_changed_display() {
        assert_eq!(PropertyChanged::new("age", 20u32).to_string(), "age=20");
        assert_eq!(PropertyChanged::new("can_vote", true).to_string(), "can_vote=true");
        assert_eq!(PropertyChanged::new("name", "Ann").to_string(), "name=\"Ann\"");
    }
}
