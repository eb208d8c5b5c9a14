//! Cache Key Module
//!
//! Derives deterministic cache keys from a query method name and its
//! normalized arguments, so the same logical request always maps to the
//! same key regardless of call site.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::cache::{KEY_DELIMITER, NULL_TOKEN};

// == Key Argument ==
/// A single query argument in its key-normalized form.
///
/// Timestamps normalize to their calendar day, so two instants on the same
/// day produce the same key. Missing arguments normalize to a fixed token.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyArg {
    /// An instant, keyed by its UTC calendar day (`YYYY-MM-DD`)
    Date(DateTime<Utc>),
    /// A plain calendar day (`YYYY-MM-DD`)
    Day(NaiveDate),
    /// An integer argument (region ids, species ids, page numbers)
    Int(i64),
    /// A free-form string argument
    Text(String),
    /// A missing or null argument
    Null,
}

impl fmt::Display for KeyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyArg::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d")),
            KeyArg::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
            KeyArg::Int(n) => write!(f, "{}", n),
            KeyArg::Text(s) => write!(f, "{}", s),
            KeyArg::Null => write!(f, "{}", NULL_TOKEN),
        }
    }
}

// == Conversions ==
impl From<DateTime<Utc>> for KeyArg {
    fn from(dt: DateTime<Utc>) -> Self {
        KeyArg::Date(dt)
    }
}

impl From<NaiveDate> for KeyArg {
    fn from(day: NaiveDate) -> Self {
        KeyArg::Day(day)
    }
}

impl From<i64> for KeyArg {
    fn from(n: i64) -> Self {
        KeyArg::Int(n)
    }
}

impl From<i32> for KeyArg {
    fn from(n: i32) -> Self {
        KeyArg::Int(n as i64)
    }
}

impl From<&str> for KeyArg {
    fn from(s: &str) -> Self {
        KeyArg::Text(s.to_string())
    }
}

impl From<String> for KeyArg {
    fn from(s: String) -> Self {
        KeyArg::Text(s)
    }
}

impl<T: Into<KeyArg>> From<Option<T>> for KeyArg {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => value.into(),
            None => KeyArg::Null,
        }
    }
}

// == Key Generation ==
/// Builds the cache key for a query method and its arguments.
///
/// The key is the method name followed by each normalized argument, joined
/// with a fixed delimiter. Generation is deterministic and order-sensitive:
/// the same arguments in a different order produce a different key.
///
/// # Example
/// ```
/// use analytics_cache::{generate_key, KeyArg};
///
/// let key = generate_key("getMonthlyReport", &[3.into(), KeyArg::Null]);
/// assert_eq!(key, "getMonthlyReport:3:null");
/// ```
pub fn generate_key(method: &str, args: &[KeyArg]) -> String {
    let mut key = String::from(method);
    for arg in args {
        key.push(KEY_DELIMITER);
        key.push_str(&arg.to_string());
    }
    key
}
