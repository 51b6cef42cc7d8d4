//! Event types.
//!
//! An `Event` is stored exactly as the caller supplied it: `date`, `time` and
//! `file` are kept as whatever JSON value was written (usually text) and only
//! parsed on demand by the helpers below.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DaybookError, DaybookResult};
use crate::locale::{self, Priority};

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub time: FieldValue,
    pub date: FieldValue,
    pub priority: PriorityLevel,
    pub file: Option<FieldValue>,
}

impl Event {
    /// Parse `date` as YYYY-MM-DD. A full RFC 3339 timestamp is accepted too,
    /// in which case its date part is used. A number is read as epoch
    /// milliseconds (UTC).
    pub fn naive_date(&self) -> DaybookResult<NaiveDate> {
        match &self.date {
            FieldValue::Text(s) => parse_date(s),
            FieldValue::Other(serde_json::Value::Number(n)) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| DaybookError::InvalidDate(n.to_string())),
            other => Err(DaybookError::InvalidDate(other.to_string())),
        }
    }

    /// Parse `time` as HH:MM (seconds optional).
    pub fn naive_time(&self) -> DaybookResult<NaiveTime> {
        match self.time.as_text() {
            Some(s) => parse_time(s),
            None => Err(DaybookError::InvalidTime(self.time.to_string())),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

pub fn parse_date(s: &str) -> DaybookResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| DaybookError::InvalidDate(s.to_string()))
}

pub fn parse_time(s: &str) -> DaybookResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| DaybookError::InvalidTime(s.to_string()))
}

/// A stored field value: text in every record the CLI writes, but any JSON
/// value another writer put there is kept and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Other(_) => None,
        }
    }

    /// Empty text or `null`.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Other(v) => v.is_null(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Other(serde_json::Value::Null) => Ok(()),
            FieldValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

/// Event identifier, usually a number or a string.
///
/// Serialized untagged, so `1` and `"1"` stay distinct on disk. Ids of any
/// other JSON shape (`1.5`, numbers past `i64`) land in `Other` and are
/// written back as they were read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl EventId {
    /// Loose comparison used when an id comes back from a drag payload as
    /// text. Text is read as a number the way a browser coerces it, so
    /// `Number(1)` matches `"1"`, `" 1 "`, `"1.0"`, `"1e0"` and `"0x1"`.
    pub fn loosely_matches(&self, other: &EventId) -> bool {
        match (self, other) {
            (EventId::Number(a), EventId::Number(b)) => a == b,
            (EventId::Text(a), EventId::Text(b)) => a == b,
            (EventId::Text(s), n) | (n, EventId::Text(s)) => match n.as_f64() {
                Some(n) => coerce_number(s) == Some(n),
                None => false,
            },
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => a == b,
            },
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            EventId::Number(n) => Some(*n as f64),
            EventId::Other(serde_json::Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }
}

/// Numeric value of a string under browser coercion rules: surrounding
/// whitespace is ignored, blank is zero, `0x`/`0o`/`0b` prefixes and
/// exponents are allowed. `None` where the browser would give `NaN`.
fn coerce_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // f64::from_str also takes "inf" and "NaN", which the browser does not
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    s.parse::<f64>().ok()
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => write!(f, "{}", s),
            EventId::Other(v) => write!(f, "{}", v),
        }
    }
}

impl FromStr for EventId {
    type Err = std::convert::Infallible;

    /// Canonical decimal integers become `Number`, anything else `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => Ok(EventId::Number(n)),
            _ => Ok(EventId::Text(s.to_string())),
        }
    }
}

impl From<i64> for EventId {
    fn from(n: i64) -> Self {
        EventId::Number(n)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Text(s.to_string())
    }
}

/// Reference to one of the fixed priority levels (1-6).
///
/// Written as the `{ "id": n, "color": "#RRGGBB" }` object; a bare level
/// number is accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriorityLevel(u8);

impl PriorityLevel {
    pub fn new(id: u8) -> DaybookResult<Self> {
        if locale::priority(id).is_some() {
            Ok(PriorityLevel(id))
        } else {
            Err(DaybookError::InvalidPriority(id))
        }
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn info(&self) -> &'static Priority {
        // Construction guarantees the level exists
        &locale::PRIORITIES[(self.0 - 1) as usize]
    }

    pub fn color(&self) -> &'static str {
        self.info().color
    }
}

impl Default for PriorityLevel {
    fn default() -> Self {
        PriorityLevel(1)
    }
}

impl Serialize for PriorityLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.info().serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriorityRepr {
    Level(u8),
    Object { id: u8 },
}

impl<'de> Deserialize<'de> for PriorityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = match PriorityRepr::deserialize(deserializer)? {
            PriorityRepr::Level(id) | PriorityRepr::Object { id } => id,
        };
        PriorityLevel::new(id).map_err(serde::de::Error::custom)
    }
}
