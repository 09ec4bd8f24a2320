//! Reporting period parsing and formatting.
//!
//! Bidirectional conversion between `YYYY-MM` strings and a (year, month)
//! pair. Serialized as the string form.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CbamError;

/// A reporting period (calendar year and month).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Period {
        Period { year, month }
    }

    /// Parse a period from `YYYY-MM` notation. Returns None if the input is
    /// invalid or the month is out of range.
    pub fn parse(text: &str) -> Option<Period> {
        let caps = period_re().captures(text.trim())?;
        let year = caps["year"].parse::<i32>().ok()?;
        let month = caps["month"].parse::<u32>().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Period { year, month })
    }
}

fn period_re() -> &'static Regex {
    static PERIOD_RE: OnceLock<Regex> = OnceLock::new();
    PERIOD_RE.get_or_init(|| {
        Regex::new(r"^(?<year>[0-9]{4})-(?<month>[0-9]{1,2})$")
            .expect("period regex must compile")
    })
}

impl std::str::FromStr for Period {
    type Err = CbamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CbamError::InvalidPeriod(s.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Period::parse(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid period '{}'", text)))
    }
}
