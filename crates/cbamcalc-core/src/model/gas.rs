//! Greenhouse gases the core accounts for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A greenhouse gas an emission source can report in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gas {
    #[serde(rename = "CO2", alias = "co2")]
    Co2,
    #[serde(rename = "CH4", alias = "ch4")]
    Ch4,
    #[serde(rename = "N2O", alias = "n2o")]
    N2o,
    #[serde(rename = "CF4", alias = "cf4")]
    Cf4,
    #[serde(rename = "C2F6", alias = "c2f6")]
    C2f6,
}

impl Gas {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gas::Co2 => "CO2",
            Gas::Ch4 => "CH4",
            Gas::N2o => "N2O",
            Gas::Cf4 => "CF4",
            Gas::C2f6 => "C2F6",
        }
    }

    /// Parse a gas name, case-insensitively. Returns None for names the
    /// core does not track; callers treat those as GWP 1.
    pub fn parse(name: &str) -> Option<Gas> {
        match name.to_ascii_uppercase().as_str() {
            "CO2" => Some(Gas::Co2),
            "CH4" => Some(Gas::Ch4),
            "N2O" => Some(Gas::N2o),
            "CF4" => Some(Gas::Cf4),
            "C2F6" => Some(Gas::C2f6),
            _ => None,
        }
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
