//! Race events offered when entering a result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::ValidationError;

/// A race event. Standard distances plus free-text events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    M1500,
    M3000,
    M5000,
    M10000,
    HalfMarathon,
    Marathon,
    Other(String),
}

impl Event {
    /// The standard events in display order.
    pub const STANDARD: [Self; 6] = [
        Self::M1500,
        Self::M3000,
        Self::M5000,
        Self::M10000,
        Self::HalfMarathon,
        Self::Marathon,
    ];

    /// Label stored in the `section` column.
    pub fn as_str(&self) -> &str {
        match self {
            Self::M1500 => "1500m",
            Self::M3000 => "3000m",
            Self::M5000 => "5000m",
            Self::M10000 => "10000m",
            Self::HalfMarathon => "Half Marathon",
            Self::Marathon => "Marathon",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Event {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" => Err(ValidationError::Empty { field: "event" }),
            "1500m" => Ok(Self::M1500),
            "3000m" => Ok(Self::M3000),
            "5000m" => Ok(Self::M5000),
            "10000m" => Ok(Self::M10000),
            "half marathon" | "half" => Ok(Self::HalfMarathon),
            "marathon" | "full" | "full marathon" => Ok(Self::Marathon),
            _ => Ok(Self::Other(s.to_string())),
        }
    }
}

impl Serialize for Event {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
