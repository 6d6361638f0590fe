use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {setting} `{value}`, expected one of: {expected}")]
pub struct ParseSettingError {
    pub setting: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Scalar precision used when reporting elapsed seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 32-bit float
    Single,
    /// 64-bit float
    #[default]
    Double,
}

impl Precision {
    pub fn name(self) -> &'static str {
        match self {
            Precision::Single => "single",
            Precision::Double => "double",
        }
    }
}

impl FromStr for Precision {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "f32" => Ok(Precision::Single),
            "double" | "f64" => Ok(Precision::Double),
            _ => Err(ParseSettingError {
                setting: "precision",
                value: s.to_string(),
                expected: "single, double",
            }),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit elapsed time is printed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayUnit {
    #[default]
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "us")]
    Micros,
    #[serde(rename = "ns")]
    Nanos,
}

impl DisplayUnit {
    /// Factor converting seconds into this unit
    pub fn per_second(self) -> f64 {
        match self {
            DisplayUnit::Seconds => 1.0,
            DisplayUnit::Millis => 1e3,
            DisplayUnit::Micros => 1e6,
            DisplayUnit::Nanos => 1e9,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            DisplayUnit::Seconds => "s",
            DisplayUnit::Millis => "ms",
            DisplayUnit::Micros => "us",
            DisplayUnit::Nanos => "ns",
        }
    }
}

impl FromStr for DisplayUnit {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "seconds" => Ok(DisplayUnit::Seconds),
            "ms" | "millis" => Ok(DisplayUnit::Millis),
            "us" | "micros" => Ok(DisplayUnit::Micros),
            "ns" | "nanos" => Ok(DisplayUnit::Nanos),
            _ => Err(ParseSettingError {
                setting: "unit",
                value: s.to_string(),
                expected: "s, ms, us, ns",
            }),
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
