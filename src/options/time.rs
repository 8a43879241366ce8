//! Time units accepted by the camera tools and conversion between them.

use crate::error::{CameraError, Result};
use crate::options::validate;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Unit of a time value passed to a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeUnit {
    /// `m`
    Minute,
    /// `s`
    #[default]
    Second,
    /// `ms`
    Millisecond,
    /// `us`
    Microsecond,
}

impl TimeUnit {
    /// All units, largest first.
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Minute,
        TimeUnit::Second,
        TimeUnit::Millisecond,
        TimeUnit::Microsecond,
    ];

    /// Short unit symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Minute => "m",
            TimeUnit::Second => "s",
            TimeUnit::Millisecond => "ms",
            TimeUnit::Microsecond => "us",
        }
    }

    /// Length of one unit in microseconds.
    pub fn micros(self) -> u64 {
        match self {
            TimeUnit::Minute => 60_000_000,
            TimeUnit::Second => 1_000_000,
            TimeUnit::Millisecond => 1_000,
            TimeUnit::Microsecond => 1,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = CameraError;

    fn from_str(s: &str) -> Result<Self> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| CameraError::validation_error(format!("Invalid time unit '{s}'")))
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = CameraError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Convert a positive time value between units.
///
/// The value is first scaled to whole microseconds, then divided into the
/// output unit. Both steps round up, so a non-zero input never becomes zero.
pub fn convert_time_unit(value: f64, from: TimeUnit, to: TimeUnit) -> Result<u64> {
    let value = validate::positive_number("time value", value)?;

    let micros = (value * from.micros() as f64).ceil();
    if micros >= u64::MAX as f64 {
        return Err(CameraError::validation_error(format!(
            "time value {value}{from} is out of range"
        )));
    }

    Ok((micros as u64).div_ceil(to.micros()))
}

/// A value together with its unit, as found in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TimeValue {
    pub value: f64,
    #[serde(default)]
    pub unit: TimeUnit,
}

impl TimeValue {
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub fn seconds(value: f64) -> Self {
        Self::new(value, TimeUnit::Second)
    }

    /// Convert to whole units of `to`, rounding up.
    pub fn to_unit(self, to: TimeUnit) -> Result<u64> {
        convert_time_unit(self.value, self.unit, to)
    }
}
