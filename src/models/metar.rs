//! METAR report model
//!
//! A METAR is a routine current-conditions report: station and observation
//! time, the shared weather container, METAR-only groups (temperature,
//! altimeter, runway state) and nested TEMPO/BECMG trend groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DistanceUnit, TimeIndicator, ValueIndicator, WeatherChangeType, WeatherContainer};
use crate::dates;
use crate::{Error, Result};

/// Expected runway range evolution code (U up, D down, N no change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunwayTrend {
    Up,
    Down,
    NoChange,
}

impl std::str::FromStr for RunwayTrend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "U" => Ok(Self::Up),
            "D" => Ok(Self::Down),
            "N" => Ok(Self::NoChange),
            _ => Err(Error::unknown_code("runway trend", s)),
        }
    }
}

/// Runway visual range record (R06/0800V1200U and friends).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayInfo {
    /// Runway designator, e.g. "06" or "26L"
    pub name: String,

    /// Greater-than / less-than qualifier on the minimum range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<ValueIndicator>,

    /// Minimum (or only) visual range
    pub min_range: u32,

    /// Maximum visual range for varying reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_range: Option<u32>,

    /// Expected evolution of the range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<RunwayTrend>,

    /// Meters unless the group carries an FT suffix
    pub unit: DistanceUnit,
}

/// Time indicator token inside a METAR trend (AT1300, FM1030, TL1800).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetarTrendTime {
    pub indicator: TimeIndicator,
    pub hour: u32,
    pub minute: u32,
}

/// Nested TEMPO/BECMG trend group inside a METAR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetarTrend {
    /// TEMPO or BECMG
    #[serde(rename = "type")]
    pub change_type: WeatherChangeType,

    /// AT/FM/TL markers in token order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub times: Vec<MetarTrendTime>,

    #[serde(flatten)]
    pub weather: WeatherContainer,

    /// Raw source span of the trend group
    pub raw: String,
}

/// A fully decoded METAR report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metar {
    /// Reporting station identifier (ICAO code)
    pub station: String,

    /// Day of month of the observation
    pub day: u32,

    /// Hour of the observation (UTC)
    pub hour: u32,

    /// Minute of the observation
    pub minute: u32,

    /// Air temperature in degrees Celsius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,

    /// Dew point in degrees Celsius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<i32>,

    /// Altimeter setting in hectopascals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altimeter: Option<f64>,

    /// No significant change expected
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nosig: bool,

    /// Fully automated report
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub auto: bool,

    /// Missing report marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nil: bool,

    /// Runway visual range records in report order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub runways: Vec<RunwayInfo>,

    /// TEMPO/BECMG trends in report order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub trends: Vec<MetarTrend>,

    #[serde(flatten)]
    pub weather: WeatherContainer,

    /// The full report text the METAR was decoded from
    pub message: String,
}

impl Metar {
    /// Resolve the report's day/hour/minute against a reference instant,
    /// picking the absolute observation time nearest to it.
    pub fn issued(&self, reference: DateTime<Utc>) -> DateTime<Utc> {
        dates::resolve_issued(reference, Some(self.day), Some(self.hour), self.minute)
    }
}
