//! TAF report model
//!
//! A TAF is a multi-period aerodrome forecast: an issuance header with a
//! validity window, the shared weather container for the initial conditions,
//! and one trend group per change line (FM, BECMG, TEMPO, PROB, INTER).

use serde::{Deserialize, Serialize};

use super::{WeatherChangeType, WeatherContainer};

/// Start/end validity window of a TAF or of a bounded trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub start_day: u32,
    pub start_hour: u32,
    pub end_day: u32,
    pub end_hour: u32,
}

/// Start-only validity of an FM trend (FMddhhmm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartValidity {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Validity of a trend group. FM trends carry only a start instant; every
/// other change type carries a start/end window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendValidity {
    Window(Validity),
    Start(StartValidity),
}

/// Forecast maximum or minimum temperature with its occurrence time
/// (TX15/1518Z, TN08/1506Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureDated {
    /// Temperature in degrees Celsius
    pub temperature: i32,
    pub day: u32,
    pub hour: u32,
}

/// One change line of a TAF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TafTrend {
    #[serde(rename = "type")]
    pub change_type: WeatherChangeType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<TrendValidity>,

    /// Probability in percent for PROB-introduced trends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u32>,

    #[serde(flatten)]
    pub weather: WeatherContainer,

    /// Raw source text of this change line, verbatim
    pub raw: String,
}

/// A fully decoded TAF report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taf {
    /// Forecast station identifier (ICAO code)
    pub station: String,

    /// Day of month of the issuance token; some TAFs omit it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,

    /// Hour of the issuance token (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,

    /// Minute of the issuance token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,

    /// Overall forecast validity window
    pub validity: Validity,

    /// Forecast maximum temperature (TX group)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<TemperatureDated>,

    /// Forecast minimum temperature (TN group)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<TemperatureDated>,

    /// Amended forecast (AMD)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub amendment: bool,

    /// Corrected forecast (COR)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub correction: bool,

    /// Cancelled forecast (CNL)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,

    /// Raw text of the initial (header) line
    pub initial_raw: String,

    /// The full report text the TAF was decoded from
    pub message: String,

    /// Change lines in source order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub trends: Vec<TafTrend>,

    #[serde(flatten)]
    pub weather: WeatherContainer,
}
