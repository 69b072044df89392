//! Data models for decoded aviation weather reports
//!
//! This module contains the shared weather container embedded in METAR and
//! TAF reports and their trend groups, together with the enumerated codes
//! (cloud quantities, weather phenomena, units) defined by the ICAO/NOAA
//! report grammar.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, Result};

pub mod metar;
pub mod remark;
pub mod taf;

pub use metar::{Metar, MetarTrend, MetarTrendTime, RunwayInfo, RunwayTrend};
pub use remark::{Remark, RemarkData, SimpleRemark};
pub use taf::{StartValidity, Taf, TafTrend, TemperatureDated, TrendValidity, Validity};

// =============================================================================
// Enumerated report codes
// =============================================================================

/// Cloud cover quantity codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudQuantity {
    /// Sky clear
    Skc,
    /// Few clouds (1-2 oktas)
    Few,
    /// Scattered (3-4 oktas)
    Sct,
    /// Broken (5-7 oktas)
    Bkn,
    /// Overcast (8 oktas)
    Ovc,
    /// No significant clouds
    Nsc,
}

impl FromStr for CloudQuantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SKC" => Ok(Self::Skc),
            "FEW" => Ok(Self::Few),
            "SCT" => Ok(Self::Sct),
            "BKN" => Ok(Self::Bkn),
            "OVC" => Ok(Self::Ovc),
            "NSC" => Ok(Self::Nsc),
            _ => Err(Error::unknown_code("cloud quantity", s)),
        }
    }
}

/// Cloud genus codes reported in cloud groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudType {
    /// Cumulonimbus
    Cb,
    /// Towering cumulus
    Tcu,
    /// Cirrus
    Ci,
    /// Cirrocumulus
    Cc,
    /// Cirrostratus
    Cs,
    /// Altocumulus
    Ac,
    /// Altostratus
    As,
    /// Nimbostratus
    Ns,
    /// Stratocumulus
    Sc,
    /// Stratus
    St,
    /// Cumulus
    Cu,
}

impl FromStr for CloudType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CB" => Ok(Self::Cb),
            "TCU" => Ok(Self::Tcu),
            "CI" => Ok(Self::Ci),
            "CC" => Ok(Self::Cc),
            "CS" => Ok(Self::Cs),
            "AC" => Ok(Self::Ac),
            "AS" => Ok(Self::As),
            "NS" => Ok(Self::Ns),
            "SC" => Ok(Self::Sc),
            "ST" => Ok(Self::St),
            "CU" => Ok(Self::Cu),
            _ => Err(Error::unknown_code("cloud type", s)),
        }
    }
}

/// Weather group intensity or proximity prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    #[serde(rename = "-")]
    Light,
    #[serde(rename = "+")]
    Heavy,
    #[serde(rename = "VC")]
    InVicinity,
    #[serde(rename = "RE")]
    Recent,
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(Self::Light),
            "+" => Ok(Self::Heavy),
            "VC" => Ok(Self::InVicinity),
            "RE" => Ok(Self::Recent),
            _ => Err(Error::unknown_code("intensity", s)),
        }
    }
}

/// Weather descriptive qualifier codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Descriptive {
    /// MI - shallow
    Mi,
    /// PR - partial
    Pr,
    /// BC - patches
    Bc,
    /// DR - low drifting
    Dr,
    /// BL - blowing
    Bl,
    /// SH - showers
    Sh,
    /// TS - thunderstorm
    Ts,
    /// FZ - freezing
    Fz,
}

impl FromStr for Descriptive {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MI" => Ok(Self::Mi),
            "PR" => Ok(Self::Pr),
            "BC" => Ok(Self::Bc),
            "DR" => Ok(Self::Dr),
            "BL" => Ok(Self::Bl),
            "SH" => Ok(Self::Sh),
            "TS" => Ok(Self::Ts),
            "FZ" => Ok(Self::Fz),
            _ => Err(Error::unknown_code("descriptive", s)),
        }
    }
}

/// Weather phenomenon codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phenomenon {
    /// DZ - drizzle
    Dz,
    /// RA - rain
    Ra,
    /// SN - snow
    Sn,
    /// SG - snow grains
    Sg,
    /// IC - ice crystals
    Ic,
    /// PL - ice pellets
    Pl,
    /// GR - hail
    Gr,
    /// GS - small hail or snow pellets
    Gs,
    /// UP - unknown precipitation
    Up,
    /// FG - fog
    Fg,
    /// BR - mist
    Br,
    /// HZ - haze
    Hz,
    /// FU - smoke
    Fu,
    /// VA - volcanic ash
    Va,
    /// DU - widespread dust
    Du,
    /// SA - sand
    Sa,
    /// PO - dust or sand whirls
    Po,
    /// SQ - squall
    Sq,
    /// FC - funnel cloud
    Fc,
    /// SS - sandstorm
    Ss,
    /// DS - duststorm
    Ds,
}

impl FromStr for Phenomenon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DZ" => Ok(Self::Dz),
            "RA" => Ok(Self::Ra),
            "SN" => Ok(Self::Sn),
            "SG" => Ok(Self::Sg),
            "IC" => Ok(Self::Ic),
            "PL" => Ok(Self::Pl),
            "GR" => Ok(Self::Gr),
            "GS" => Ok(Self::Gs),
            "UP" => Ok(Self::Up),
            "FG" => Ok(Self::Fg),
            "BR" => Ok(Self::Br),
            "HZ" => Ok(Self::Hz),
            "FU" => Ok(Self::Fu),
            "VA" => Ok(Self::Va),
            "DU" => Ok(Self::Du),
            "SA" => Ok(Self::Sa),
            "PO" => Ok(Self::Po),
            "SQ" => Ok(Self::Sq),
            "FC" => Ok(Self::Fc),
            "SS" => Ok(Self::Ss),
            "DS" => Ok(Self::Ds),
            _ => Err(Error::unknown_code("phenomenon", s)),
        }
    }
}

/// All two-letter phenomenon codes, scanned by the weather-condition
/// heuristic in two-character chunks.
pub const PHENOMENON_CODES: [(&str, Phenomenon); 21] = [
    ("DZ", Phenomenon::Dz),
    ("RA", Phenomenon::Ra),
    ("SN", Phenomenon::Sn),
    ("SG", Phenomenon::Sg),
    ("IC", Phenomenon::Ic),
    ("PL", Phenomenon::Pl),
    ("GR", Phenomenon::Gr),
    ("GS", Phenomenon::Gs),
    ("UP", Phenomenon::Up),
    ("FG", Phenomenon::Fg),
    ("BR", Phenomenon::Br),
    ("HZ", Phenomenon::Hz),
    ("FU", Phenomenon::Fu),
    ("VA", Phenomenon::Va),
    ("DU", Phenomenon::Du),
    ("SA", Phenomenon::Sa),
    ("PO", Phenomenon::Po),
    ("SQ", Phenomenon::Sq),
    ("FC", Phenomenon::Fc),
    ("SS", Phenomenon::Ss),
    ("DS", Phenomenon::Ds),
];

/// Greater-than / less-than qualifier on a measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueIndicator {
    #[serde(rename = "P")]
    GreaterThan,
    #[serde(rename = "M")]
    LessThan,
}

/// Wind speed units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[serde(rename = "KT")]
    Knot,
    #[serde(rename = "MPS")]
    MeterPerSecond,
    #[serde(rename = "KM/H")]
    KilometerPerHour,
}

impl FromStr for SpeedUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "KT" => Ok(Self::Knot),
            "MPS" => Ok(Self::MeterPerSecond),
            "KM/H" => Ok(Self::KilometerPerHour),
            _ => Err(Error::unknown_code("speed unit", s)),
        }
    }
}

/// Distance units used by visibility and runway range groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "SM")]
    StatuteMiles,
    #[serde(rename = "FT")]
    Feet,
}

/// Trend group change type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeatherChangeType {
    Fm,
    Becmg,
    Tempo,
    Prob,
    Inter,
}

/// Time indicator inside a METAR trend (AT1300, FM1030, TL1800).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeIndicator {
    At,
    Fm,
    Tl,
}

impl FromStr for TimeIndicator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AT" => Ok(Self::At),
            "FM" => Ok(Self::Fm),
            "TL" => Ok(Self::Tl),
            _ => Err(Error::unknown_code("time indicator", s)),
        }
    }
}

// =============================================================================
// Group structures
// =============================================================================

/// Surface wind group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Mean wind speed
    pub speed: u32,

    /// Cardinal direction derived from the degrees ("WSW"), or "VRB"
    pub direction: String,

    /// Wind direction in degrees; absent for variable winds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degrees: Option<u32>,

    /// Gust speed, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust: Option<u32>,

    /// Lower bound of a directional variation group (dddVddd)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_variation: Option<u32>,

    /// Upper bound of a directional variation group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_variation: Option<u32>,

    /// Speed unit the group was reported in
    pub unit: SpeedUnit,
}

/// Wind shear group: a wind observation at a reported height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindShear {
    /// Height of the shear layer in feet
    pub height: u32,

    #[serde(flatten)]
    pub wind: Wind,
}

/// Minimum directional visibility sub-reading (e.g. "1100w").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinVisibility {
    pub value: u32,
    pub direction: String,
}

/// Prevailing horizontal visibility group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    /// Visibility value in `unit`
    pub value: f64,

    pub unit: DistanceUnit,

    /// Greater-than or less-than qualifier (P6SM, M1/4SM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<ValueIndicator>,

    /// "No directional variation" flag (xxxxNDV)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ndv: bool,

    /// Minimum visibility sub-reading with its direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<MinVisibility>,
}

impl Visibility {
    /// The CAVOK replacement visibility: greater than 9999 meters.
    pub fn cavok() -> Self {
        Self {
            value: 9999.0,
            unit: DistanceUnit::Meters,
            indicator: Some(ValueIndicator::GreaterThan),
            ndv: false,
            min: None,
        }
    }
}

/// One cloud layer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub quantity: CloudQuantity,

    /// Layer base in feet; absent for quantity-only groups (NSC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Convective or genus annotation (CB, TCU)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub cloud_type: Option<CloudType>,

    /// Rarely reported second annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_type: Option<CloudType>,
}

/// One decoded weather group (intensity + descriptive + phenomena).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptive: Option<Descriptive>,

    /// Phenomena in the order they appear in the group
    pub phenomenons: Vec<Phenomenon>,
}

impl WeatherCondition {
    /// A condition is retained only with at least one phenomenon, or when the
    /// descriptive is a thunderstorm. A bare intensity or descriptive is a
    /// vocabulary peculiarity and is discarded.
    pub fn is_valid(&self) -> bool {
        !self.phenomenons.is_empty() || self.descriptive == Some(Descriptive::Ts)
    }
}

/// Forecast icing group (6IchihihitL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icing {
    /// Icing intensity code, 0-9
    pub intensity: u8,

    /// Layer base in feet
    pub base_height: u32,

    /// Layer depth in feet
    pub depth: u32,
}

/// Forecast turbulence group (5BhBhBhBtL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turbulence {
    /// Turbulence intensity code, 0-9
    pub intensity: u8,

    /// Layer base in feet
    pub base_height: u32,

    /// Layer depth in feet
    pub depth: u32,
}

// =============================================================================
// Shared weather container
// =============================================================================

/// Weather groups shared by METAR and TAF reports and by every trend group
/// nested inside them. Recognizers accumulate into this container as the
/// state machines walk the token stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    /// Vertical visibility in feet when the sky is obscured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_visibility: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_shear: Option<WindShear>,

    /// Ceiling and visibility OK
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cavok: bool,

    /// Cloud layers in report order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub clouds: Vec<Cloud>,

    /// Weather groups in report order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub weather_conditions: Vec<WeatherCondition>,

    /// Forecast turbulence layers (TAF only)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub turbulence: Vec<Turbulence>,

    /// Forecast icing layers (TAF only)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub icing: Vec<Icing>,

    /// Decoded remarks in section order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub remarks: Vec<Remark>,

    /// Raw text of the remark section, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark_text: Option<String>,
}

/// Convert wind degrees to a 16-point cardinal direction label.
pub fn degrees_to_cardinal(degrees: u32) -> &'static str {
    const CARDINALS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    let index = (((degrees % 360) as f64 + 11.25) / 22.5) as usize % 16;
    CARDINALS[index]
}
