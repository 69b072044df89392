//! Remark section model
//!
//! The remark section (after `RMK`) is a free-text sub-language of
//! station-specific supplementary observations. Each recognized remark
//! becomes one [`Remark`] carrying a typed payload, a human-readable
//! description from the message catalog, and the raw matched text.
//! Concatenating the `raw` of all remarks in order reconstructs the remark
//! section modulo whitespace normalization.

use serde::{Deserialize, Serialize};

use super::{CloudQuantity, Descriptive, Phenomenon};
use crate::{Error, Result};

/// Remarks consisting of a single bare code with no arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SimpleRemark {
    /// Automated station without precipitation discriminator
    Ao1,
    /// Automated station with precipitation discriminator
    Ao2,
    /// Pressure falling rapidly
    Presfr,
    /// Pressure rising rapidly
    Presrr,
    /// No SPECI reports taken
    Nospeci,
    /// Thunderstorm information not available
    Tsno,
    /// RVR missing
    Rvrno,
    /// Present weather identifier not operating
    Pwino,
    /// Precipitation identifier not operating
    Pno,
    /// Freezing rain sensor not operating
    Fzrano,
    /// Sea level pressure not available
    Slpno,
    /// Frost on the indicator
    Froin,
    /// First report of the day
    First,
    /// Last report of the day
    Last,
}

impl SimpleRemark {
    /// Catalog key for this remark's description.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ao1 => "remark.ao1",
            Self::Ao2 => "remark.ao2",
            Self::Presfr => "remark.presfr",
            Self::Presrr => "remark.presrr",
            Self::Nospeci => "remark.nospeci",
            Self::Tsno => "remark.tsno",
            Self::Rvrno => "remark.rvrno",
            Self::Pwino => "remark.pwino",
            Self::Pno => "remark.pno",
            Self::Fzrano => "remark.fzrano",
            Self::Slpno => "remark.slpno",
            Self::Froin => "remark.froin",
            Self::First => "remark.first",
            Self::Last => "remark.last",
        }
    }
}

impl std::str::FromStr for SimpleRemark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AO1" => Ok(Self::Ao1),
            "AO2" => Ok(Self::Ao2),
            "PRESFR" => Ok(Self::Presfr),
            "PRESRR" => Ok(Self::Presrr),
            "NOSPECI" => Ok(Self::Nospeci),
            "TSNO" => Ok(Self::Tsno),
            "RVRNO" => Ok(Self::Rvrno),
            "PWINO" => Ok(Self::Pwino),
            "PNO" => Ok(Self::Pno),
            "FZRANO" => Ok(Self::Fzrano),
            "SLPNO" => Ok(Self::Slpno),
            "FROIN" => Ok(Self::Froin),
            "FIRST" => Ok(Self::First),
            "LAST" => Ok(Self::Last),
            _ => Err(Error::unknown_code("simple remark", s)),
        }
    }
}

/// Typed payload of a decoded remark. The union is closed: every remark the
/// decoder can produce is one of these variants, with `Unknown` as the
/// catch-all for unrecognized words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RemarkData {
    /// CIG dddVddd - variable ceiling height in feet
    CeilingHeight { min: u32, max: u32 },
    /// CIG ddd LOC - ceiling at a second location
    CeilingSecondLocation { height: u32, location: String },
    /// GR size - hail size in inches
    HailSize { size: f64 },
    /// GR LESS THAN size
    SmallHailSize { size: f64 },
    /// 1sTTT - 6-hourly maximum temperature
    HourlyMaximumTemperature { max: f64 },
    /// 2sTTT - 6-hourly minimum temperature
    HourlyMinimumTemperature { min: f64 },
    /// 4sTTTsTTT - 24-hour maximum/minimum temperature
    HourlyMaximumMinimumTemperature { max: f64, min: f64 },
    /// Pdddd - hourly precipitation in hundredths of an inch
    HourlyPrecipitationAmount { amount: f64 },
    /// 5appp - 3-hourly pressure tendency
    HourlyPressure { tendency: u8, pressure_change: f64 },
    /// TsTTTsTTT - hourly temperature and dew point in tenths
    HourlyTemperatureDewPoint {
        temperature: f64,
        dew_point: Option<f64>,
    },
    /// IhVV - ice accretion over 1, 3 or 6 hours, hundredths of an inch
    IceAccretion { period_hours: u8, amount: f64 },
    /// ph NNNhhh - obscuration layer (e.g. FU BKN020)
    Obscuration {
        phenomenon: Phenomenon,
        quantity: CloudQuantity,
        height: u32,
    },
    /// 7dddd - 24-hour precipitation in hundredths of an inch
    PrecipitationAmount24Hour { amount: f64 },
    /// 3dddd / 6dddd - 3- or 6-hour precipitation
    PrecipitationAmount36Hour { period_hours: u8, amount: f64 },
    /// wwBhhmmEhhmm - precipitation begin/end times
    PrecipitationBegEnd {
        descriptive: Option<Descriptive>,
        phenomenon: Phenomenon,
        start_hour: Option<u32>,
        start_minute: u32,
        end_hour: Option<u32>,
        end_minute: u32,
    },
    /// VIS vvvvv - prevailing visibility
    PrevailingVisibility { visibility: String },
    /// SLPppp - sea level pressure in hectopascals
    SeaLevelPressure { pressure: f64 },
    /// VIS vvvvv LOC - visibility at a second location
    SecondLocationVisibility { visibility: String, location: String },
    /// VIS DIR vvvvv - sector visibility
    SectorVisibility { direction: String, visibility: String },
    /// 4/sss - snow depth in inches
    SnowDepth { depth: u32 },
    /// SNINCR i/t - snow increasing rapidly
    SnowIncrease {
        inch_last_hour: u32,
        total_depth: u32,
    },
    /// GS intensity - snow pellets
    SnowPellets { intensity: String },
    /// 98mmm - sunshine duration in minutes
    SunshineDuration { minutes: u32 },
    /// SFC VIS vvvvv - surface visibility
    SurfaceVisibility { visibility: String },
    /// TS LOC - thunderstorm location
    ThunderStormLocation { location: String },
    /// TS LOC MOV DIR - thunderstorm location and movement
    ThunderStormLocationMoving { location: String, moving: String },
    /// Tornadic activity with a begin time only
    TornadicActivityBeg {
        tornadic_type: String,
        start_hour: Option<u32>,
        start_minute: u32,
        distance: u32,
        direction: String,
    },
    /// Tornadic activity with begin and end times
    TornadicActivityBegEnd {
        tornadic_type: String,
        start_hour: Option<u32>,
        start_minute: u32,
        end_hour: Option<u32>,
        end_minute: u32,
        distance: u32,
        direction: String,
    },
    /// Tornadic activity with an end time only
    TornadicActivityEnd {
        tornadic_type: String,
        end_hour: Option<u32>,
        end_minute: u32,
        distance: u32,
        direction: String,
    },
    /// TWR VIS vvvvv - tower visibility
    TowerVisibility { visibility: String },
    /// NNN V NNN - variable sky condition
    VariableSky {
        first: CloudQuantity,
        second: CloudQuantity,
    },
    /// NNNhhh V NNN - variable sky condition with layer height
    VariableSkyHeight {
        first: CloudQuantity,
        height: u32,
        second: CloudQuantity,
    },
    /// VIRGA DIR - virga with direction
    VirgaDirection { direction: String },
    /// 933sss - water equivalent of snow on ground
    WaterEquivalentSnow { amount: f64 },
    /// PK WND dddff(f)/hhmm - peak wind
    WindPeak {
        degrees: u32,
        speed: u32,
        start_hour: Option<u32>,
        start_minute: u32,
    },
    /// WSHFT hhmm - wind shift
    WindShift {
        start_hour: Option<u32>,
        start_minute: u32,
    },
    /// WSHFT hhmm FROPA - wind shift with frontal passage
    WindShiftFropa {
        start_hour: Option<u32>,
        start_minute: u32,
    },
    /// One of the closed bare-code remarks (AO2, PRESFR, ...)
    Simple { code: SimpleRemark },
    /// Unrecognized word run, kept verbatim
    Unknown,
}

/// One decoded remark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remark {
    #[serde(flatten)]
    pub data: RemarkData,

    /// Human-readable description from the message catalog; absent for
    /// unknown remarks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The matched source text, verbatim
    pub raw: String,
}
