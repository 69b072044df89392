//! Remark section recognizers and the remark decoder loop
//!
//! The remark decoder repeatedly strips one recognized prefix off the
//! remainder of the remark section. Each recognizer follows the same
//! contract as the body dispatchers, specialized to free text: `can_parse`
//! gates on the remainder's leading shape, `execute` pushes one typed
//! [`Remark`] (with a catalog description) and returns the stripped
//! remainder.
//!
//! Unlike the body decoder, this decoder never drops input: anything no
//! recognizer claims goes through the default path, which either matches a
//! member of the closed bare-code remark enumeration or folds the word into
//! an `Unknown` remark, merging consecutive unknown words into one.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::locale::MessageCatalog;
use crate::models::{CloudQuantity, Descriptive, Phenomenon, Remark, RemarkData, SimpleRemark};
use crate::{Error, Result};

/// A recognizer over the remark remainder string.
pub trait RemarkCommand {
    /// Whether the remainder starts with this remark's shape.
    fn can_parse(&self, remainder: &str) -> bool;

    /// Push one decoded remark and return the remainder with the matched
    /// prefix stripped and trimmed.
    ///
    /// # Errors
    ///
    /// Returns a recoverable fault ([`Error::UnknownCode`] or
    /// [`Error::MissingTranslation`]) when an enumerated sub-value or the
    /// catalog lookup fails; the caller degrades to the default path.
    fn execute(
        &self,
        remainder: &str,
        catalog: &dyn MessageCatalog,
        remarks: &mut Vec<Remark>,
    ) -> Result<String>;
}

/// Split the remainder at a regex match: the trimmed raw text and the rest.
fn split_match(remainder: &str, end: usize) -> (String, String) {
    (
        remainder[..end].trim_end().to_string(),
        remainder[end..].trim_start().to_string(),
    )
}

/// Value of a "1 1/2" style whole-plus-fraction figure.
fn fraction_value(figure: &str) -> f64 {
    let mut value = 0.0;
    for part in figure.split_whitespace() {
        if let Some((num, den)) = part.split_once('/') {
            if let (Ok(num), Ok(den)) = (num.parse::<f64>(), den.parse::<f64>()) {
                value += num / den;
            }
        } else if let Ok(whole) = part.parse::<f64>() {
            value += whole;
        }
    }
    value
}

/// Temperature in tenths of degrees with a 0/1 sign digit.
fn tenths_temperature(sign: &str, digits: &str) -> f64 {
    let value = digits.parse::<f64>().unwrap_or(0.0) / 10.0;
    if sign == "1" { -value } else { value }
}

/// Format an optional hour figure for a description.
fn fmt_hour(hour: Option<u32>) -> String {
    hour.map(|h| format!("{h:02}")).unwrap_or_default()
}

macro_rules! remark_command {
    ($name:ident, $re:ident, $pattern:literal, |$caps:ident, $catalog:ident| $body:block) => {
        static $re: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());

        pub struct $name;

        impl RemarkCommand for $name {
            fn can_parse(&self, remainder: &str) -> bool {
                $re.is_match(remainder)
            }

            fn execute(
                &self,
                remainder: &str,
                catalog: &dyn MessageCatalog,
                remarks: &mut Vec<Remark>,
            ) -> Result<String> {
                let $caps = $re
                    .captures(remainder)
                    .ok_or_else(|| Error::unexpected_token(remainder))?;
                let $catalog = catalog;
                let (data, description): (RemarkData, String) = $body;
                let (raw, rest) = split_match(remainder, $caps.get(0).map(|m| m.end()).unwrap_or(0));
                remarks.push(Remark {
                    data,
                    description: Some(description),
                    raw,
                });
                Ok(rest)
            }
        }
    };
}

remark_command!(WindPeakCommand, WIND_PEAK_RE, r"^PK WND (\d{3})(\d{2,3})/(\d{2})?(\d{2})(?: |$)", |caps, catalog| {
    let degrees: u32 = caps[1].parse().unwrap_or(0);
    let speed: u32 = caps[2].parse().unwrap_or(0);
    let start_hour = caps.get(3).and_then(|m| m.as_str().parse().ok());
    let start_minute: u32 = caps[4].parse().unwrap_or(0);
    let description = catalog.describe(
        "remark.wind_peak",
        &[
            &degrees.to_string(),
            &speed.to_string(),
            &fmt_hour(start_hour),
            &format!("{start_minute:02}"),
        ],
    )?;
    (
        RemarkData::WindPeak { degrees, speed, start_hour, start_minute },
        description,
    )
});

remark_command!(WindShiftFropaCommand, WIND_SHIFT_FROPA_RE, r"^WSHFT (\d{2})?(\d{2}) FROPA(?: |$)", |caps, catalog| {
    let start_hour = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let start_minute: u32 = caps[2].parse().unwrap_or(0);
    let description = catalog.describe(
        "remark.wind_shift_fropa",
        &[&fmt_hour(start_hour), &format!("{start_minute:02}")],
    )?;
    (RemarkData::WindShiftFropa { start_hour, start_minute }, description)
});

remark_command!(WindShiftCommand, WIND_SHIFT_RE, r"^WSHFT (\d{2})?(\d{2})(?: |$)", |caps, catalog| {
    let start_hour = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let start_minute: u32 = caps[2].parse().unwrap_or(0);
    let description = catalog.describe(
        "remark.wind_shift",
        &[&fmt_hour(start_hour), &format!("{start_minute:02}")],
    )?;
    (RemarkData::WindShift { start_hour, start_minute }, description)
});

remark_command!(TowerVisibilityCommand, TOWER_VISIBILITY_RE, r"^TWR VIS ((?:\d+ \d/\d|\d/\d|\d+))(?: |$)", |caps, catalog| {
    let visibility = caps[1].to_string();
    let description = catalog.describe("remark.tower_visibility", &[&visibility])?;
    (RemarkData::TowerVisibility { visibility }, description)
});

remark_command!(SurfaceVisibilityCommand, SURFACE_VISIBILITY_RE, r"^SFC VIS ((?:\d+ \d/\d|\d/\d|\d+))(?: |$)", |caps, catalog| {
    let visibility = caps[1].to_string();
    let description = catalog.describe("remark.surface_visibility", &[&visibility])?;
    (RemarkData::SurfaceVisibility { visibility }, description)
});

remark_command!(SecondLocationVisibilityCommand, SECOND_LOCATION_VISIBILITY_RE, r"^VIS ((?:\d+ \d/\d|\d/\d|\d+)) ([A-Z]+\d*)(?: |$)", |caps, catalog| {
    let visibility = caps[1].to_string();
    let location = caps[2].to_string();
    let description =
        catalog.describe("remark.second_location_visibility", &[&visibility, &location])?;
    (RemarkData::SecondLocationVisibility { visibility, location }, description)
});

remark_command!(SectorVisibilityCommand, SECTOR_VISIBILITY_RE, r"^VIS ([A-Z]{1,2}) ((?:\d+ \d/\d|\d/\d|\d+))(?: |$)", |caps, catalog| {
    let direction = caps[1].to_string();
    let visibility = caps[2].to_string();
    let description = catalog.describe("remark.sector_visibility", &[&direction, &visibility])?;
    (RemarkData::SectorVisibility { direction, visibility }, description)
});

remark_command!(PrevailingVisibilityCommand, PREVAILING_VISIBILITY_RE, r"^VIS ((?:\d+ \d/\d|\d/\d|\d+))(?: |$)", |caps, catalog| {
    let visibility = caps[1].to_string();
    let description = catalog.describe("remark.prevailing_visibility", &[&visibility])?;
    (RemarkData::PrevailingVisibility { visibility }, description)
});

remark_command!(TornadicActivityBegEndCommand, TORNADIC_BEG_END_RE, r"^(TORNADO|FUNNEL CLOUD|WATERSPOUT) B(\d{2})?(\d{2})E(\d{2})?(\d{2}) (\d+) ([A-Z]{1,2})(?: |$)", |caps, catalog| {
    let tornadic_type = caps[1].to_string();
    let start_hour = caps.get(2).and_then(|m| m.as_str().parse().ok());
    let start_minute: u32 = caps[3].parse().unwrap_or(0);
    let end_hour = caps.get(4).and_then(|m| m.as_str().parse().ok());
    let end_minute: u32 = caps[5].parse().unwrap_or(0);
    let distance: u32 = caps[6].parse().unwrap_or(0);
    let direction = caps[7].to_string();
    let description = catalog.describe(
        "remark.tornadic_activity_beg_end",
        &[
            &tornadic_type.to_lowercase(),
            &fmt_hour(start_hour),
            &format!("{start_minute:02}"),
            &fmt_hour(end_hour),
            &format!("{end_minute:02}"),
            &distance.to_string(),
            &direction,
        ],
    )?;
    (
        RemarkData::TornadicActivityBegEnd {
            tornadic_type,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
            distance,
            direction,
        },
        description,
    )
});

remark_command!(TornadicActivityBegCommand, TORNADIC_BEG_RE, r"^(TORNADO|FUNNEL CLOUD|WATERSPOUT) B(\d{2})?(\d{2}) (\d+) ([A-Z]{1,2})(?: |$)", |caps, catalog| {
    let tornadic_type = caps[1].to_string();
    let start_hour = caps.get(2).and_then(|m| m.as_str().parse().ok());
    let start_minute: u32 = caps[3].parse().unwrap_or(0);
    let distance: u32 = caps[4].parse().unwrap_or(0);
    let direction = caps[5].to_string();
    let description = catalog.describe(
        "remark.tornadic_activity_beg",
        &[
            &tornadic_type.to_lowercase(),
            &fmt_hour(start_hour),
            &format!("{start_minute:02}"),
            &distance.to_string(),
            &direction,
        ],
    )?;
    (
        RemarkData::TornadicActivityBeg {
            tornadic_type,
            start_hour,
            start_minute,
            distance,
            direction,
        },
        description,
    )
});

remark_command!(TornadicActivityEndCommand, TORNADIC_END_RE, r"^(TORNADO|FUNNEL CLOUD|WATERSPOUT) E(\d{2})?(\d{2}) (\d+) ([A-Z]{1,2})(?: |$)", |caps, catalog| {
    let tornadic_type = caps[1].to_string();
    let end_hour = caps.get(2).and_then(|m| m.as_str().parse().ok());
    let end_minute: u32 = caps[3].parse().unwrap_or(0);
    let distance: u32 = caps[4].parse().unwrap_or(0);
    let direction = caps[5].to_string();
    let description = catalog.describe(
        "remark.tornadic_activity_end",
        &[
            &tornadic_type.to_lowercase(),
            &fmt_hour(end_hour),
            &format!("{end_minute:02}"),
            &distance.to_string(),
            &direction,
        ],
    )?;
    (
        RemarkData::TornadicActivityEnd {
            tornadic_type,
            end_hour,
            end_minute,
            distance,
            direction,
        },
        description,
    )
});

remark_command!(PrecipitationBegEndCommand, PRECIPITATION_BEG_END_RE, r"^([A-Z]{2})?([A-Z]{2})B(\d{2})?(\d{2})E(\d{2})?(\d{2})(?: |$)", |caps, catalog| {
    let descriptive = match caps.get(1) {
        Some(code) => Some(code.as_str().parse::<Descriptive>()?),
        None => None,
    };
    let phenomenon: Phenomenon = caps[2].parse()?;
    let start_hour = caps.get(3).and_then(|m| m.as_str().parse().ok());
    let start_minute: u32 = caps[4].parse().unwrap_or(0);
    let end_hour = caps.get(5).and_then(|m| m.as_str().parse().ok());
    let end_minute: u32 = caps[6].parse().unwrap_or(0);
    let description = catalog.describe(
        "remark.precipitation_beg_end",
        &[
            caps.get(1).map(|m| m.as_str()).unwrap_or(""),
            &caps[2],
            &fmt_hour(start_hour),
            &format!("{start_minute:02}"),
            &fmt_hour(end_hour),
            &format!("{end_minute:02}"),
        ],
    )?;
    (
        RemarkData::PrecipitationBegEnd {
            descriptive,
            phenomenon,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        },
        description,
    )
});

remark_command!(ThunderStormLocationMovingCommand, THUNDERSTORM_MOVING_RE, r"^TS ([A-Z]{2}) MOV ([A-Z]{1,2})(?: |$)", |caps, catalog| {
    let location = caps[1].to_string();
    let moving = caps[2].to_string();
    let description =
        catalog.describe("remark.thunderstorm_location_moving", &[&location, &moving])?;
    (RemarkData::ThunderStormLocationMoving { location, moving }, description)
});

remark_command!(ThunderStormLocationCommand, THUNDERSTORM_LOCATION_RE, r"^TS ([A-Z]{2})(?: |$)", |caps, catalog| {
    let location = caps[1].to_string();
    let description = catalog.describe("remark.thunderstorm_location", &[&location])?;
    (RemarkData::ThunderStormLocation { location }, description)
});

remark_command!(SmallHailSizeCommand, SMALL_HAIL_RE, r"^GR LESS THAN ((?:\d )?\d/\d|\d)(?: |$)", |caps, catalog| {
    let size = fraction_value(&caps[1]);
    let description = catalog.describe("remark.small_hail_size", &[&caps[1]])?;
    (RemarkData::SmallHailSize { size }, description)
});

remark_command!(HailSizeCommand, HAIL_RE, r"^GR ((?:\d )?\d/\d|\d)(?: |$)", |caps, catalog| {
    let size = fraction_value(&caps[1]);
    let description = catalog.describe("remark.hail_size", &[&caps[1]])?;
    (RemarkData::HailSize { size }, description)
});

remark_command!(SnowPelletsCommand, SNOW_PELLETS_RE, r"^GS (LGT|MOD|HVY)(?: |$)", |caps, catalog| {
    let intensity = caps[1].to_string();
    let description = catalog.describe("remark.snow_pellets", &[&intensity.to_lowercase()])?;
    (RemarkData::SnowPellets { intensity }, description)
});

remark_command!(VirgaDirectionCommand, VIRGA_RE, r"^VIRGA ([A-Z]{1,2})(?: |$)", |caps, catalog| {
    let direction = caps[1].to_string();
    let description = catalog.describe("remark.virga_direction", &[&direction])?;
    (RemarkData::VirgaDirection { direction }, description)
});

remark_command!(CeilingHeightCommand, CEILING_HEIGHT_RE, r"^CIG (\d{3})V(\d{3})(?: |$)", |caps, catalog| {
    let min = caps[1].parse::<u32>().unwrap_or(0) * 100;
    let max = caps[2].parse::<u32>().unwrap_or(0) * 100;
    let description =
        catalog.describe("remark.ceiling_height", &[&min.to_string(), &max.to_string()])?;
    (RemarkData::CeilingHeight { min, max }, description)
});

remark_command!(CeilingSecondLocationCommand, CEILING_SECOND_RE, r"^CIG (\d{3}) ([A-Z]+\d*)(?: |$)", |caps, catalog| {
    let height = caps[1].parse::<u32>().unwrap_or(0) * 100;
    let location = caps[2].to_string();
    let description = catalog.describe(
        "remark.ceiling_second_location",
        &[&height.to_string(), &location],
    )?;
    (RemarkData::CeilingSecondLocation { height, location }, description)
});

remark_command!(ObscurationCommand, OBSCURATION_RE, r"^([A-Z]{2}) ([A-Z]{3})(\d{3})(?: |$)", |caps, catalog| {
    let phenomenon: Phenomenon = caps[1].parse()?;
    let quantity: CloudQuantity = caps[2].parse()?;
    let height = caps[3].parse::<u32>().unwrap_or(0) * 100;
    let description = catalog.describe(
        "remark.obscuration",
        &[&caps[2], &height.to_string(), &caps[1]],
    )?;
    (RemarkData::Obscuration { phenomenon, quantity, height }, description)
});

remark_command!(VariableSkyHeightCommand, VARIABLE_SKY_HEIGHT_RE, r"^([A-Z]{3})(\d{3}) V ([A-Z]{3})(?: |$)", |caps, catalog| {
    let first: CloudQuantity = caps[1].parse()?;
    let height = caps[2].parse::<u32>().unwrap_or(0) * 100;
    let second: CloudQuantity = caps[3].parse()?;
    let description = catalog.describe(
        "remark.variable_sky_height",
        &[&caps[1], &height.to_string(), &caps[3]],
    )?;
    (RemarkData::VariableSkyHeight { first, height, second }, description)
});

remark_command!(VariableSkyCommand, VARIABLE_SKY_RE, r"^([A-Z]{3}) V ([A-Z]{3})(?: |$)", |caps, catalog| {
    let first: CloudQuantity = caps[1].parse()?;
    let second: CloudQuantity = caps[2].parse()?;
    let description = catalog.describe("remark.variable_sky", &[&caps[1], &caps[2]])?;
    (RemarkData::VariableSky { first, second }, description)
});

remark_command!(SeaLevelPressureCommand, SEA_LEVEL_PRESSURE_RE, r"^SLP(\d{3})(?: |$)", |caps, catalog| {
    let tenths = caps[1].parse::<f64>().unwrap_or(0.0) / 10.0;
    // Figures of 50.0 and above are in the 9xx hPa range.
    let pressure = if tenths >= 50.0 { 900.0 + tenths } else { 1000.0 + tenths };
    let description = catalog.describe("remark.sea_level_pressure", &[&format!("{pressure:.1}")])?;
    (RemarkData::SeaLevelPressure { pressure }, description)
});

remark_command!(SnowIncreaseCommand, SNOW_INCREASE_RE, r"^SNINCR (\d+)/(\d+)(?: |$)", |caps, catalog| {
    let inch_last_hour: u32 = caps[1].parse().unwrap_or(0);
    let total_depth: u32 = caps[2].parse().unwrap_or(0);
    let description = catalog.describe(
        "remark.snow_increase",
        &[&inch_last_hour.to_string(), &total_depth.to_string()],
    )?;
    (RemarkData::SnowIncrease { inch_last_hour, total_depth }, description)
});

remark_command!(HourlyMaximumMinimumTemperatureCommand, HOURLY_MAX_MIN_RE, r"^4([01])(\d{3})([01])(\d{3})(?: |$)", |caps, catalog| {
    let max = tenths_temperature(&caps[1], &caps[2]);
    let min = tenths_temperature(&caps[3], &caps[4]);
    let description = catalog.describe(
        "remark.hourly_maximum_minimum_temperature",
        &[&format!("{max:.1}"), &format!("{min:.1}")],
    )?;
    (RemarkData::HourlyMaximumMinimumTemperature { max, min }, description)
});

remark_command!(HourlyMaximumTemperatureCommand, HOURLY_MAX_RE, r"^1([01])(\d{3})(?: |$)", |caps, catalog| {
    let max = tenths_temperature(&caps[1], &caps[2]);
    let description =
        catalog.describe("remark.hourly_maximum_temperature", &[&format!("{max:.1}")])?;
    (RemarkData::HourlyMaximumTemperature { max }, description)
});

remark_command!(HourlyMinimumTemperatureCommand, HOURLY_MIN_RE, r"^2([01])(\d{3})(?: |$)", |caps, catalog| {
    let min = tenths_temperature(&caps[1], &caps[2]);
    let description =
        catalog.describe("remark.hourly_minimum_temperature", &[&format!("{min:.1}")])?;
    (RemarkData::HourlyMinimumTemperature { min }, description)
});

remark_command!(HourlyPrecipitationAmountCommand, HOURLY_PRECIPITATION_RE, r"^P(\d{4})(?: |$)", |caps, catalog| {
    let amount = caps[1].parse::<f64>().unwrap_or(0.0) / 100.0;
    let description =
        catalog.describe("remark.hourly_precipitation_amount", &[&format!("{amount:.2}")])?;
    (RemarkData::HourlyPrecipitationAmount { amount }, description)
});

remark_command!(HourlyPressureCommand, HOURLY_PRESSURE_RE, r"^5([0-8])(\d{3})(?: |$)", |caps, catalog| {
    let tendency: u8 = caps[1].parse().unwrap_or(0);
    let pressure_change = caps[2].parse::<f64>().unwrap_or(0.0) / 10.0;
    let tendency_text = catalog.translate(&format!("remark.pressure_tendency.{tendency}"))?;
    let description = catalog.describe(
        "remark.hourly_pressure",
        &[&tendency_text, &format!("{pressure_change:.1}")],
    )?;
    (RemarkData::HourlyPressure { tendency, pressure_change }, description)
});

remark_command!(HourlyTemperatureDewPointCommand, HOURLY_TEMP_DEW_RE, r"^T([01])(\d{3})(?:([01])(\d{3}))?(?: |$)", |caps, catalog| {
    let temperature = tenths_temperature(&caps[1], &caps[2]);
    let dew_point = match (caps.get(3), caps.get(4)) {
        (Some(sign), Some(digits)) => Some(tenths_temperature(sign.as_str(), digits.as_str())),
        _ => None,
    };
    let description = match dew_point {
        Some(dew_point) => catalog.describe(
            "remark.hourly_temperature_dew_point",
            &[&format!("{temperature:.1}"), &format!("{dew_point:.1}")],
        )?,
        None => catalog.describe("remark.hourly_temperature", &[&format!("{temperature:.1}")])?,
    };
    (RemarkData::HourlyTemperatureDewPoint { temperature, dew_point }, description)
});

remark_command!(IceAccretionCommand, ICE_ACCRETION_RE, r"^I([136])(\d{3})(?: |$)", |caps, catalog| {
    let period_hours: u8 = caps[1].parse().unwrap_or(1);
    let amount = caps[2].parse::<f64>().unwrap_or(0.0) / 100.0;
    let description = catalog.describe(
        "remark.ice_accretion",
        &[&format!("{amount:.2}"), &period_hours.to_string()],
    )?;
    (RemarkData::IceAccretion { period_hours, amount }, description)
});

remark_command!(PrecipitationAmount36HourCommand, PRECIPITATION_36_RE, r"^([36])(\d{4})(?: |$)", |caps, catalog| {
    let period_hours: u8 = caps[1].parse().unwrap_or(3);
    let amount = caps[2].parse::<f64>().unwrap_or(0.0) / 100.0;
    let description = catalog.describe(
        "remark.precipitation_amount_3_6",
        &[&format!("{amount:.2}"), &period_hours.to_string()],
    )?;
    (RemarkData::PrecipitationAmount36Hour { period_hours, amount }, description)
});

remark_command!(PrecipitationAmount24HourCommand, PRECIPITATION_24_RE, r"^7(\d{4})(?: |$)", |caps, catalog| {
    let amount = caps[1].parse::<f64>().unwrap_or(0.0) / 100.0;
    let description =
        catalog.describe("remark.precipitation_amount_24", &[&format!("{amount:.2}")])?;
    (RemarkData::PrecipitationAmount24Hour { amount }, description)
});

remark_command!(SnowDepthCommand, SNOW_DEPTH_RE, r"^4/(\d{3})(?: |$)", |caps, catalog| {
    let depth: u32 = caps[1].parse().unwrap_or(0);
    let description = catalog.describe("remark.snow_depth", &[&depth.to_string()])?;
    (RemarkData::SnowDepth { depth }, description)
});

remark_command!(SunshineDurationCommand, SUNSHINE_RE, r"^98(\d{3})(?: |$)", |caps, catalog| {
    let minutes: u32 = caps[1].parse().unwrap_or(0);
    let description = catalog.describe("remark.sunshine_duration", &[&minutes.to_string()])?;
    (RemarkData::SunshineDuration { minutes }, description)
});

remark_command!(WaterEquivalentSnowCommand, WATER_EQUIVALENT_RE, r"^933(\d{3})(?: |$)", |caps, catalog| {
    let amount = caps[1].parse::<f64>().unwrap_or(0.0) / 10.0;
    let description =
        catalog.describe("remark.water_equivalent_snow", &[&format!("{amount:.1}")])?;
    (RemarkData::WaterEquivalentSnow { amount }, description)
});

/// The remark section decoder.
///
/// Holds the priority-ordered recognizer list and the message catalog the
/// descriptions are sourced from.
pub struct RemarkParser<'c> {
    catalog: &'c dyn MessageCatalog,
    commands: Vec<Box<dyn RemarkCommand>>,
}

impl<'c> RemarkParser<'c> {
    pub fn new(catalog: &'c dyn MessageCatalog) -> Self {
        Self {
            catalog,
            // More specific prefixes first: FROPA before plain wind shift,
            // LESS THAN before plain hail, located/sector visibilities
            // before prevailing, begin+end tornadic activity before the
            // begin-only and end-only shapes.
            commands: vec![
                Box::new(WindPeakCommand),
                Box::new(WindShiftFropaCommand),
                Box::new(WindShiftCommand),
                Box::new(TowerVisibilityCommand),
                Box::new(SurfaceVisibilityCommand),
                Box::new(SecondLocationVisibilityCommand),
                Box::new(SectorVisibilityCommand),
                Box::new(PrevailingVisibilityCommand),
                Box::new(TornadicActivityBegEndCommand),
                Box::new(TornadicActivityBegCommand),
                Box::new(TornadicActivityEndCommand),
                Box::new(PrecipitationBegEndCommand),
                Box::new(ThunderStormLocationMovingCommand),
                Box::new(ThunderStormLocationCommand),
                Box::new(SmallHailSizeCommand),
                Box::new(HailSizeCommand),
                Box::new(SnowPelletsCommand),
                Box::new(VirgaDirectionCommand),
                Box::new(CeilingHeightCommand),
                Box::new(ObscurationCommand),
                Box::new(VariableSkyHeightCommand),
                Box::new(VariableSkyCommand),
                Box::new(CeilingSecondLocationCommand),
                Box::new(SeaLevelPressureCommand),
                Box::new(SnowIncreaseCommand),
                Box::new(HourlyMaximumMinimumTemperatureCommand),
                Box::new(HourlyMaximumTemperatureCommand),
                Box::new(HourlyMinimumTemperatureCommand),
                Box::new(HourlyPrecipitationAmountCommand),
                Box::new(HourlyPressureCommand),
                Box::new(HourlyTemperatureDewPointCommand),
                Box::new(IceAccretionCommand),
                Box::new(PrecipitationAmount36HourCommand),
                Box::new(PrecipitationAmount24HourCommand),
                Box::new(SnowDepthCommand),
                Box::new(SunshineDurationCommand),
                Box::new(WaterEquivalentSnowCommand),
            ],
        }
    }

    /// Decode a remark section into typed remarks. Never fails: anything
    /// unrecognized ends up in `Unknown` remarks.
    pub fn parse(&self, text: &str) -> Vec<Remark> {
        let mut remarks = Vec::new();
        let mut remainder = text.trim().to_string();

        while !remainder.is_empty() {
            let command = self.commands.iter().find(|c| c.can_parse(&remainder));
            remainder = match command {
                Some(command) => {
                    match command.execute(&remainder, self.catalog, &mut remarks) {
                        Ok(rest) => rest,
                        Err(fault) => {
                            // Recognizer gates guarantee captures, so only
                            // recoverable faults can reach this point.
                            debug_assert!(fault.is_recoverable(), "{fault}");
                            debug!(%fault, "remark recognizer fault, degrading to default");
                            self.default_command(&remainder, &mut remarks)
                        }
                    }
                }
                None => self.default_command(&remainder, &mut remarks),
            };
        }

        remarks
    }

    /// Default recognizer: consume one whitespace-delimited word. A member
    /// of the closed bare-code enumeration becomes a typed remark; any other
    /// word extends the current `Unknown` run.
    fn default_command(&self, remainder: &str, remarks: &mut Vec<Remark>) -> String {
        let word = remainder.split_whitespace().next().unwrap_or(remainder);
        let rest = remainder[word.len()..].trim_start().to_string();

        let simple = word
            .parse::<SimpleRemark>()
            .and_then(|code| Ok((code, self.catalog.describe(code.key(), &[])?)));
        match simple {
            Ok((code, description)) => remarks.push(Remark {
                data: RemarkData::Simple { code },
                description: Some(description),
                raw: word.to_string(),
            }),
            Err(_) => match remarks.last_mut() {
                // Consecutive unknown words merge into one remark.
                Some(Remark {
                    data: RemarkData::Unknown,
                    raw,
                    ..
                }) => {
                    raw.push(' ');
                    raw.push_str(word);
                }
                _ => remarks.push(Remark {
                    data: RemarkData::Unknown,
                    description: None,
                    raw: word.to_string(),
                }),
            },
        }

        rest
    }
}
