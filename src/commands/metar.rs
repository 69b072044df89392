//! METAR-only group recognizers
//!
//! Altimeter settings, surface temperature/dew point and runway visual
//! range records. These accumulate directly into the [`Metar`] report rather
//! than the shared weather container.

use std::sync::LazyLock;

use regex::Regex;

use super::MetarCommand;
use crate::models::{DistanceUnit, Metar, RunwayInfo, RunwayTrend, ValueIndicator};
use crate::{Error, Result};

/// Inches of mercury to hectopascals.
const INHG_TO_HPA: f64 = 33.8639;

static ALTIMETER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Q(\d{4})$").unwrap());

static ALTIMETER_MERCURY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^A(\d{4})$").unwrap());

static TEMPERATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(M?\d{2})/(M?\d{2})?$").unwrap());

static RUNWAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R(\d{2}[LRC]?)/([MP])?(\d{4})([UDN])?(FT)?$").unwrap());

static RUNWAY_VARYING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R(\d{2}[LRC]?)/([MP])?(\d{4})V(\d{4})([UDN])?(FT)?$").unwrap());

/// Signed temperature figure: a leading M marks a negative value.
fn parse_temperature(figure: &str) -> Result<i32> {
    let (negative, digits) = match figure.strip_prefix('M') {
        Some(rest) => (true, rest),
        None => (false, figure),
    };
    let value: i32 = digits
        .parse()
        .map_err(|_| Error::unknown_code("temperature", figure))?;
    Ok(if negative { -value } else { value })
}

fn parse_indicator(code: Option<&str>) -> Option<ValueIndicator> {
    match code {
        Some("P") => Some(ValueIndicator::GreaterThan),
        Some("M") => Some(ValueIndicator::LessThan),
        _ => None,
    }
}

/// Altimeter setting in hectopascals (Q1013).
pub struct AltimeterCommand;

impl AltimeterCommand {
    pub fn new() -> Self {
        Self
    }
}

impl MetarCommand for AltimeterCommand {
    fn can_parse(&self, token: &str) -> bool {
        ALTIMETER_RE.is_match(token)
    }

    fn execute(&self, metar: &mut Metar, token: &str) -> Result<bool> {
        let caps = ALTIMETER_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        metar.altimeter = caps[1].parse::<f64>().ok();
        Ok(true)
    }
}

/// Altimeter setting in hundredths of inches of mercury (A2992), converted
/// to hectopascals.
pub struct AltimeterMercuryCommand;

impl AltimeterMercuryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl MetarCommand for AltimeterMercuryCommand {
    fn can_parse(&self, token: &str) -> bool {
        ALTIMETER_MERCURY_RE.is_match(token)
    }

    fn execute(&self, metar: &mut Metar, token: &str) -> Result<bool> {
        let caps = ALTIMETER_MERCURY_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        let mercury: f64 = caps[1]
            .parse::<f64>()
            .map_err(|_| Error::unknown_code("altimeter", &caps[1]))?
            / 100.0;
        metar.altimeter = Some((mercury * INHG_TO_HPA * 100.0).round() / 100.0);
        Ok(true)
    }
}

/// Temperature and dew point in whole degrees Celsius (17/M03, M05/).
pub struct TemperatureCommand;

impl TemperatureCommand {
    pub fn new() -> Self {
        Self
    }
}

impl MetarCommand for TemperatureCommand {
    fn can_parse(&self, token: &str) -> bool {
        TEMPERATURE_RE.is_match(token)
    }

    fn execute(&self, metar: &mut Metar, token: &str) -> Result<bool> {
        let caps = TEMPERATURE_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        metar.temperature = Some(parse_temperature(&caps[1])?);
        metar.dew_point = match caps.get(2) {
            Some(figure) => Some(parse_temperature(figure.as_str())?),
            None => None,
        };
        Ok(true)
    }
}

/// Runway visual range records (R26/0600U, R27L/M0150V0300FT).
///
/// Deposit-state runway groups (R06/CLRD70) do not match either shape and
/// fall through to the body decoder's lenient drop.
pub struct RunwayCommand;

impl RunwayCommand {
    pub fn new() -> Self {
        Self
    }
}

impl MetarCommand for RunwayCommand {
    fn can_parse(&self, token: &str) -> bool {
        RUNWAY_VARYING_RE.is_match(token) || RUNWAY_RE.is_match(token)
    }

    fn execute(&self, metar: &mut Metar, token: &str) -> Result<bool> {
        if let Some(caps) = RUNWAY_VARYING_RE.captures(token) {
            let unit = if caps.get(6).is_some() {
                DistanceUnit::Feet
            } else {
                DistanceUnit::Meters
            };
            metar.runways.push(RunwayInfo {
                name: caps[1].to_string(),
                indicator: parse_indicator(caps.get(2).map(|m| m.as_str())),
                min_range: caps[3]
                    .parse()
                    .map_err(|_| Error::unknown_code("runway range", &caps[3]))?,
                max_range: caps[4].parse().ok(),
                trend: match caps.get(5) {
                    Some(code) => Some(code.as_str().parse::<RunwayTrend>()?),
                    None => None,
                },
                unit,
            });
            return Ok(true);
        }

        let caps = RUNWAY_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;
        let unit = if caps.get(5).is_some() {
            DistanceUnit::Feet
        } else {
            DistanceUnit::Meters
        };
        metar.runways.push(RunwayInfo {
            name: caps[1].to_string(),
            indicator: parse_indicator(caps.get(2).map(|m| m.as_str())),
            min_range: caps[3]
                .parse()
                .map_err(|_| Error::unknown_code("runway range", &caps[3]))?,
            max_range: None,
            trend: match caps.get(4) {
                Some(code) => Some(code.as_str().parse::<RunwayTrend>()?),
                None => None,
            },
            unit,
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherContainer;

    fn empty_metar() -> Metar {
        Metar {
            station: "TEST".to_string(),
            day: 1,
            hour: 0,
            minute: 0,
            temperature: None,
            dew_point: None,
            altimeter: None,
            nosig: false,
            auto: false,
            nil: false,
            runways: vec![],
            trends: vec![],
            weather: WeatherContainer::default(),
            message: String::new(),
        }
    }

    #[test]
    fn test_altimeter_hpa() {
        let mut metar = empty_metar();
        AltimeterCommand::new().execute(&mut metar, "Q1013").unwrap();
        assert_eq!(metar.altimeter, Some(1013.0));
    }

    #[test]
    fn test_altimeter_inches_converted() {
        let mut metar = empty_metar();
        AltimeterMercuryCommand::new()
            .execute(&mut metar, "A2992")
            .unwrap();
        let altimeter = metar.altimeter.unwrap();
        assert!((altimeter - 1013.21).abs() < 0.5);
    }

    #[test]
    fn test_temperature_negative_dew_point() {
        let mut metar = empty_metar();
        TemperatureCommand::new()
            .execute(&mut metar, "17/M03")
            .unwrap();
        assert_eq!(metar.temperature, Some(17));
        assert_eq!(metar.dew_point, Some(-3));
    }

    #[test]
    fn test_temperature_missing_dew_point() {
        let mut metar = empty_metar();
        TemperatureCommand::new().execute(&mut metar, "M05/").unwrap();
        assert_eq!(metar.temperature, Some(-5));
        assert_eq!(metar.dew_point, None);
    }

    #[test]
    fn test_runway_simple() {
        let mut metar = empty_metar();
        RunwayCommand::new().execute(&mut metar, "R26/0600U").unwrap();
        let runway = &metar.runways[0];
        assert_eq!(runway.name, "26");
        assert_eq!(runway.min_range, 600);
        assert_eq!(runway.trend, Some(RunwayTrend::Up));
        assert_eq!(runway.unit, DistanceUnit::Meters);
    }

    #[test]
    fn test_runway_varying_feet() {
        let mut metar = empty_metar();
        RunwayCommand::new()
            .execute(&mut metar, "R27L/M0150V0300FT")
            .unwrap();
        let runway = &metar.runways[0];
        assert_eq!(runway.name, "27L");
        assert_eq!(runway.indicator, Some(ValueIndicator::LessThan));
        assert_eq!(runway.min_range, 150);
        assert_eq!(runway.max_range, Some(300));
        assert_eq!(runway.unit, DistanceUnit::Feet);
    }

    #[test]
    fn test_runway_deposit_group_not_matched() {
        assert!(!RunwayCommand::new().can_parse("R06/CLRD70"));
    }
}
