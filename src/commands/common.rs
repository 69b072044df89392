//! Generic weather-body group recognizers
//!
//! These recognizers cover the groups shared by METAR and TAF bodies and by
//! every trend group: winds, visibilities, vertical visibility and cloud
//! layers. Each holds one anchored regex; the supplier order in
//! [`super::CommandSupplier`] decides precedence between them.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::Command;
use crate::models::{
    Cloud, CloudQuantity, CloudType, DistanceUnit, MinVisibility, SpeedUnit, ValueIndicator,
    Visibility, Wind, WindShear, WeatherContainer, degrees_to_cardinal,
};
use crate::{Error, Result};

static WIND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(VRB|[0-3]\d{2})(\d{2})(?:G(\d{2,3}))?(KT|MPS|KM/H)?$").unwrap());

static WIND_SHEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^WS(\d{3})/(VRB|[0-3]\d{2})(\d{2})(?:G(\d{2,3}))?(KT|MPS|KM/H)$").unwrap()
});

static WIND_VARIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})V(\d{3})$").unwrap());

static MAIN_VISIBILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(NDV)?$").unwrap());

static MILES_VISIBILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([MP])?(\d{1,2})?\s?(\d/\d)?SM$").unwrap());

static MINIMAL_VISIBILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})([a-z])$").unwrap());

static VERTICAL_VISIBILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^VV(\d{3})$").unwrap());

static CLOUD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{3})(\d{3})?(CB|TCU|CI|CC|CS|AC|AS|NS|SC|ST|CU)?(CB|TCU|CI|CC|CS|AC|AS|NS|SC|ST|CU)?([A-Z]{0,3})$").unwrap()
});

/// Decode the shared wind fields of a wind or wind-shear group.
fn build_wind(
    direction: &str,
    speed: &str,
    gust: Option<&str>,
    unit: Option<&str>,
) -> Result<Wind> {
    let (degrees, cardinal) = if direction == "VRB" {
        (None, "VRB".to_string())
    } else {
        let degrees: u32 = direction
            .parse()
            .map_err(|_| Error::unknown_code("wind direction", direction))?;
        (Some(degrees), degrees_to_cardinal(degrees).to_string())
    };

    let unit = match unit {
        Some(u) => u.parse::<SpeedUnit>()?,
        None => SpeedUnit::Knot,
    };

    Ok(Wind {
        speed: speed
            .parse()
            .map_err(|_| Error::unknown_code("wind speed", speed))?,
        direction: cardinal,
        degrees,
        gust: gust.and_then(|g| g.parse().ok()),
        min_variation: None,
        max_variation: None,
        unit,
    })
}

/// Surface wind group (24015G25KT, VRB03MPS).
pub struct WindCommand;

impl WindCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for WindCommand {
    fn can_parse(&self, token: &str) -> bool {
        WIND_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = WIND_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        container.wind = Some(build_wind(
            &caps[1],
            &caps[2],
            caps.get(3).map(|m| m.as_str()),
            caps.get(4).map(|m| m.as_str()),
        )?);
        Ok(true)
    }
}

/// Wind shear group (WS020/24045KT).
pub struct WindShearCommand;

impl WindShearCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for WindShearCommand {
    fn can_parse(&self, token: &str) -> bool {
        WIND_SHEAR_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = WIND_SHEAR_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        let height: u32 = caps[1]
            .parse::<u32>()
            .map_err(|_| Error::unknown_code("wind shear height", &caps[1]))?
            * 100;
        container.wind_shear = Some(WindShear {
            height,
            wind: build_wind(
                &caps[2],
                &caps[3],
                caps.get(4).map(|m| m.as_str()),
                caps.get(5).map(|m| m.as_str()),
            )?,
        });
        Ok(true)
    }
}

/// Wind direction variation group (180V250); extends a prior wind group.
pub struct WindVariationCommand;

impl WindVariationCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for WindVariationCommand {
    fn can_parse(&self, token: &str) -> bool {
        WIND_VARIATION_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = WIND_VARIATION_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        if let Some(wind) = container.wind.as_mut() {
            wind.min_variation = caps[1].parse().ok();
            wind.max_variation = caps[2].parse().ok();
        } else {
            debug!(token, "wind variation without a preceding wind group");
        }
        Ok(true)
    }
}

/// Metric prevailing visibility (5000, 9999, 0400NDV).
pub struct MainVisibilityCommand;

impl MainVisibilityCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MainVisibilityCommand {
    fn can_parse(&self, token: &str) -> bool {
        MAIN_VISIBILITY_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = MAIN_VISIBILITY_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        let value: f64 = caps[1]
            .parse()
            .map_err(|_| Error::unknown_code("visibility", &caps[1]))?;
        // A subsequent minimum-direction sub-reading may still extend this.
        let min = container.visibility.take().and_then(|v| v.min);
        container.visibility = Some(Visibility {
            value,
            unit: DistanceUnit::Meters,
            indicator: if value >= 9999.0 {
                Some(ValueIndicator::GreaterThan)
            } else {
                None
            },
            ndv: caps.get(2).is_some(),
            min,
        });
        Ok(true)
    }
}

/// Statute-mile visibility (P6SM, 1 1/2SM, 3/4SM).
pub struct MainVisibilityMilesCommand;

impl MainVisibilityMilesCommand {
    pub fn new() -> Self {
        Self
    }
}

/// Numeric value of a whole-number-plus-fraction mile figure.
fn miles_value(whole: Option<&str>, fraction: Option<&str>) -> f64 {
    let whole: f64 = whole.and_then(|w| w.parse().ok()).unwrap_or(0.0);
    let fraction = fraction
        .and_then(|f| {
            let (num, den) = f.split_once('/')?;
            Some(num.parse::<f64>().ok()? / den.parse::<f64>().ok()?)
        })
        .unwrap_or(0.0);
    whole + fraction
}

impl Command for MainVisibilityMilesCommand {
    fn can_parse(&self, token: &str) -> bool {
        MILES_VISIBILITY_RE
            .captures(token)
            .is_some_and(|caps| caps.get(2).is_some() || caps.get(3).is_some())
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = MILES_VISIBILITY_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        let indicator = match caps.get(1).map(|m| m.as_str()) {
            Some("P") => Some(ValueIndicator::GreaterThan),
            Some("M") => Some(ValueIndicator::LessThan),
            _ => None,
        };
        container.visibility = Some(Visibility {
            value: miles_value(
                caps.get(2).map(|m| m.as_str()),
                caps.get(3).map(|m| m.as_str()),
            ),
            unit: DistanceUnit::StatuteMiles,
            indicator,
            ndv: false,
            min: None,
        });
        Ok(true)
    }
}

/// Minimum directional visibility sub-reading (1100w).
pub struct MinimalVisibilityCommand;

impl MinimalVisibilityCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for MinimalVisibilityCommand {
    fn can_parse(&self, token: &str) -> bool {
        MINIMAL_VISIBILITY_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = MINIMAL_VISIBILITY_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        match container.visibility.as_mut() {
            Some(visibility) => {
                visibility.min = Some(MinVisibility {
                    value: caps[1]
                        .parse()
                        .map_err(|_| Error::unknown_code("minimum visibility", &caps[1]))?,
                    direction: caps[2].to_string(),
                });
            }
            None => debug!(token, "minimum visibility without a prevailing visibility"),
        }
        Ok(true)
    }
}

/// Vertical visibility group (VV003), hundreds of feet.
pub struct VerticalVisibilityCommand;

impl VerticalVisibilityCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for VerticalVisibilityCommand {
    fn can_parse(&self, token: &str) -> bool {
        VERTICAL_VISIBILITY_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = VERTICAL_VISIBILITY_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        container.vertical_visibility = caps[1].parse::<u32>().ok().map(|v| v * 100);
        Ok(true)
    }
}

/// Cloud layer group (FEW040, SCT026CB, NSC).
pub struct CloudCommand;

impl CloudCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CloudCommand {
    fn can_parse(&self, token: &str) -> bool {
        CLOUD_RE
            .captures(token)
            .is_some_and(|caps| caps[1].parse::<CloudQuantity>().is_ok())
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = CLOUD_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        let quantity: CloudQuantity = caps[1].parse()?;
        // Non-standard trailing letters fall into the last group and are
        // dropped rather than failing the whole layer.
        let cloud_type = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<CloudType>().ok());
        let secondary_type = caps
            .get(4)
            .and_then(|m| m.as_str().parse::<CloudType>().ok());

        container.clouds.push(Cloud {
            quantity,
            height: caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()).map(|h| h * 100),
            cloud_type,
            secondary_type,
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(command: &dyn Command, token: &str) -> WeatherContainer {
        let mut container = WeatherContainer::default();
        assert!(command.can_parse(token), "can_parse rejected {token}");
        command.execute(&mut container, token).unwrap();
        container
    }

    #[test]
    fn test_wind_with_gusts() {
        let container = run(&WindCommand::new(), "24015G25KT");
        let wind = container.wind.unwrap();
        assert_eq!(wind.degrees, Some(240));
        assert_eq!(wind.direction, "WSW");
        assert_eq!(wind.speed, 15);
        assert_eq!(wind.gust, Some(25));
        assert_eq!(wind.unit, SpeedUnit::Knot);
    }

    #[test]
    fn test_gust_figure_requires_marker() {
        // Five speed digits without a G marker is not a gusting wind group.
        assert!(!WindCommand::new().can_parse("2401525KT"));
        assert!(!WindShearCommand::new().can_parse("WS020/2404525KT"));
    }

    #[test]
    fn test_variable_wind() {
        let container = run(&WindCommand::new(), "VRB03MPS");
        let wind = container.wind.unwrap();
        assert_eq!(wind.direction, "VRB");
        assert_eq!(wind.degrees, None);
        assert_eq!(wind.unit, SpeedUnit::MeterPerSecond);
    }

    #[test]
    fn test_wind_variation_extends_wind() {
        let mut container = run(&WindCommand::new(), "24015KT");
        WindVariationCommand::new()
            .execute(&mut container, "180V250")
            .unwrap();
        let wind = container.wind.unwrap();
        assert_eq!(wind.min_variation, Some(180));
        assert_eq!(wind.max_variation, Some(250));
    }

    #[test]
    fn test_wind_shear() {
        let container = run(&WindShearCommand::new(), "WS020/24045KT");
        let shear = container.wind_shear.unwrap();
        assert_eq!(shear.height, 2000);
        assert_eq!(shear.wind.degrees, Some(240));
        assert_eq!(shear.wind.speed, 45);
    }

    #[test]
    fn test_metric_visibility() {
        let container = run(&MainVisibilityCommand::new(), "5000");
        let visibility = container.visibility.unwrap();
        assert_eq!(visibility.value, 5000.0);
        assert_eq!(visibility.unit, DistanceUnit::Meters);
        assert!(visibility.indicator.is_none());
    }

    #[test]
    fn test_metric_visibility_unlimited() {
        let container = run(&MainVisibilityCommand::new(), "9999");
        let visibility = container.visibility.unwrap();
        assert_eq!(visibility.indicator, Some(ValueIndicator::GreaterThan));
    }

    #[test]
    fn test_visibility_ndv_flag() {
        let container = run(&MainVisibilityCommand::new(), "0400NDV");
        assert!(container.visibility.unwrap().ndv);
    }

    #[test]
    fn test_miles_visibility_fraction() {
        let container = run(&MainVisibilityMilesCommand::new(), "1 1/2SM");
        let visibility = container.visibility.unwrap();
        assert_eq!(visibility.value, 1.5);
        assert_eq!(visibility.unit, DistanceUnit::StatuteMiles);
    }

    #[test]
    fn test_miles_visibility_greater_than() {
        let container = run(&MainVisibilityMilesCommand::new(), "P6SM");
        let visibility = container.visibility.unwrap();
        assert_eq!(visibility.value, 6.0);
        assert_eq!(visibility.indicator, Some(ValueIndicator::GreaterThan));
    }

    #[test]
    fn test_bare_sm_is_rejected() {
        assert!(!MainVisibilityMilesCommand::new().can_parse("SM"));
    }

    #[test]
    fn test_minimal_visibility() {
        let mut container = run(&MainVisibilityCommand::new(), "5000");
        MinimalVisibilityCommand::new()
            .execute(&mut container, "1100w")
            .unwrap();
        let min = container.visibility.unwrap().min.unwrap();
        assert_eq!(min.value, 1100);
        assert_eq!(min.direction, "w");
    }

    #[test]
    fn test_vertical_visibility() {
        let container = run(&VerticalVisibilityCommand::new(), "VV003");
        assert_eq!(container.vertical_visibility, Some(300));
    }

    #[test]
    fn test_cloud_layer_with_type() {
        let container = run(&CloudCommand::new(), "SCT026CB");
        let cloud = &container.clouds[0];
        assert_eq!(cloud.quantity, CloudQuantity::Sct);
        assert_eq!(cloud.height, Some(2600));
        assert_eq!(cloud.cloud_type, Some(CloudType::Cb));
    }

    #[test]
    fn test_cloud_layer_with_double_type() {
        let container = run(&CloudCommand::new(), "SCT026CBTCU");
        let cloud = &container.clouds[0];
        assert_eq!(cloud.cloud_type, Some(CloudType::Cb));
        assert_eq!(cloud.secondary_type, Some(CloudType::Tcu));
    }

    #[test]
    fn test_cloud_layer_drops_unknown_annotation() {
        let container = run(&CloudCommand::new(), "SCT026XY");
        let cloud = &container.clouds[0];
        assert_eq!(cloud.height, Some(2600));
        assert_eq!(cloud.cloud_type, None);
    }

    #[test]
    fn test_cloud_quantity_only() {
        let container = run(&CloudCommand::new(), "NSC");
        let cloud = &container.clouds[0];
        assert_eq!(cloud.quantity, CloudQuantity::Nsc);
        assert_eq!(cloud.height, None);
    }

    #[test]
    fn test_cloud_rejects_unknown_quantity() {
        assert!(!CloudCommand::new().can_parse("XYZ020"));
    }
}
