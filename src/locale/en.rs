//! Bundled English message catalog.

use super::MessageCatalog;
use crate::{Error, Result};

/// English templates for the remark vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

/// Key/template table. Linear, small, and only consulted once per decoded
/// remark.
const MESSAGES: &[(&str, &str)] = &[
    ("remark.ceiling_height", "ceiling varying between {0} and {1} feet"),
    ("remark.ceiling_second_location", "ceiling of {0} feet measured by a second sensor located at {1}"),
    ("remark.hail_size", "largest hailstones with a diameter of {0} inches"),
    ("remark.small_hail_size", "largest hailstones with a diameter less than {0} inches"),
    ("remark.hourly_maximum_temperature", "6-hourly maximum temperature of {0}°C"),
    ("remark.hourly_minimum_temperature", "6-hourly minimum temperature of {0}°C"),
    ("remark.hourly_maximum_minimum_temperature", "24-hour maximum temperature of {0}°C and minimum temperature of {1}°C"),
    ("remark.hourly_precipitation_amount", "{0} inches of precipitation fell in the last hour"),
    ("remark.hourly_pressure", "{0} of {1} hectopascals in the past 3 hours"),
    ("remark.hourly_temperature", "hourly temperature of {0}°C"),
    ("remark.hourly_temperature_dew_point", "hourly temperature of {0}°C and dew point of {1}°C"),
    ("remark.ice_accretion", "{0} inches of ice accretion in the last {1} hour(s)"),
    ("remark.obscuration", "{0} layer at {1} feet composed of {2}"),
    ("remark.precipitation_amount_24", "{0} inches of precipitation fell in the last 24 hours"),
    ("remark.precipitation_amount_3_6", "{0} inches of precipitation fell in the last {1} hours"),
    ("remark.precipitation_beg_end", "{0}{1} began at {2}:{3} and ended at {4}:{5}"),
    ("remark.prevailing_visibility", "prevailing visibility of {0} statute miles"),
    ("remark.sea_level_pressure", "sea level pressure of {0} hPa"),
    ("remark.second_location_visibility", "visibility of {0} statute miles measured by a second sensor located at {1}"),
    ("remark.sector_visibility", "visibility of {1} statute miles in the {0} direction"),
    ("remark.snow_depth", "snow depth of {0} inches"),
    ("remark.snow_increase", "snow depth increase of {0} inches in the past hour with a total depth of {1} inches"),
    ("remark.snow_pellets", "{0} snow pellets"),
    ("remark.sunshine_duration", "{0} minutes of sunshine"),
    ("remark.surface_visibility", "surface visibility of {0} statute miles"),
    ("remark.thunderstorm_location", "thunderstorm {0} of the station"),
    ("remark.thunderstorm_location_moving", "thunderstorm {0} of the station moving towards {1}"),
    ("remark.tornadic_activity_beg", "{0} beginning at {1}:{2}, {3} SM {4} of the station"),
    ("remark.tornadic_activity_beg_end", "{0} beginning at {1}:{2} and ending at {3}:{4}, {5} SM {6} of the station"),
    ("remark.tornadic_activity_end", "{0} ending at {1}:{2}, {3} SM {4} of the station"),
    ("remark.tower_visibility", "control tower visibility of {0} statute miles"),
    ("remark.variable_sky", "sky cover varying between {0} and {1}"),
    ("remark.variable_sky_height", "sky cover at {1} feet varying between {0} and {2}"),
    ("remark.virga_direction", "virga {0} of the station"),
    ("remark.water_equivalent_snow", "water equivalent of {0} inches of snow on the ground"),
    ("remark.wind_peak", "peak wind of {1} knots from {0} degrees at {2}:{3}"),
    ("remark.wind_shift", "wind shift at {0}:{1}"),
    ("remark.wind_shift_fropa", "wind shift accompanied by a frontal passage at {0}:{1}"),
    ("remark.pressure_tendency.0", "increasing then decreasing"),
    ("remark.pressure_tendency.1", "increasing more slowly"),
    ("remark.pressure_tendency.2", "increasing"),
    ("remark.pressure_tendency.3", "increasing more rapidly"),
    ("remark.pressure_tendency.4", "steady"),
    ("remark.pressure_tendency.5", "decreasing then increasing"),
    ("remark.pressure_tendency.6", "decreasing more slowly"),
    ("remark.pressure_tendency.7", "decreasing"),
    ("remark.pressure_tendency.8", "decreasing more rapidly"),
    ("remark.ao1", "automated station without a precipitation discriminator"),
    ("remark.ao2", "automated station with a precipitation discriminator"),
    ("remark.presfr", "pressure falling rapidly"),
    ("remark.presrr", "pressure rising rapidly"),
    ("remark.nospeci", "no SPECI reports are taken at the station"),
    ("remark.tsno", "thunderstorm information not available"),
    ("remark.rvrno", "runway visual range not available"),
    ("remark.pwino", "present weather identifier not operating"),
    ("remark.pno", "precipitation amount not available"),
    ("remark.fzrano", "freezing rain information not available"),
    ("remark.slpno", "sea level pressure not available"),
    ("remark.froin", "frost on the indicator"),
    ("remark.first", "first report of the day"),
    ("remark.last", "last report of the day"),
];

impl MessageCatalog for EnglishCatalog {
    fn translate(&self, key: &str) -> Result<String> {
        MESSAGES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, template)| (*template).to_string())
            .ok_or_else(|| Error::MissingTranslation {
                key: key.to_string(),
            })
    }
}
