//! TAF-only group recognizers
//!
//! Forecast turbulence (5BhBhBhBtL) and icing (6IchihihitL) layer groups.
//! Both encode an intensity digit, a layer base in hundreds of feet and a
//! layer depth in thousands of feet.

use std::sync::LazyLock;

use regex::Regex;

use super::Command;
use crate::models::{Icing, Turbulence, WeatherContainer};
use crate::{Error, Result};

static TURBULENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^5(\d)(\d{3})(\d)$").unwrap());

static ICING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^6(\d)(\d{3})(\d)$").unwrap());

/// Forecast turbulence layer group.
pub struct TurbulenceCommand;

impl TurbulenceCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for TurbulenceCommand {
    fn can_parse(&self, token: &str) -> bool {
        TURBULENCE_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = TURBULENCE_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        container.turbulence.push(Turbulence {
            intensity: caps[1]
                .parse()
                .map_err(|_| Error::unknown_code("turbulence intensity", &caps[1]))?,
            base_height: caps[2]
                .parse::<u32>()
                .map_err(|_| Error::unknown_code("turbulence base", &caps[2]))?
                * 100,
            depth: caps[3]
                .parse::<u32>()
                .map_err(|_| Error::unknown_code("turbulence depth", &caps[3]))?
                * 1000,
        });
        Ok(true)
    }
}

/// Forecast icing layer group.
pub struct IcingCommand;

impl IcingCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for IcingCommand {
    fn can_parse(&self, token: &str) -> bool {
        ICING_RE.is_match(token)
    }

    fn execute(&self, container: &mut WeatherContainer, token: &str) -> Result<bool> {
        let caps = ICING_RE
            .captures(token)
            .ok_or_else(|| Error::unexpected_token(token))?;

        container.icing.push(Icing {
            intensity: caps[1]
                .parse()
                .map_err(|_| Error::unknown_code("icing intensity", &caps[1]))?,
            base_height: caps[2]
                .parse::<u32>()
                .map_err(|_| Error::unknown_code("icing base", &caps[2]))?
                * 100,
            depth: caps[3]
                .parse::<u32>()
                .map_err(|_| Error::unknown_code("icing depth", &caps[3]))?
                * 1000,
        });
        Ok(true)
    }
}
