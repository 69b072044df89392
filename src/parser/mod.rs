//! Report tokenization and the shared body decoder
//!
//! Both report formats are decoded the same way: the raw text is split into
//! group tokens, and a state machine walks the tokens, offering each one to
//! the generic group dispatcher, a weather-condition heuristic, and the
//! format-specific recognizers, in that order. Tokens nothing claims are
//! dropped without a fault; real-world reports carry station-specific and
//! legacy groups this decoder deliberately tolerates.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::Result;
use crate::commands::CommandSupplier;
use crate::models::{
    Descriptive, Intensity, Phenomenon, PHENOMENON_CODES, Visibility, WeatherCondition,
    WeatherContainer,
};

pub mod metar;
pub mod taf;

#[cfg(test)]
pub mod tests;

pub use metar::MetarParser;
pub use taf::TafParser;

/// The CAVOK literal: ceiling and visibility OK.
const CAVOK: &str = "CAVOK";

static WHOLE_MILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[PM]?\d$").unwrap());

static FRACTION_MILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d/\dSM$").unwrap());

static WEATHER_CONDITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(-|\+|VC|RE)?(MI|PR|BC|DR|BL|SH|TS|FZ)?((?:DZ|RA|SN|SG|IC|PL|GR|GS|UP|FG|BR|HZ|FU|VA|DU|SA|PO|SQ|FC|SS|DS)*)$",
    )
    .unwrap()
});

static DAY_TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2})(\d{2})Z?$").unwrap());

/// Split a raw report into group tokens.
///
/// Splits on whitespace and the `=` terminator, drops empty tokens, and
/// rejoins a bare (optionally P/M-prefixed) single digit with a following
/// fraction-of-a-statute-mile token: "1" + "1/2SM" is one visibility group.
pub fn tokenize(report: &str) -> Vec<String> {
    let tokens: Vec<&str> = report
        .split(|c: char| c.is_whitespace() || c == '=')
        .filter(|token| !token.is_empty())
        .collect();

    let mut joined = Vec::with_capacity(tokens.len());
    let mut index = 0;
    while index < tokens.len() {
        if index + 1 < tokens.len()
            && WHOLE_MILE_RE.is_match(tokens[index])
            && FRACTION_MILE_RE.is_match(tokens[index + 1])
        {
            joined.push(format!("{} {}", tokens[index], tokens[index + 1]));
            index += 2;
        } else {
            joined.push(tokens[index].to_string());
            index += 1;
        }
    }
    joined
}

/// Day/hour/minute of a report time token (161430Z).
pub(crate) fn parse_day_time(token: &str) -> Option<(u32, u32, u32)> {
    let caps = DAY_TIME_RE.captures(token)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// Evaluate a token as a weather-condition group.
///
/// Extracts an optional intensity prefix, an optional descriptive, and a run
/// of phenomenon codes. Returns `None` unless the result satisfies the
/// retention rule: at least one phenomenon, or a thunderstorm descriptive.
pub(crate) fn parse_weather_condition(token: &str) -> Option<WeatherCondition> {
    if token.is_empty() {
        return None;
    }
    let caps = WEATHER_CONDITION_RE.captures(token)?;

    let intensity = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<Intensity>().ok());
    let descriptive = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<Descriptive>().ok());

    let mut phenomenons: Vec<Phenomenon> = Vec::new();
    if let Some(run) = caps.get(3) {
        let run = run.as_str();
        let mut rest = run;
        while !rest.is_empty() {
            let (code, tail) = rest.split_at(2);
            let phenomenon = PHENOMENON_CODES
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, p)| *p)?;
            phenomenons.push(phenomenon);
            rest = tail;
        }
    }

    // Reject tokens the regex technically matches but that carry nothing
    // (station identifiers made of valid two-letter chunks are caught by
    // the retention rule below only when they also lack a descriptive).
    if intensity.is_none() && descriptive.is_none() && phenomenons.is_empty() {
        return None;
    }

    let condition = WeatherCondition {
        intensity,
        descriptive,
        phenomenons,
    };
    condition.is_valid().then_some(condition)
}

/// Decode one body token into the shared weather container.
///
/// CAVOK first, then the generic group dispatcher, then the
/// weather-condition heuristic. Returns whether the token was consumed;
/// unmatched tokens raise no fault.
pub(crate) fn general_parse(
    supplier: &CommandSupplier,
    container: &mut WeatherContainer,
    token: &str,
) -> Result<bool> {
    if token == CAVOK {
        container.cavok = true;
        container.visibility = Some(Visibility::cavok());
        return Ok(true);
    }

    if let Some(command) = supplier.get(token) {
        return command.execute(container, token);
    }

    if let Some(condition) = parse_weather_condition(token) {
        debug!(token, "decoded weather condition group");
        container.weather_conditions.push(condition);
        return Ok(true);
    }

    Ok(false)
}
