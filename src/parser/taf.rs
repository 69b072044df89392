//! TAF state machine
//!
//! A TAF is decoded line-wise: the report is flattened, a line break is
//! inserted before every change-group keyword, and each resulting line is
//! tokenized independently. The first line is the issuance header; every
//! further line becomes one trend group.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{general_parse, parse_day_time, tokenize};
use crate::commands::{CommandSupplier, RemarkParser, TafCommandSupplier};
use crate::locale::MessageCatalog;
use crate::models::{
    StartValidity, Taf, TafTrend, TemperatureDated, TrendValidity, Validity, WeatherChangeType,
    WeatherContainer,
};
use crate::{Error, Result};

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" (TEMPO|BECMG|FM\d{6}|PROB\d{2})").unwrap());

static PROB_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^PROB\d{2}$").unwrap());

static PROB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^PROB(\d{2})$").unwrap());

static FM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^FM(\d{2})(\d{2})(\d{2})$").unwrap());

static VALIDITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2})/(\d{2})(\d{2})$").unwrap());

static TEMPERATURE_DATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(TX|TN)(M?\d{2})/(\d{2})(\d{2})Z$").unwrap());

/// Decoder for TAF reports.
pub struct TafParser<'c> {
    supplier: CommandSupplier,
    taf_supplier: TafCommandSupplier,
    remark_parser: RemarkParser<'c>,
}

impl<'c> TafParser<'c> {
    /// Create a parser sourcing remark descriptions from the catalog.
    pub fn new(catalog: &'c dyn MessageCatalog) -> Self {
        Self {
            supplier: CommandSupplier::new(),
            taf_supplier: TafCommandSupplier::new(),
            remark_parser: RemarkParser::new(catalog),
        }
    }

    /// Decode one TAF report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReport`] when the report lacks the TAF
    /// marker, the station, or a validity window.
    pub fn parse(&self, report: &str) -> Result<Taf> {
        let lines = extract_lines(report);
        if lines.is_empty() {
            return Err(Error::invalid_report("empty report"));
        }

        let mut taf = self.parse_header(&lines[0], report)?;

        for line in &lines[1..] {
            let trend = self.parse_trend_line(line)?;
            taf.trends.push(trend);
        }

        Ok(taf)
    }

    /// Decode the issuance header line.
    fn parse_header(&self, line: &str, report: &str) -> Result<Taf> {
        let tokens = tokenize(line);

        // Noise tokens before the first TAF marker are accepted and skipped.
        let mut index = tokens
            .iter()
            .position(|token| token == "TAF")
            .ok_or_else(|| Error::invalid_report("report does not contain the TAF marker"))?;
        index += 1;
        if tokens.get(index).map(String::as_str) == Some("TAF") {
            index += 1;
        }

        let mut amendment = false;
        let mut correction = false;
        while let Some(token) = tokens.get(index) {
            match token.as_str() {
                "AMD" => amendment = true,
                "COR" => correction = true,
                _ => break,
            }
            index += 1;
        }

        let station = tokens
            .get(index)
            .ok_or_else(|| Error::invalid_report("missing station identifier"))?
            .clone();
        index += 1;

        // The issuance time token is optional; some TAFs omit it.
        let (day, hour, minute) = match tokens.get(index).and_then(|t| parse_day_time(t)) {
            Some((day, hour, minute)) => {
                index += 1;
                (Some(day), Some(hour), Some(minute))
            }
            None => (None, None, None),
        };

        let mut taf = Taf {
            station,
            day,
            hour,
            minute,
            validity: Validity {
                start_day: 0,
                start_hour: 0,
                end_day: 0,
                end_hour: 0,
            },
            max_temperature: None,
            min_temperature: None,
            amendment,
            correction,
            cancelled: false,
            initial_raw: line.to_string(),
            message: report.trim().to_string(),
            trends: vec![],
            weather: WeatherContainer::default(),
        };

        let mut validity_found = false;
        while index < tokens.len() {
            let token = &tokens[index];
            index += 1;

            if !validity_found && let Some(validity) = parse_validity(token) {
                taf.validity = validity;
                validity_found = true;
                continue;
            }
            match token.as_str() {
                "CNL" => {
                    taf.cancelled = true;
                    continue;
                }
                "AMD" => {
                    taf.amendment = true;
                    continue;
                }
                "COR" => {
                    taf.correction = true;
                    continue;
                }
                "RMK" => {
                    let remainder = tokens[index..].join(" ");
                    taf.weather.remarks = self.remark_parser.parse(&remainder);
                    taf.weather.remark_text = Some(remainder);
                    break;
                }
                _ => {}
            }
            if let Some((is_max, temperature)) = parse_temperature_dated(token) {
                match is_max {
                    true => taf.max_temperature = Some(temperature),
                    false => taf.min_temperature = Some(temperature),
                }
                continue;
            }
            if general_parse(&self.supplier, &mut taf.weather, token)? {
                continue;
            }
            if let Some(command) = self.taf_supplier.get(token) {
                command.execute(&mut taf.weather, token)?;
                continue;
            }
            debug!(token, "unrecognized TAF header token dropped");
        }

        if !validity_found {
            return Err(Error::invalid_report("missing validity window"));
        }

        Ok(taf)
    }

    /// Decode one change line into a trend group.
    fn parse_trend_line(&self, line: &str) -> Result<TafTrend> {
        let tokens = tokenize(line);
        let first = tokens
            .first()
            .ok_or_else(|| Error::invalid_report("empty trend line"))?;

        let mut trend = TafTrend {
            change_type: WeatherChangeType::Becmg,
            validity: None,
            probability: None,
            weather: WeatherContainer::default(),
            raw: line.to_string(),
        };

        let mut body_start = 1;
        if let Some(caps) = FM_RE.captures(first) {
            trend.change_type = WeatherChangeType::Fm;
            trend.validity = Some(TrendValidity::Start(StartValidity {
                day: caps[1].parse().unwrap_or(0),
                hour: caps[2].parse().unwrap_or(0),
                minute: caps[3].parse().unwrap_or(0),
            }));
        } else if let Some(caps) = PROB_RE.captures(first) {
            trend.probability = caps[1].parse().ok();
            trend.change_type = match tokens.get(1).map(String::as_str) {
                Some("TEMPO") => {
                    body_start = 2;
                    WeatherChangeType::Tempo
                }
                Some("INTER") => {
                    body_start = 2;
                    WeatherChangeType::Inter
                }
                _ => WeatherChangeType::Prob,
            };
        } else {
            trend.change_type = match first.as_str() {
                "BECMG" => WeatherChangeType::Becmg,
                "TEMPO" => WeatherChangeType::Tempo,
                "INTER" => WeatherChangeType::Inter,
                other => {
                    return Err(Error::invalid_report(format!(
                        "unrecognized change group '{other}'"
                    )));
                }
            };
        }

        let mut index = body_start;
        while index < tokens.len() {
            let token = &tokens[index];
            index += 1;

            // The start/end window may sit anywhere later in the line.
            if trend.validity.is_none() && let Some(validity) = parse_validity(token) {
                trend.validity = Some(TrendValidity::Window(validity));
                continue;
            }
            if token == "RMK" {
                let remainder = tokens[index..].join(" ");
                trend.weather.remarks = self.remark_parser.parse(&remainder);
                trend.weather.remark_text = Some(remainder);
                break;
            }
            if general_parse(&self.supplier, &mut trend.weather, token)? {
                continue;
            }
            if let Some(command) = self.taf_supplier.get(token) {
                command.execute(&mut trend.weather, token)?;
                continue;
            }
            debug!(token, "unrecognized trend token dropped");
        }

        Ok(trend)
    }
}

/// Split a report into one line per change group.
///
/// Newlines and whitespace runs collapse to single spaces; a break is then
/// inserted before every TEMPO, BECMG, FMddhhmm and PROBnn keyword. A
/// PROBnn left alone on a line is rejoined with the TEMPO/INTER line it
/// introduces. Dated max/min temperature tokens trailing the last change
/// line belong to the report, not the trend, and float back onto the
/// header line.
fn extract_lines(report: &str) -> Vec<String> {
    let flat = report
        .replace('=', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let broken = LINE_BREAK_RE.replace_all(&flat, "\n$1");

    let lines: Vec<&str> = broken.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let mut merged: Vec<String> = Vec::with_capacity(lines.len());
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        if PROB_ONLY_RE.is_match(line)
            && lines
                .get(index + 1)
                .is_some_and(|next| next.starts_with("TEMPO") || next.starts_with("INTER"))
        {
            merged.push(format!("{} {}", line, lines[index + 1]));
            index += 2;
        } else {
            merged.push(line.to_string());
            index += 1;
        }
    }

    if merged.len() > 1 {
        let last = merged.last().cloned().unwrap_or_default();
        let mut tokens: Vec<&str> = last.split_whitespace().collect();
        let mut floated = vec![];
        while tokens
            .last()
            .is_some_and(|token| TEMPERATURE_DATED_RE.is_match(token))
        {
            floated.push(tokens.pop().unwrap_or_default());
        }
        if !floated.is_empty() {
            floated.reverse();
            let trimmed = tokens.join(" ");
            match trimmed.is_empty() {
                true => {
                    merged.pop();
                }
                false => {
                    if let Some(slot) = merged.last_mut() {
                        *slot = trimmed;
                    }
                }
            }
            if let Some(header) = merged.first_mut() {
                header.push(' ');
                header.push_str(&floated.join(" "));
            }
        }
    }

    merged
}

fn parse_validity(token: &str) -> Option<Validity> {
    let caps = VALIDITY_RE.captures(token)?;
    Some(Validity {
        start_day: caps[1].parse().ok()?,
        start_hour: caps[2].parse().ok()?,
        end_day: caps[3].parse().ok()?,
        end_hour: caps[4].parse().ok()?,
    })
}

/// Dated max/min temperature token (TX15/1518Z). Returns whether it is a
/// maximum together with the decoded value.
fn parse_temperature_dated(token: &str) -> Option<(bool, TemperatureDated)> {
    let caps = TEMPERATURE_DATED_RE.captures(token)?;
    let figure = &caps[2];
    let temperature: i32 = match figure.strip_prefix('M') {
        Some(rest) => -rest.parse::<i32>().ok()?,
        None => figure.parse().ok()?,
    };
    Some((
        &caps[1] == "TX",
        TemperatureDated {
            temperature,
            day: caps[3].parse().ok()?,
            hour: caps[4].parse().ok()?,
        },
    ))
}
