//! METAR state machine
//!
//! Walks the token stream after the station and day/time header: body
//! groups, report flags, nested TEMPO/BECMG trend groups with their
//! AT/FM/TL time indicators, METAR-only groups, and the remark section.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{general_parse, parse_day_time, tokenize};
use crate::commands::{CommandSupplier, MetarCommandSupplier, RemarkParser};
use crate::locale::MessageCatalog;
use crate::models::{Metar, MetarTrend, MetarTrendTime, TimeIndicator, WeatherChangeType, WeatherContainer};
use crate::{Error, Result};

static TREND_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(AT|FM|TL)(\d{2})(\d{2})$").unwrap());

/// Decoder for METAR reports.
pub struct MetarParser<'c> {
    supplier: CommandSupplier,
    metar_supplier: MetarCommandSupplier,
    remark_parser: RemarkParser<'c>,
}

impl<'c> MetarParser<'c> {
    /// Create a parser sourcing remark descriptions from the catalog.
    pub fn new(catalog: &'c dyn MessageCatalog) -> Self {
        Self {
            supplier: CommandSupplier::new(),
            metar_supplier: MetarCommandSupplier::new(),
            remark_parser: RemarkParser::new(catalog),
        }
    }

    /// Decode one METAR report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidReport`] when the report is too short or the
    /// day/time header is malformed.
    pub fn parse(&self, report: &str) -> Result<Metar> {
        let tokens = tokenize(report);
        if tokens.len() < 2 {
            return Err(Error::invalid_report(
                "report needs at least a station and a day/time header",
            ));
        }

        let (day, hour, minute) = parse_day_time(&tokens[1]).ok_or_else(|| {
            Error::invalid_report(format!("malformed day/time header '{}'", tokens[1]))
        })?;

        let mut metar = Metar {
            station: tokens[0].clone(),
            day,
            hour,
            minute,
            temperature: None,
            dew_point: None,
            altimeter: None,
            nosig: false,
            auto: false,
            nil: false,
            runways: vec![],
            trends: vec![],
            weather: WeatherContainer::default(),
            message: report.trim().to_string(),
        };

        let mut index = 2;
        while index < tokens.len() {
            let token = &tokens[index];

            if general_parse(&self.supplier, &mut metar.weather, token)? {
                index += 1;
            } else if token == "NOSIG" {
                metar.nosig = true;
                index += 1;
            } else if token == "AUTO" {
                metar.auto = true;
                index += 1;
            } else if token == "NIL" {
                metar.nil = true;
                index += 1;
            } else if token == "TEMPO" || token == "BECMG" {
                index = self.parse_trend(&mut metar, &tokens, index)?;
            } else if token == "RMK" {
                let remainder = tokens[index + 1..].join(" ");
                metar.weather.remarks = self.remark_parser.parse(&remainder);
                metar.weather.remark_text = Some(remainder);
                break;
            } else if let Some(command) = self.metar_supplier.get(token) {
                command.execute(&mut metar, token)?;
                index += 1;
            } else {
                debug!(token, "unrecognized METAR token dropped");
                index += 1;
            }
        }

        Ok(metar)
    }

    /// Consume one nested trend group starting at the TEMPO/BECMG keyword.
    /// Returns the index of the first token not belonging to the trend.
    fn parse_trend(&self, metar: &mut Metar, tokens: &[String], start: usize) -> Result<usize> {
        let change_type = if tokens[start] == "TEMPO" {
            WeatherChangeType::Tempo
        } else {
            WeatherChangeType::Becmg
        };

        let mut trend = MetarTrend {
            change_type,
            times: vec![],
            weather: WeatherContainer::default(),
            raw: String::new(),
        };

        let mut span = vec![tokens[start].clone()];
        let mut index = start + 1;
        while index < tokens.len() {
            let token = &tokens[index];
            if token == "TEMPO" || token == "BECMG" || token == "RMK" {
                break;
            }

            if let Some(caps) = TREND_TIME_RE.captures(token) {
                trend.times.push(MetarTrendTime {
                    indicator: caps[1].parse::<TimeIndicator>()?,
                    hour: caps[2].parse().unwrap_or(0),
                    minute: caps[3].parse().unwrap_or(0),
                });
            } else if !general_parse(&self.supplier, &mut trend.weather, token)? {
                debug!(token, "unrecognized trend token dropped");
            }
            span.push(token.clone());
            index += 1;
        }

        trend.raw = span.join(" ");
        metar.trends.push(trend);
        Ok(index)
    }
}
