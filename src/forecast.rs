//! Forecast timeline derived from a dated TAF.
//!
//! A decoded TAF carries day/hour fields only. [`ForecastContainer`]
//! hydrates those into absolute instants against a reference time and
//! exposes [`ForecastContainer::composite_at`], which resolves the forecast
//! state applicable at one instant: a single base period plus any bounded
//! trend groups overlapping it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dates::{resolve_issued, resolve_relative};
use crate::models::{Taf, TrendValidity, WeatherChangeType, WeatherContainer};
use crate::{Error, Result};

/// One forecast period with absolute start (and, for bounded change types,
/// end) instants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedTrend {
    #[serde(rename = "type")]
    pub change_type: WeatherChangeType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u32>,

    pub start: DateTime<Utc>,

    /// Absent for FM and the initial period, which run until superseded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub weather: WeatherContainer,

    pub raw: String,
}

/// A TAF hydrated into an absolute, queryable timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastContainer {
    pub station: String,

    /// Resolved issuance instant
    pub issued: DateTime<Utc>,

    /// Start of the overall validity window
    pub start: DateTime<Utc>,

    /// End of the overall validity window
    pub end: DateTime<Utc>,

    /// The full report text the TAF was decoded from
    pub message: String,

    /// Forecast periods in source order, beginning with the initial period
    pub trends: Vec<DatedTrend>,
}

/// The forecast state resolved at one instant. Recomputed per query, never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeForecast<'f> {
    /// The endless period in effect at the instant
    pub base: &'f DatedTrend,

    /// Bounded trend groups overlapping the instant, in trend order. Which
    /// of them takes display precedence is left to the caller.
    pub additional: Vec<&'f DatedTrend>,
}

impl ForecastContainer {
    /// Hydrate a decoded TAF against a reference instant.
    ///
    /// The header conditions become a synthetic initial period dated at the
    /// validity start, so FM trends and the initial state are handled
    /// uniformly when querying.
    pub fn from_taf(taf: &Taf, reference: DateTime<Utc>) -> Self {
        let issued = resolve_issued(reference, taf.day, taf.hour, taf.minute.unwrap_or(0));
        let start = resolve_relative(issued, taf.validity.start_day, taf.validity.start_hour, 0);
        let end = resolve_relative(issued, taf.validity.end_day, taf.validity.end_hour, 0);

        let mut trends = vec![DatedTrend {
            change_type: WeatherChangeType::Fm,
            probability: None,
            start,
            end: None,
            weather: taf.weather.clone(),
            raw: taf.initial_raw.clone(),
        }];

        for trend in &taf.trends {
            let (trend_start, trend_end) = match trend.validity {
                Some(TrendValidity::Start(validity)) => (
                    resolve_relative(issued, validity.day, validity.hour, validity.minute),
                    None,
                ),
                Some(TrendValidity::Window(validity)) => (
                    resolve_relative(issued, validity.start_day, validity.start_hour, 0),
                    Some(resolve_relative(issued, validity.end_day, validity.end_hour, 0)),
                ),
                // A change line without a window applies over the whole
                // forecast.
                None => (start, Some(end)),
            };
            trends.push(DatedTrend {
                change_type: trend.change_type,
                probability: trend.probability,
                start: trend_start,
                end: trend_end,
                weather: trend.weather.clone(),
                raw: trend.raw.clone(),
            });
        }

        Self {
            station: taf.station.clone(),
            issued,
            start,
            end,
            message: taf.message.clone(),
            trends,
        }
    }

    /// Resolve the forecast state applicable at `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfForecastRange`] when `instant` lies outside the
    /// overall validity window.
    pub fn composite_at(&self, instant: DateTime<Utc>) -> Result<CompositeForecast<'_>> {
        if instant < self.start || instant > self.end {
            return Err(Error::OutOfForecastRange {
                instant,
                start: self.start,
                end: self.end,
            });
        }

        let mut base = None;
        let mut additional = vec![];
        for trend in &self.trends {
            match trend.end {
                // Endless periods are disjoint; the last one started wins.
                None if trend.start <= instant => base = Some(trend),
                Some(end) if trend.start <= instant && instant < end => additional.push(trend),
                _ => {}
            }
        }

        let base = base.ok_or_else(|| Error::OutOfForecastRange {
            instant,
            start: self.start,
            end: self.end,
        })?;

        Ok(CompositeForecast { base, additional })
    }
}
