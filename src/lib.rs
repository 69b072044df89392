//! METAR and TAF Decoder Library
//!
//! A Rust library for decoding aviation weather reports: METAR current
//! observations and TAF terminal aerodrome forecasts.
//!
//! This library provides tools for:
//! - Tokenizing raw reports and dispatching groups through ordered
//!   recognizer chains
//! - Decoding METAR bodies, inline trends, and runway state groups
//! - Decoding multi-period TAFs with FM/BECMG/TEMPO/PROB change lines
//! - Decoding the free-text remark section into typed, described remarks
//! - Resolving partial day/hour report times into absolute instants
//! - Composing a dated TAF into a queryable forecast timeline
//!
//! ```no_run
//! use avwx_decoder::locale::EnglishCatalog;
//! use avwx_decoder::parser::MetarParser;
//!
//! let catalog = EnglishCatalog;
//! let parser = MetarParser::new(&catalog);
//! let metar = parser.parse("LFPG 161430Z 24015G25KT 5000 1100w")?;
//! assert_eq!(metar.station, "LFPG");
//! # Ok::<(), avwx_decoder::Error>(())
//! ```

pub mod commands;
pub mod dates;
pub mod error;
pub mod forecast;
pub mod locale;
pub mod models;
pub mod parser;

pub use error::{Error, Result};
pub use forecast::{CompositeForecast, DatedTrend, ForecastContainer};
pub use models::{Metar, Taf, WeatherContainer};
pub use parser::{MetarParser, TafParser};
