//! Shared test utilities and fixtures for the report parsers

use crate::Result;
use crate::locale::EnglishCatalog;
use crate::models::{Metar, Taf};

use super::{MetarParser, TafParser};

pub mod metar_tests;
pub mod taf_tests;
pub mod tokenizer_tests;

/// Decode a METAR with the bundled English catalog
pub fn parse_metar(report: &str) -> Result<Metar> {
    let catalog = EnglishCatalog;
    MetarParser::new(&catalog).parse(report)
}

/// Decode a TAF with the bundled English catalog
pub fn parse_taf(report: &str) -> Result<Taf> {
    let catalog = EnglishCatalog;
    TafParser::new(&catalog).parse(report)
}
