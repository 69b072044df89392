//! Integration tests decoding complete real-world reports
//!
//! These tests run full METAR and TAF reports through the public API and
//! check the decoded structures, the forecast timeline, and the serialized
//! output end to end.

use avwx_decoder::locale::EnglishCatalog;
use avwx_decoder::models::WeatherChangeType;
use avwx_decoder::{Error, ForecastContainer, MetarParser, TafParser};
use chrono::{TimeZone, Utc};

const KMSN_TAF: &str = "TAF KMSN 142325Z 1500/1524 25014G30KT P6SM VCSH SCT035 BKN070\n\
     TEMPO 1500/1501 24015G25KT\n\
     FM150100 25012G20KT P6SM BKN050\n\
     FM151000 27008KT P6SM SCT035\n\
     FM152100 30006KT P6SM FEW250";

/// Decode a full Paris CDG METAR and verify the key decoded values
#[test]
fn test_decode_lfpg_metar() {
    let catalog = EnglishCatalog;
    let parser = MetarParser::new(&catalog);

    let metar = parser.parse("LFPG 161430Z 24015G25KT 5000 1100w").unwrap();

    assert_eq!(metar.station, "LFPG");
    assert_eq!((metar.day, metar.hour, metar.minute), (16, 14, 30));

    let wind = metar.weather.wind.as_ref().unwrap();
    assert_eq!(wind.degrees, Some(240));
    assert_eq!(wind.speed, 15);
    assert_eq!(wind.gust, Some(25));

    let visibility = metar.weather.visibility.as_ref().unwrap();
    assert_eq!(visibility.value, 5000.0);
    let min = visibility.min.as_ref().unwrap();
    assert_eq!(min.value, 1100);
    assert_eq!(min.direction, "w");
}

/// Decode a METAR with remarks and verify the remark section reconstructs
#[test]
fn test_decode_metar_with_remarks() {
    let catalog = EnglishCatalog;
    let parser = MetarParser::new(&catalog);

    let metar = parser
        .parse("KJFK 231251Z 28016G26KT 10SM FEW250 16/M02 A3009 RMK AO2 PK WND 28032/1219 SLP188")
        .unwrap();

    assert_eq!(metar.temperature, Some(16));
    assert_eq!(metar.dew_point, Some(-2));

    let remarks = &metar.weather.remarks;
    assert!(!remarks.is_empty());
    let rebuilt = remarks
        .iter()
        .map(|remark| remark.raw.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rebuilt, metar.weather.remark_text.as_deref().unwrap());
}

/// Decode a four-period Madison TAF and verify trend order and validity
#[test]
fn test_decode_kmsn_taf() {
    let catalog = EnglishCatalog;
    let parser = TafParser::new(&catalog);

    let taf = parser.parse(KMSN_TAF).unwrap();

    assert_eq!(taf.station, "KMSN");
    assert_eq!(taf.trends.len(), 4);
    assert_eq!(taf.trends[0].change_type, WeatherChangeType::Tempo);
    assert!(taf.trends[1..]
        .iter()
        .all(|trend| trend.change_type == WeatherChangeType::Fm));

    let wind = taf.weather.wind.as_ref().unwrap();
    assert_eq!(wind.degrees, Some(250));
    assert_eq!(wind.gust, Some(30));
}

/// Build the forecast timeline from a dated TAF and query it
#[test]
fn test_forecast_timeline() {
    let catalog = EnglishCatalog;
    let parser = TafParser::new(&catalog);
    let taf = parser.parse(KMSN_TAF).unwrap();

    let reference = Utc.with_ymd_and_hms(2022, 4, 14, 23, 30, 0).unwrap();
    let container = ForecastContainer::from_taf(&taf, reference);

    assert_eq!(container.issued, Utc.with_ymd_and_hms(2022, 4, 14, 23, 25, 0).unwrap());
    assert_eq!(container.start, Utc.with_ymd_and_hms(2022, 4, 15, 0, 0, 0).unwrap());
    assert_eq!(container.end, Utc.with_ymd_and_hms(2022, 4, 16, 0, 0, 0).unwrap());
    // Initial period plus the four change lines
    assert_eq!(container.trends.len(), 5);

    // During the TEMPO window the initial period is still the base
    let early = container
        .composite_at(Utc.with_ymd_and_hms(2022, 4, 15, 0, 30, 0).unwrap())
        .unwrap();
    assert_eq!(early.base.start, container.start);
    assert_eq!(early.additional.len(), 1);
    assert_eq!(early.additional[0].change_type, WeatherChangeType::Tempo);

    // Mid-day the second FM period has taken over
    let midday = container
        .composite_at(Utc.with_ymd_and_hms(2022, 4, 15, 14, 0, 0).unwrap())
        .unwrap();
    assert_eq!(
        midday.base.start,
        Utc.with_ymd_and_hms(2022, 4, 15, 10, 0, 0).unwrap()
    );
    assert!(midday.additional.is_empty());

    // Outside the validity window the query is rejected
    let fault = container
        .composite_at(Utc.with_ymd_and_hms(2022, 4, 16, 6, 0, 0).unwrap())
        .unwrap_err();
    assert!(matches!(fault, Error::OutOfForecastRange { .. }));
}

/// Decoded reports serialize directly to structured JSON
#[test]
fn test_serialization() {
    let catalog = EnglishCatalog;
    let parser = MetarParser::new(&catalog);
    let metar = parser
        .parse("LFPG 161430Z 24015G25KT 5000 SCT035 17/10 Q1015 NOSIG")
        .unwrap();

    let json = serde_json::to_value(&metar).unwrap();
    assert_eq!(json["station"], "LFPG");
    assert_eq!(json["wind"]["degrees"], 240);
    assert_eq!(json["wind"]["unit"], "KT");
    assert_eq!(json["clouds"][0]["quantity"], "SCT");
    assert_eq!(json["nosig"], true);

    // Absent optional groups are omitted, not serialized as null
    assert!(json.get("wind_shear").is_none());
}
