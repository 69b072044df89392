//! Tests for the TAF state machine

use super::parse_taf;
use crate::Error;
use crate::models::{TrendValidity, WeatherChangeType};

const KMSN_TAF: &str = "TAF KMSN 142325Z 1500/1524 25014G30KT P6SM VCSH SCT035 BKN070 \
     TEMPO 1500/1501 24015G25KT \
     FM150100 25012G20KT P6SM BKN050 \
     FM151000 27008KT P6SM SCT035 \
     FM152100 30006KT P6SM FEW250";

#[test]
fn test_parse_header() {
    let taf = parse_taf(KMSN_TAF).unwrap();
    assert_eq!(taf.station, "KMSN");
    assert_eq!(taf.day, Some(14));
    assert_eq!(taf.hour, Some(23));
    assert_eq!(taf.minute, Some(25));
    assert_eq!(taf.validity.start_day, 15);
    assert_eq!(taf.validity.start_hour, 0);
    assert_eq!(taf.validity.end_day, 15);
    assert_eq!(taf.validity.end_hour, 24);
}

#[test]
fn test_header_body_populates_weather() {
    let taf = parse_taf(KMSN_TAF).unwrap();
    let wind = taf.weather.wind.as_ref().unwrap();
    assert_eq!(wind.degrees, Some(250));
    assert_eq!(wind.speed, 14);
    assert_eq!(wind.gust, Some(30));
    assert_eq!(taf.weather.clouds.len(), 2);
    assert!(taf.weather.visibility.is_some());
}

#[test]
fn test_trends_in_source_order() {
    let taf = parse_taf(KMSN_TAF).unwrap();
    assert_eq!(taf.trends.len(), 4);
    assert_eq!(taf.trends[0].change_type, WeatherChangeType::Tempo);
    assert_eq!(taf.trends[1].change_type, WeatherChangeType::Fm);
    assert_eq!(taf.trends[2].change_type, WeatherChangeType::Fm);
    assert_eq!(taf.trends[3].change_type, WeatherChangeType::Fm);
}

#[test]
fn test_tempo_window_ends_before_first_fm_starts() {
    let taf = parse_taf(KMSN_TAF).unwrap();

    let Some(TrendValidity::Window(window)) = taf.trends[0].validity else {
        panic!("TEMPO trend should carry a start/end window");
    };
    let Some(TrendValidity::Start(start)) = taf.trends[1].validity else {
        panic!("FM trend should carry a start-only validity");
    };

    assert_eq!((window.end_day, window.end_hour), (15, 1));
    assert_eq!((start.day, start.hour, start.minute), (15, 1, 0));
    assert!(
        (window.end_day, window.end_hour, 0) <= (start.day, start.hour, start.minute)
    );
}

#[test]
fn test_trend_raw_is_verbatim_line() {
    let taf = parse_taf(KMSN_TAF).unwrap();
    assert_eq!(taf.trends[0].raw, "TEMPO 1500/1501 24015G25KT");
    assert_eq!(taf.trends[1].raw, "FM150100 25012G20KT P6SM BKN050");
}

#[test]
fn test_multi_line_report() {
    let report = "TAF LFPG 161100Z 1612/1718 24012KT 6000 SCT030\n\
         BECMG 1618/1620 4000 -RA BKN020\n\
         PROB40 TEMPO 1700/1706 2000 RA\n\
         FM170600 21010KT 9999 SCT025";
    let taf = parse_taf(report).unwrap();
    assert_eq!(taf.trends.len(), 3);

    let becmg = &taf.trends[0];
    assert_eq!(becmg.change_type, WeatherChangeType::Becmg);
    assert!(matches!(becmg.validity, Some(TrendValidity::Window(_))));

    let prob_tempo = &taf.trends[1];
    assert_eq!(prob_tempo.change_type, WeatherChangeType::Tempo);
    assert_eq!(prob_tempo.probability, Some(40));
    assert_eq!(prob_tempo.raw, "PROB40 TEMPO 1700/1706 2000 RA");

    let fm = &taf.trends[2];
    assert_eq!(fm.change_type, WeatherChangeType::Fm);
}

#[test]
fn test_standalone_prob_trend() {
    let report = "TAF LFPG 161100Z 1612/1718 24012KT 6000 SCT030 PROB30 1618/1622 3000 BR";
    let taf = parse_taf(report).unwrap();
    assert_eq!(taf.trends.len(), 1);
    assert_eq!(taf.trends[0].change_type, WeatherChangeType::Prob);
    assert_eq!(taf.trends[0].probability, Some(30));
    assert!(matches!(
        taf.trends[0].validity,
        Some(TrendValidity::Window(_))
    ));
}

#[test]
fn test_doubled_taf_marker_and_amendment() {
    let taf = parse_taf("TAF TAF AMD LFPG 161100Z 1612/1718 24012KT CAVOK").unwrap();
    assert_eq!(taf.station, "LFPG");
    assert!(taf.amendment);
    assert!(taf.weather.cavok);
}

#[test]
fn test_noise_before_the_marker_is_skipped() {
    let taf = parse_taf("FCUK31 EGRR 161100 TAF EGLL 161058Z 1612/1718 23010KT 9999 FEW035")
        .unwrap();
    assert_eq!(taf.station, "EGLL");
}

#[test]
fn test_cancelled_taf() {
    let taf = parse_taf("TAF LFPG 161100Z 1612/1718 CNL").unwrap();
    assert!(taf.cancelled);
}

#[test]
fn test_max_min_temperatures() {
    let taf =
        parse_taf("TAF KMSN 142325Z 1500/1524 25014KT P6SM SCT035 TX22/1520Z TNM03/1510Z")
            .unwrap();
    let max = taf.max_temperature.unwrap();
    assert_eq!(max.temperature, 22);
    assert_eq!((max.day, max.hour), (15, 20));
    let min = taf.min_temperature.unwrap();
    assert_eq!(min.temperature, -3);
    assert_eq!((min.day, min.hour), (15, 10));
}

#[test]
fn test_trailing_temperatures_float_back_to_header() {
    let report = "TAF KMSN 142325Z 1500/1524 25014KT P6SM SCT035\n\
         FM150100 25012KT P6SM BKN050\n\
         TX22/1520Z TNM03/1510Z";
    let taf = parse_taf(report).unwrap();
    assert_eq!(taf.trends.len(), 1);
    assert_eq!(taf.max_temperature.unwrap().temperature, 22);
    assert_eq!(taf.min_temperature.unwrap().temperature, -3);
}

#[test]
fn test_missing_issuance_time_is_tolerated() {
    let taf = parse_taf("TAF LFPG 1612/1718 24012KT 6000 SCT030").unwrap();
    assert_eq!(taf.day, None);
    assert_eq!(taf.hour, None);
}

#[test]
fn test_turbulence_and_icing_groups() {
    let taf = parse_taf("TAF KMSN 142325Z 1500/1524 25014KT P6SM SCT035 520004 620304").unwrap();
    let turbulence = &taf.weather.turbulence[0];
    assert_eq!(turbulence.base_height, 0);
    assert_eq!(turbulence.depth, 4000);
    let icing = &taf.weather.icing[0];
    assert_eq!(icing.base_height, 3000);
}

#[test]
fn test_remark_short_circuits_a_trend_line() {
    let report =
        "TAF KMSN 142325Z 1500/1524 25014KT P6SM SCT035 FM150100 25012KT RMK NXT FCST BY 00Z";
    let taf = parse_taf(report).unwrap();
    let trend = &taf.trends[0];
    assert_eq!(trend.weather.remark_text.as_deref(), Some("NXT FCST BY 00Z"));
    assert!(!trend.weather.remarks.is_empty());
}

#[test]
fn test_missing_marker_is_rejected() {
    let fault = parse_taf("LFPG 161100Z 1612/1718 24012KT").unwrap_err();
    assert!(matches!(fault, Error::InvalidReport { .. }));
}

#[test]
fn test_missing_validity_is_rejected() {
    let fault = parse_taf("TAF LFPG 161100Z 24012KT 6000 SCT030").unwrap_err();
    assert!(matches!(fault, Error::InvalidReport { .. }));
}
