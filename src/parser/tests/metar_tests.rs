//! Tests for the METAR state machine

use super::parse_metar;
use crate::Error;
use crate::models::{
    CloudQuantity, DistanceUnit, RemarkData, RunwayTrend, SpeedUnit, TimeIndicator,
    ValueIndicator, WeatherChangeType,
};

#[test]
fn test_parse_header() {
    let metar = parse_metar("LFPG 161430Z 24015KT CAVOK 17/10 Q1015").unwrap();
    assert_eq!(metar.station, "LFPG");
    assert_eq!(metar.day, 16);
    assert_eq!(metar.hour, 14);
    assert_eq!(metar.minute, 30);
}

#[test]
fn test_parse_wind_with_gust_and_minimum_visibility() {
    let metar = parse_metar("LFPG 161430Z 24015G25KT 5000 1100w").unwrap();

    let wind = metar.weather.wind.unwrap();
    assert_eq!(wind.degrees, Some(240));
    assert_eq!(wind.speed, 15);
    assert_eq!(wind.gust, Some(25));
    assert_eq!(wind.unit, SpeedUnit::Knot);

    let visibility = metar.weather.visibility.unwrap();
    assert_eq!(visibility.value, 5000.0);
    assert_eq!(visibility.unit, DistanceUnit::Meters);
    let min = visibility.min.unwrap();
    assert_eq!(min.value, 1100);
    assert_eq!(min.direction, "w");
}

#[test]
fn test_parse_cavok_sets_visibility() {
    let metar = parse_metar("LFPG 161430Z 24015KT CAVOK").unwrap();
    assert!(metar.weather.cavok);
    let visibility = metar.weather.visibility.unwrap();
    assert_eq!(visibility.value, 9999.0);
    assert_eq!(visibility.indicator, Some(ValueIndicator::GreaterThan));
}

#[test]
fn test_parse_temperature_and_altimeter() {
    let metar = parse_metar("LFPG 161430Z 24015KT CAVOK 17/M03 Q1015").unwrap();
    assert_eq!(metar.temperature, Some(17));
    assert_eq!(metar.dew_point, Some(-3));
    assert_eq!(metar.altimeter, Some(1015.0));
}

#[test]
fn test_parse_inches_of_mercury_altimeter() {
    let metar = parse_metar("KJFK 231251Z 28016KT 10SM FEW250 16/M02 A3009").unwrap();
    let altimeter = metar.altimeter.unwrap();
    assert!((altimeter - 1019.0).abs() < 1.0);
}

#[test]
fn test_parse_clouds_and_vertical_visibility() {
    let metar = parse_metar("LFPG 161430Z 24015KT 5000 SCT035 BKN070CB").unwrap();
    assert_eq!(metar.weather.clouds.len(), 2);
    assert_eq!(metar.weather.clouds[0].quantity, CloudQuantity::Sct);
    assert_eq!(metar.weather.clouds[0].height, Some(3500));
    assert_eq!(metar.weather.clouds[1].quantity, CloudQuantity::Bkn);

    let metar = parse_metar("LFPG 161430Z 24015KT 0400 FG VV002").unwrap();
    assert_eq!(metar.weather.vertical_visibility, Some(200));
}

#[test]
fn test_parse_runway_visual_range() {
    let metar = parse_metar("LFPG 161430Z 24015KT 0400 R27L/0375N FG").unwrap();
    assert_eq!(metar.runways.len(), 1);
    let runway = &metar.runways[0];
    assert_eq!(runway.name, "27L");
    assert_eq!(runway.min_range, 375);
    assert_eq!(runway.trend, Some(RunwayTrend::NoChange));
    assert_eq!(runway.unit, DistanceUnit::Meters);
}

#[test]
fn test_parse_varying_runway_range() {
    let metar = parse_metar("KJFK 231251Z 28016KT 1/2SM R04R/1600V3000FT FG").unwrap();
    let runway = &metar.runways[0];
    assert_eq!(runway.min_range, 1600);
    assert_eq!(runway.max_range, Some(3000));
    assert_eq!(runway.unit, DistanceUnit::Feet);
}

#[test]
fn test_parse_flags() {
    let metar = parse_metar("LFPG 161430Z AUTO 24015KT CAVOK NOSIG").unwrap();
    assert!(metar.auto);
    assert!(metar.nosig);
    assert!(!metar.nil);
}

#[test]
fn test_parse_trend_with_time_indicators() {
    let metar =
        parse_metar("LFPG 161430Z 24015KT CAVOK BECMG FM1500 TL1700 4000 -RA").unwrap();
    assert_eq!(metar.trends.len(), 1);

    let trend = &metar.trends[0];
    assert_eq!(trend.change_type, WeatherChangeType::Becmg);
    assert_eq!(trend.times.len(), 2);
    assert_eq!(trend.times[0].indicator, TimeIndicator::Fm);
    assert_eq!(trend.times[0].hour, 15);
    assert_eq!(trend.times[1].indicator, TimeIndicator::Tl);
    assert_eq!(trend.raw, "BECMG FM1500 TL1700 4000 -RA");
    assert_eq!(trend.weather.visibility.as_ref().unwrap().value, 4000.0);
    assert_eq!(trend.weather.weather_conditions.len(), 1);
}

#[test]
fn test_parse_consecutive_trends() {
    let metar =
        parse_metar("LFPG 161430Z 24015KT CAVOK TEMPO 3000 SHRA BECMG AT1600 SKC").unwrap();
    assert_eq!(metar.trends.len(), 2);
    assert_eq!(metar.trends[0].change_type, WeatherChangeType::Tempo);
    assert_eq!(metar.trends[1].change_type, WeatherChangeType::Becmg);
    assert_eq!(metar.trends[1].times[0].indicator, TimeIndicator::At);
}

#[test]
fn test_remark_section_stops_the_body() {
    let metar = parse_metar("KJFK 231251Z 28016KT 10SM FEW250 16/M02 A3009 RMK AO2 SLP188")
        .unwrap();
    assert_eq!(metar.weather.remark_text.as_deref(), Some("AO2 SLP188"));
    assert_eq!(metar.weather.remarks.len(), 2);
    assert!(matches!(
        metar.weather.remarks[1].data,
        RemarkData::SeaLevelPressure { .. }
    ));
}

#[test]
fn test_unrecognized_body_token_is_dropped() {
    let metar = parse_metar("LFPG 161430Z 24015KT ZZZZZ99 CAVOK").unwrap();
    assert!(metar.weather.cavok);
    assert!(metar.weather.remarks.is_empty());
}

#[test]
fn test_short_report_is_rejected() {
    let fault = parse_metar("LFPG").unwrap_err();
    assert!(matches!(fault, Error::InvalidReport { .. }));
}

#[test]
fn test_malformed_day_time_is_rejected() {
    let fault = parse_metar("LFPG 16143Z 24015KT").unwrap_err();
    assert!(matches!(fault, Error::InvalidReport { .. }));
}

#[test]
fn test_issued_resolves_against_reference() {
    use chrono::{TimeZone, Utc};

    let metar = parse_metar("LFPG 161430Z 24015KT CAVOK").unwrap();
    let reference = Utc.with_ymd_and_hms(2022, 6, 17, 2, 0, 0).unwrap();
    assert_eq!(
        metar.issued(reference),
        Utc.with_ymd_and_hms(2022, 6, 16, 14, 30, 0).unwrap()
    );
}
