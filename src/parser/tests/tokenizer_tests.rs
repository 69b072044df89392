//! Tests for report tokenization and the shared body heuristics

use crate::models::{Descriptive, Intensity, Phenomenon};
use crate::parser::{parse_day_time, parse_weather_condition, tokenize};

#[test]
fn test_tokenize_splits_on_whitespace() {
    let tokens = tokenize("LFPG 161430Z 24015KT CAVOK");
    assert_eq!(tokens, vec!["LFPG", "161430Z", "24015KT", "CAVOK"]);
}

#[test]
fn test_tokenize_strips_terminator_and_newlines() {
    let tokens = tokenize("LFPG 161430Z\n24015KT CAVOK=");
    assert_eq!(tokens, vec!["LFPG", "161430Z", "24015KT", "CAVOK"]);
}

#[test]
fn test_tokenize_joins_whole_and_fraction_miles() {
    let tokens = tokenize("KJFK 231251Z 1 1/2SM BR");
    assert_eq!(tokens, vec!["KJFK", "231251Z", "1 1/2SM", "BR"]);
}

#[test]
fn test_tokenize_joins_prefixed_whole_mile() {
    let tokens = tokenize("M1 1/4SM");
    assert_eq!(tokens, vec!["M1 1/4SM"]);
}

#[test]
fn test_tokenize_does_not_join_ordinary_digits() {
    // A lone digit followed by a non-fraction token stays separate.
    let tokens = tokenize("1 SM");
    assert_eq!(tokens, vec!["1", "SM"]);
}

#[test]
fn test_parse_day_time() {
    assert_eq!(parse_day_time("161430Z"), Some((16, 14, 30)));
    assert_eq!(parse_day_time("161430"), Some((16, 14, 30)));
    assert_eq!(parse_day_time("1614Z"), None);
    assert_eq!(parse_day_time("LFPG"), None);
}

#[test]
fn test_weather_condition_full_group() {
    let condition = parse_weather_condition("-SHRA").unwrap();
    assert_eq!(condition.intensity, Some(Intensity::Light));
    assert_eq!(condition.descriptive, Some(Descriptive::Sh));
    assert_eq!(condition.phenomenons, vec![Phenomenon::Ra]);
}

#[test]
fn test_weather_condition_phenomenon_run() {
    let condition = parse_weather_condition("+TSRAGR").unwrap();
    assert_eq!(condition.intensity, Some(Intensity::Heavy));
    assert_eq!(condition.descriptive, Some(Descriptive::Ts));
    assert_eq!(
        condition.phenomenons,
        vec![Phenomenon::Ra, Phenomenon::Gr]
    );
}

#[test]
fn test_thunderstorm_alone_is_retained() {
    let condition = parse_weather_condition("TS").unwrap();
    assert_eq!(condition.descriptive, Some(Descriptive::Ts));
    assert!(condition.phenomenons.is_empty());
}

#[test]
fn test_bare_descriptive_is_dropped() {
    // A descriptive with no phenomenon fails the retention rule, except TS.
    assert!(parse_weather_condition("VCSH").is_none());
    assert!(parse_weather_condition("MI").is_none());
}

#[test]
fn test_recent_intensity_prefix() {
    let condition = parse_weather_condition("RERA").unwrap();
    assert_eq!(condition.intensity, Some(Intensity::Recent));
    assert_eq!(condition.phenomenons, vec![Phenomenon::Ra]);
}

#[test]
fn test_station_identifier_is_not_a_condition() {
    assert!(parse_weather_condition("LFPG").is_none());
    assert!(parse_weather_condition("NOSIG").is_none());
}
