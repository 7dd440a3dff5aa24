use crate::scoring::codec::{format_duration, parse_decimal, parse_duration};

#[test]
fn durations_parse_as_seconds() {
    assert_eq!(parse_duration("10:51:17"), 39077);
    assert_eq!(parse_duration("00:00:00"), 0);
    assert_eq!(parse_duration("00:01:30"), 90);
}

#[test]
fn duration_hours_are_unbounded() {
    assert_eq!(parse_duration("120:00:05"), 432_005);
}

#[test]
fn malformed_durations_read_as_zero() {
    assert_eq!(parse_duration(""), 0);
    assert_eq!(parse_duration("garbage"), 0);
    assert_eq!(parse_duration("10:51"), 0);
    assert_eq!(parse_duration("10:51:17:00"), 0);
    assert_eq!(parse_duration("aa:bb:cc"), 0);
}

#[test]
fn formatting_zero_pads_every_field() {
    assert_eq!(format_duration(39077), "10:51:17");
    assert_eq!(format_duration(0), "00:00:00");
    assert_eq!(format_duration(59), "00:00:59");
    assert_eq!(format_duration(3661), "01:01:01");
}

#[test]
fn negative_seconds_render_as_the_zero_duration() {
    assert_eq!(format_duration(-42), "00:00:00");
}

#[test]
fn durations_round_trip_through_both_codecs() {
    for seconds in [
        0,
        1,
        59,
        60,
        61,
        3_599,
        3_600,
        39_077,
        86_399,
        86_400,
        359_999,
        8_639_999,
    ] {
        assert_eq!(parse_duration(&format_duration(seconds)), seconds);
    }
}

#[test]
fn formatted_durations_under_a_hundred_hours_are_eight_chars() {
    for seconds in [0, 59, 3_600, 86_399, 359_999] {
        let rendered = format_duration(seconds);
        assert_eq!(rendered.len(), 8, "unexpected width for {rendered}");
        assert_eq!(rendered.as_bytes()[2], b':');
        assert_eq!(rendered.as_bytes()[5], b':');
    }
}

#[test]
fn comma_decimals_parse_and_degrade_to_zero() {
    assert_eq!(parse_decimal("11,9"), 11.9);
    assert_eq!(parse_decimal("412,5"), 412.5);
    assert_eq!(parse_decimal("7"), 7.0);
    assert_eq!(parse_decimal(""), 0.0);
    assert_eq!(parse_decimal("n/a"), 0.0);
}
