//! The date built-ins driven through GlobalData, as a script would use them

use std::sync::Arc;

use otter_date_intrinsics::GlobalData;
use otter_datemath::{DateMathConfig, FixedOffsetPlatform, LocalBreakdown, TimePlatform};
use otter_lookup::{ExecState, JsObject, JsValue};
use proptest::prelude::*;

const HOUR: i32 = 3600;

/// Five hours west of UTC, one hour of DST from April through October
struct SeasonalPlatform;

impl TimePlatform for SeasonalPlatform {
    fn current_time_ms(&self) -> f64 {
        0.0
    }

    fn local_breakdown(&self, epoch_seconds: i64) -> LocalBreakdown {
        let standard = LocalBreakdown::at_offset(epoch_seconds, -5 * HOUR);
        if (3..=9).contains(&standard.month) {
            LocalBreakdown {
                is_dst: true,
                ..LocalBreakdown::at_offset(epoch_seconds, -4 * HOUR)
            }
        } else {
            standard
        }
    }

    fn raw_utc_offset_seconds(&self) -> i32 {
        -5 * HOUR
    }
}

fn fixed(offset_seconds: i32) -> GlobalData {
    GlobalData::new(Arc::new(FixedOffsetPlatform::new(offset_seconds).with_now(0.0)))
}

fn numbers(values: &[f64]) -> Vec<JsValue> {
    values.iter().copied().map(JsValue::number).collect()
}

fn call_number(g: &GlobalData, date: &Arc<JsObject>, method: &str) -> f64 {
    g.call_method(date, method, &[]).unwrap().as_number().unwrap()
}

fn call_string(g: &GlobalData, date: &Arc<JsObject>, method: &str) -> String {
    g.call_method(date, method, &[]).unwrap().as_str().unwrap().to_string()
}

#[test]
fn test_local_components_use_the_zone() {
    let g = fixed(HOUR);
    let date = g.construct_date(&numbers(&[2000.0, 0.0, 1.0]));
    assert_eq!(call_number(&g, &date, "getTime"), 946_681_200_000.0);
    assert_eq!(call_number(&g, &date, "getHours"), 0.0);
    assert_eq!(call_number(&g, &date, "getUTCHours"), 23.0);
    assert_eq!(call_number(&g, &date, "getUTCFullYear"), 1999.0);
}

#[test]
fn test_parse_without_zone_is_local() {
    let g = fixed(HOUR);
    let ctor = g.date_constructor().clone();
    let parsed = g.call_method(&ctor, "parse", &[JsValue::from("2009/06/15")]).unwrap();
    assert_eq!(parsed, JsValue::number(1_245_020_400_000.0));

    let parsed = g.call_method(&ctor, "parse", &[JsValue::from("not a date")]).unwrap();
    assert!(parsed.as_number().unwrap().is_nan());
}

#[test]
fn test_parse_two_digit_year_with_offset() {
    let g = fixed(0);
    let ctor = g.date_constructor().clone();
    let parsed = g
        .call_method(&ctor, "parse", &[JsValue::from("01 Jan 99 22:00 +0100")])
        .unwrap();
    assert_eq!(parsed, JsValue::number(915_224_400_000.0));
}

#[test]
fn test_daylight_saving_offsets() {
    let g = GlobalData::new(Arc::new(SeasonalPlatform));

    let winter = g.construct_date(&numbers(&[2009.0, 0.0, 15.0, 12.0]));
    let summer = g.construct_date(&numbers(&[2009.0, 6.0, 15.0, 12.0]));
    assert_eq!(call_number(&g, &winter, "getTimezoneOffset"), 300.0);
    assert_eq!(call_number(&g, &summer, "getTimezoneOffset"), 240.0);
    assert_eq!(call_number(&g, &summer, "getUTCHours"), 16.0);
    assert_eq!(call_number(&g, &summer, "getHours"), 12.0);
    assert!(call_string(&g, &summer, "toString").ends_with("12:00:00 GMT-0400"));
}

#[test]
fn test_string_round_trip() {
    let g = fixed(-7 * HOUR);
    let date = g.construct_date(&[JsValue::number(1_234_567_890_123.0)]);
    let ctor = g.date_constructor().clone();

    for method in ["toString", "toUTCString"] {
        let text = g.call_method(&date, method, &[]).unwrap();
        let parsed = g.call_method(&ctor, "parse", &[text]).unwrap();
        assert_eq!(parsed, JsValue::number(1_234_567_890_000.0), "{method}");
    }
}

#[test]
fn test_invalid_dates() {
    let g = fixed(0);
    let date = g.construct_date(&[JsValue::from("garbage")]);
    assert_eq!(call_string(&g, &date, "toString"), "Invalid Date");
    assert!(call_number(&g, &date, "getDay").is_nan());

    let date = g.construct_date(&numbers(&[2000.0, f64::NAN]));
    assert!(call_number(&g, &date, "valueOf").is_nan());
}

#[test]
fn test_date_called_as_function() {
    let g = fixed(0);
    let ctor = g.date_constructor().clone();
    let text = ctor.call(&g, &JsValue::Undefined, &[]).unwrap();
    assert_eq!(text.as_str(), Some("Thu Jan 01 1970 00:00:00 GMT+0000"));
}

#[test]
fn test_methods_reject_other_receivers() {
    let g = fixed(0);
    let get_time = g.get(g.date_prototype(), "getTime").unwrap();
    let get_time = get_time.as_object().unwrap();
    assert!(get_time.call(&g, &JsValue::number(0.0), &[]).is_err());
    assert!(get_time.call(&g, &JsValue::Object(g.number_constructor().clone()), &[]).is_err());
}

#[test]
fn test_methods_are_shared_by_instances() {
    let g = fixed(0);
    let a = g.new_date(0.0);
    let b = g.new_date(1.0);
    assert_eq!(g.get(&a, "getDay").unwrap(), g.get(&b, "getDay").unwrap());
    assert_eq!(g.static_tables().built_count(), 1);
}

#[test]
fn test_pinned_dst_window() {
    let config = DateMathConfig::default().with_min_dst_year(2000);
    let g = GlobalData::with_config(Arc::new(FixedOffsetPlatform::utc()), config).unwrap();
    assert_eq!(g.date_math().minimum_year_for_dst(), 2000);

    let bad = DateMathConfig::default().with_min_dst_year(2030);
    assert!(GlobalData::with_config(Arc::new(FixedOffsetPlatform::utc()), bad).is_err());
}

proptest! {
    #[test]
    fn prop_components_survive_construction(
        year in 1970i32..2100,
        month in 0i32..12,
        day in 1i32..29,
        hour in 0i32..24,
        minute in 0i32..60,
        second in 0i32..60,
        ms in 0i32..1000,
    ) {
        let g = fixed(2 * HOUR);
        let args: Vec<_> = [year, month, day, hour, minute, second, ms]
            .into_iter()
            .map(|v| JsValue::number(f64::from(v)))
            .collect();
        let date = g.construct_date(&args);

        prop_assert_eq!(call_number(&g, &date, "getFullYear"), f64::from(year));
        prop_assert_eq!(call_number(&g, &date, "getMonth"), f64::from(month));
        prop_assert_eq!(call_number(&g, &date, "getDate"), f64::from(day));
        prop_assert_eq!(call_number(&g, &date, "getHours"), f64::from(hour));
        prop_assert_eq!(call_number(&g, &date, "getMinutes"), f64::from(minute));
        prop_assert_eq!(call_number(&g, &date, "getSeconds"), f64::from(second));
        prop_assert_eq!(call_number(&g, &date, "getMilliseconds"), f64::from(ms));
    }
}
