//! The `Date` constructor: `new Date(...)`, `Date()`, `Date.parse`, `Date.now`, `Date.UTC`

use std::sync::Arc;

use otter_datemath::{GregorianDateTime, format_date_time, time_clip};
use otter_lookup::{ExecState, JsObject, JsValue, VmResult};

use crate::conversion::{number_to_string, to_int32, to_number};
use crate::date_prototype::date_to_string;
use crate::global_data::{GlobalData, global_data};
use crate::tables::DATE_INSTANCE_CLASS;

/// Local or UTC time value for the `(year, month[, day, h, m, s, ms])` argument form.
///
/// Any NaN among the given arguments makes the date invalid. Years 0 to
/// 99 mean 1900 to 1999.
fn time_from_components(global: &GlobalData, args: &[JsValue], input_is_utc: bool) -> f64 {
    if args.iter().take(7).any(|arg| to_number(arg).is_nan()) {
        return f64::NAN;
    }

    let int_arg = |index: usize, default: i32| args.get(index).map_or(default, to_int32);

    let year = int_arg(0, 0);
    let t = GregorianDateTime::new(
        if (0..=99).contains(&year) { year } else { year.saturating_sub(1900) },
        int_arg(1, 0),
        int_arg(2, 1),
        int_arg(3, 0),
        int_arg(4, 0),
        int_arg(5, 0),
    );
    let ms = args.get(6).map_or(0.0, to_number);
    global.date_math().gregorian_date_time_to_ms(&t, ms, input_is_utc)
}

/// Time value for the single argument form of `new Date(value)`
fn time_from_value(global: &GlobalData, value: &JsValue) -> f64 {
    match value {
        JsValue::Object(object) if object.inherits(&DATE_INSTANCE_CLASS) => {
            object.internal_value().as_number().unwrap_or(f64::NAN)
        }
        JsValue::String(text) => global.date_math().parse_date(text),
        other => to_number(other),
    }
}

/// `new Date(...args)`
pub fn construct_date(global: &GlobalData, args: &[JsValue]) -> Arc<JsObject> {
    let value = match args {
        [] => global.date_math().current_utc_time(),
        [value] => time_from_value(global, value),
        _ => time_from_components(global, args, false),
    };
    global.new_date(value)
}

/// `Date()` called as a function: the current local time as a string
pub fn call_date(exec: &dyn ExecState, _this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    let global = global_data(exec)?;
    Ok(JsValue::string(format_date_time(&global.date_math().local_time_now())))
}

/// `Date.parse(text)`
pub fn date_parse(exec: &dyn ExecState, _this: &JsValue, args: &[JsValue]) -> VmResult<JsValue> {
    let global = global_data(exec)?;
    let text = match args.first() {
        None | Some(JsValue::Undefined) => "undefined".to_string(),
        Some(JsValue::Null) => "null".to_string(),
        Some(JsValue::Boolean(b)) => b.to_string(),
        Some(JsValue::Number(n)) => number_to_string(*n),
        Some(JsValue::String(s)) => s.to_string(),
        Some(JsValue::Object(object)) if object.inherits(&DATE_INSTANCE_CLASS) => {
            date_to_string(global, object.internal_value().as_number().unwrap_or(f64::NAN))
        }
        Some(JsValue::Object(object)) => match object.internal_value() {
            JsValue::String(s) => s.to_string(),
            primitive => number_to_string(to_number(&primitive)),
        },
    };
    Ok(JsValue::number(global.date_math().parse_date(&text)))
}

/// `Date.now()`
pub fn date_now(exec: &dyn ExecState, _this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    let global = global_data(exec)?;
    Ok(JsValue::number(global.date_math().current_utc_time()))
}

/// `Date.UTC(year, month[, day, h, m, s, ms])`
pub fn date_utc(exec: &dyn ExecState, _this: &JsValue, args: &[JsValue]) -> VmResult<JsValue> {
    let global = global_data(exec)?;
    let value = if args.len() < 2 {
        f64::NAN
    } else {
        time_from_components(global, args, true)
    };
    Ok(JsValue::number(time_clip(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use otter_datemath::FixedOffsetPlatform;

    fn utc_global() -> GlobalData {
        GlobalData::new(Arc::new(FixedOffsetPlatform::utc().with_now(1_000_000.0)))
    }

    fn time_of(date: &JsObject) -> f64 {
        date.internal_value().as_number().unwrap()
    }

    #[test]
    fn test_construct_without_arguments_is_now() {
        let global = utc_global();
        assert_eq!(time_of(&construct_date(&global, &[])), 1_000_000.0);
    }

    #[test]
    fn test_construct_from_components() {
        let global = utc_global();
        let args = [JsValue::number(2000.0), JsValue::number(0.0), JsValue::number(1.0)];
        assert_eq!(time_of(&construct_date(&global, &args)), 946_684_800_000.0);

        // Two-digit years and the default day
        let args = [JsValue::number(99.0), JsValue::number(11.0)];
        assert_eq!(time_of(&construct_date(&global, &args)), 944_006_400_000.0);

        let args = [JsValue::number(2000.0), JsValue::Undefined];
        assert!(time_of(&construct_date(&global, &args)).is_nan());
    }

    #[test]
    fn test_construct_from_single_value() {
        let global = utc_global();
        assert_eq!(time_of(&construct_date(&global, &[JsValue::number(86_400_000.5)])), 86_400_000.0);
        assert_eq!(
            time_of(&construct_date(&global, &[JsValue::from("Sat, 01 Jan 2000 08:00:00 GMT")])),
            946_713_600_000.0
        );
        assert!(time_of(&construct_date(&global, &[JsValue::number(8.64e15 + 1.0)])).is_nan());

        let original = construct_date(&global, &[JsValue::number(42.0)]);
        let copy = construct_date(&global, &[JsValue::Object(original.clone())]);
        assert_eq!(time_of(&copy), 42.0);
        assert!(!Arc::ptr_eq(&original, &copy));
    }

    #[test]
    fn test_date_utc() {
        let global = utc_global();
        let args = [JsValue::number(1970.0), JsValue::number(0.0), JsValue::number(2.0)];
        assert_eq!(date_utc(&global, &JsValue::Undefined, &args).unwrap(), JsValue::number(86_400_000.0));

        let args = [JsValue::number(2000.0), JsValue::number(0.0), JsValue::number(1.0), JsValue::number(0.0),
            JsValue::number(0.0), JsValue::number(0.0), JsValue::number(250.0)];
        assert_eq!(date_utc(&global, &JsValue::Undefined, &args).unwrap(), JsValue::number(946_684_800_250.0));

        let result = date_utc(&global, &JsValue::Undefined, &[JsValue::number(2000.0)]).unwrap();
        assert!(result.as_number().unwrap().is_nan());
    }

    #[test]
    fn test_date_parse_and_now() {
        let global = utc_global();
        let parsed = date_parse(&global, &JsValue::Undefined, &[JsValue::from("Jan 2 1970 00:00:00 GMT")]).unwrap();
        assert_eq!(parsed, JsValue::number(86_400_000.0));

        let missing = date_parse(&global, &JsValue::Undefined, &[]).unwrap();
        assert!(missing.as_number().unwrap().is_nan());

        assert_eq!(date_now(&global, &JsValue::Undefined, &[]).unwrap(), JsValue::number(1_000_000.0));
    }

    #[test]
    fn test_date_parse_of_date_object() {
        let global = utc_global();
        let date = construct_date(&global, &[JsValue::number(946_713_600_000.0)]);
        let parsed = date_parse(&global, &JsValue::Undefined, &[JsValue::Object(date)]).unwrap();
        assert_eq!(parsed, JsValue::number(946_713_600_000.0));
    }

    #[test]
    fn test_call_date() {
        let global = utc_global();
        let text = call_date(&global, &JsValue::Undefined, &[]).unwrap();
        assert_eq!(text.as_str(), Some("Thu Jan 01 1970 00:16:40 GMT+0000"));
    }
}
