//! `Date.prototype` methods
//!
//! Every method requires a Date receiver and answers NaN, or
//! `"Invalid Date"` for the string forms, when its time value is NaN.

use otter_datemath::format::INVALID_DATE;
use otter_datemath::{
    GregorianDateTime, format_date, format_date_time, format_date_utc_variant, format_time,
};
use otter_lookup::{ExecState, JsValue, VmError, VmResult};

use crate::global_data::{GlobalData, global_data};
use crate::tables::DATE_INSTANCE_CLASS;

/// The time value of a Date receiver
pub fn this_time_value(this: &JsValue) -> VmResult<f64> {
    match this.as_object() {
        Some(object) if object.inherits(&DATE_INSTANCE_CLASS) => {
            Ok(object.internal_value().as_number().unwrap_or(f64::NAN))
        }
        _ => Err(VmError::type_error("this is not a Date object")),
    }
}

/// `Date.prototype.toString` of the time value `ms`
pub fn date_to_string(global: &GlobalData, ms: f64) -> String {
    if ms.is_nan() {
        return INVALID_DATE.to_string();
    }
    format_date_time(&global.date_math().ms_to_gregorian_date_time(ms, false))
}

fn broken_down(exec: &dyn ExecState, this: &JsValue, utc: bool) -> VmResult<Option<GregorianDateTime>> {
    let ms = this_time_value(this)?;
    if ms.is_nan() {
        return Ok(None);
    }
    let global = global_data(exec)?;
    Ok(Some(global.date_math().ms_to_gregorian_date_time(ms, utc)))
}

fn field(
    exec: &dyn ExecState,
    this: &JsValue,
    utc: bool,
    read: impl Fn(&GregorianDateTime) -> i32,
) -> VmResult<JsValue> {
    Ok(JsValue::number(
        broken_down(exec, this, utc)?.map_or(f64::NAN, |t| f64::from(read(&t))),
    ))
}

fn text(
    exec: &dyn ExecState,
    this: &JsValue,
    utc: bool,
    render: impl Fn(&GregorianDateTime) -> String,
) -> VmResult<JsValue> {
    Ok(JsValue::string(
        broken_down(exec, this, utc)?.map_or_else(|| INVALID_DATE.to_string(), |t| render(&t)),
    ))
}

fn milliseconds(this: &JsValue) -> VmResult<JsValue> {
    let ms = this_time_value(this)?;
    Ok(JsValue::number(ms - (ms / 1000.0).floor() * 1000.0))
}

/// `toString()`
pub fn to_string(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    text(exec, this, false, format_date_time)
}

/// `toUTCString()`
pub fn to_utc_string(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    text(exec, this, true, |t| {
        format!("{} {}", format_date_utc_variant(t), format_time(t, true))
    })
}

/// `toDateString()`
pub fn to_date_string(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    text(exec, this, false, format_date)
}

/// `toTimeString()`
pub fn to_time_string(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    text(exec, this, false, |t| format_time(t, false))
}

/// `getTime()`
pub fn get_time(_exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    Ok(JsValue::number(this_time_value(this)?))
}

/// `valueOf()`
pub fn value_of(exec: &dyn ExecState, this: &JsValue, args: &[JsValue]) -> VmResult<JsValue> {
    get_time(exec, this, args)
}

/// `getTimezoneOffset()`, in minutes west of UTC
pub fn get_timezone_offset(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    Ok(JsValue::number(
        broken_down(exec, this, false)?.map_or(f64::NAN, |t| -f64::from(t.utc_offset) / 60.0),
    ))
}

/// `getFullYear()`
pub fn get_full_year(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, false, GregorianDateTime::full_year)
}

/// `getUTCFullYear()`
pub fn get_utc_full_year(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, true, GregorianDateTime::full_year)
}

/// `getMonth()`
pub fn get_month(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, false, |t| t.month)
}

/// `getUTCMonth()`
pub fn get_utc_month(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, true, |t| t.month)
}

/// `getDate()`
pub fn get_date(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, false, |t| t.month_day)
}

/// `getUTCDate()`
pub fn get_utc_date(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, true, |t| t.month_day)
}

/// `getDay()`
pub fn get_day(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, false, |t| t.week_day)
}

/// `getUTCDay()`
pub fn get_utc_day(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, true, |t| t.week_day)
}

/// `getHours()`
pub fn get_hours(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, false, |t| t.hour)
}

/// `getUTCHours()`
pub fn get_utc_hours(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, true, |t| t.hour)
}

/// `getMinutes()`
pub fn get_minutes(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, false, |t| t.minute)
}

/// `getUTCMinutes()`
pub fn get_utc_minutes(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, true, |t| t.minute)
}

/// `getSeconds()`
pub fn get_seconds(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, false, |t| t.second)
}

/// `getUTCSeconds()`
pub fn get_utc_seconds(exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    field(exec, this, true, |t| t.second)
}

/// `getMilliseconds()`
pub fn get_milliseconds(_exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    milliseconds(this)
}

/// `getUTCMilliseconds()`
pub fn get_utc_milliseconds(_exec: &dyn ExecState, this: &JsValue, _args: &[JsValue]) -> VmResult<JsValue> {
    milliseconds(this)
}
