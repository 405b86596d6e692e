//! Class descriptions and static tables of the built-in constructors

use otter_lookup::{ClassInfo, HashTableDef, HashTableValue, StaticTables, TableId, TableMode};

use crate::date_constructor::{date_now, date_parse, date_utc};
use crate::date_prototype as proto;

/// `Number` constructor properties
pub const NUMBER_CONSTRUCTOR_TABLE: TableId = TableId(1);
/// `Date` constructor properties
pub const DATE_CONSTRUCTOR_TABLE: TableId = TableId(2);
/// `Date.prototype` methods
pub const DATE_PROTOTYPE_TABLE: TableId = TableId(3);

static NUMBER_CONSTRUCTOR_VALUES: [HashTableValue; 5] = [
    HashTableValue::number("NaN", f64::NAN),
    HashTableValue::number("NEGATIVE_INFINITY", f64::NEG_INFINITY),
    HashTableValue::number("POSITIVE_INFINITY", f64::INFINITY),
    HashTableValue::number("MAX_VALUE", f64::MAX),
    HashTableValue::number("MIN_VALUE", 5e-324),
];

/// Definition of [`NUMBER_CONSTRUCTOR_TABLE`]
pub static NUMBER_CONSTRUCTOR_DEF: HashTableDef = HashTableDef {
    values: &NUMBER_CONSTRUCTOR_VALUES,
    mode: TableMode::compact_for(5),
};

/// Names in [`DATE_CONSTRUCTOR_DEF`], which hash without collisions under mask 3
pub const DATE_CONSTRUCTOR_NAMES: [&str; 3] = ["parse", "UTC", "now"];

static DATE_CONSTRUCTOR_VALUES: [HashTableValue; 3] = [
    HashTableValue::function("parse", date_parse, 1),
    HashTableValue::function("UTC", date_utc, 7),
    HashTableValue::function("now", date_now, 0),
];

/// Definition of [`DATE_CONSTRUCTOR_TABLE`]
pub static DATE_CONSTRUCTOR_DEF: HashTableDef = HashTableDef {
    values: &DATE_CONSTRUCTOR_VALUES,
    mode: TableMode::Perfect { hash_size_mask: 3 },
};

static DATE_PROTOTYPE_VALUES: [HashTableValue; 23] = [
    HashTableValue::function("toString", proto::to_string, 0),
    HashTableValue::function("toUTCString", proto::to_utc_string, 0),
    HashTableValue::function("toDateString", proto::to_date_string, 0),
    HashTableValue::function("toTimeString", proto::to_time_string, 0),
    HashTableValue::function("getTime", proto::get_time, 0),
    HashTableValue::function("valueOf", proto::value_of, 0),
    HashTableValue::function("getTimezoneOffset", proto::get_timezone_offset, 0),
    HashTableValue::function("getFullYear", proto::get_full_year, 0),
    HashTableValue::function("getUTCFullYear", proto::get_utc_full_year, 0),
    HashTableValue::function("getMonth", proto::get_month, 0),
    HashTableValue::function("getUTCMonth", proto::get_utc_month, 0),
    HashTableValue::function("getDate", proto::get_date, 0),
    HashTableValue::function("getUTCDate", proto::get_utc_date, 0),
    HashTableValue::function("getDay", proto::get_day, 0),
    HashTableValue::function("getUTCDay", proto::get_utc_day, 0),
    HashTableValue::function("getHours", proto::get_hours, 0),
    HashTableValue::function("getUTCHours", proto::get_utc_hours, 0),
    HashTableValue::function("getMinutes", proto::get_minutes, 0),
    HashTableValue::function("getUTCMinutes", proto::get_utc_minutes, 0),
    HashTableValue::function("getSeconds", proto::get_seconds, 0),
    HashTableValue::function("getUTCSeconds", proto::get_utc_seconds, 0),
    HashTableValue::function("getMilliseconds", proto::get_milliseconds, 0),
    HashTableValue::function("getUTCMilliseconds", proto::get_utc_milliseconds, 0),
];

/// Definition of [`DATE_PROTOTYPE_TABLE`]
pub static DATE_PROTOTYPE_DEF: HashTableDef = HashTableDef {
    values: &DATE_PROTOTYPE_VALUES,
    mode: TableMode::compact_for(23),
};

/// The `Number` constructor
pub static NUMBER_CONSTRUCTOR_CLASS: ClassInfo = ClassInfo {
    class_name: "Function",
    parent: None,
    table: Some(NUMBER_CONSTRUCTOR_TABLE),
};

/// The `Date` constructor
pub static DATE_CONSTRUCTOR_CLASS: ClassInfo = ClassInfo {
    class_name: "Function",
    parent: None,
    table: Some(DATE_CONSTRUCTOR_TABLE),
};

/// Date instances. Their methods come from the prototype object.
pub static DATE_INSTANCE_CLASS: ClassInfo = ClassInfo {
    class_name: "Date",
    parent: None,
    table: None,
};

/// `Date.prototype`, itself a Date whose time value is NaN
pub static DATE_PROTOTYPE_CLASS: ClassInfo = ClassInfo {
    class_name: "Date",
    parent: Some(&DATE_INSTANCE_CLASS),
    table: Some(DATE_PROTOTYPE_TABLE),
};

/// Register every built-in table definition
pub fn register_builtin_tables(tables: &mut StaticTables) {
    tables.register(NUMBER_CONSTRUCTOR_TABLE, &NUMBER_CONSTRUCTOR_DEF);
    tables.register(DATE_CONSTRUCTOR_TABLE, &DATE_CONSTRUCTOR_DEF);
    tables.register(DATE_PROTOTYPE_TABLE, &DATE_PROTOTYPE_DEF);
}

/// Table registered under a script-visible name, for tooling
pub fn table_by_name(name: &str) -> Option<TableId> {
    match name {
        "Number" => Some(NUMBER_CONSTRUCTOR_TABLE),
        "Date" => Some(DATE_CONSTRUCTOR_TABLE),
        "Date.prototype" => Some(DATE_PROTOTYPE_TABLE),
        _ => None,
    }
}
