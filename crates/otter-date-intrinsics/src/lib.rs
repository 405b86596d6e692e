//! # Otter Date Intrinsics
//!
//! The `Number` and `Date` built-ins on top of the static lookup tables.
//!
//! [`GlobalData`] is the runtime state natives receive: the identifier
//! table, the registered static tables and the date engine.
//!
//! ## Design Principles
//!
//! - **One runtime, one table set**: Tables are registered per [`GlobalData`] and torn down with it
//! - **Methods on the prototype**: Date instances carry only their time value
//! - **Engine does the math**: Natives convert arguments and delegate to `otter-datemath`

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod conversion;
pub mod date_constructor;
pub mod date_prototype;
pub mod global_data;
pub mod tables;

pub use conversion::{number_to_int32, string_to_number, to_int32, to_number};
pub use date_constructor::{call_date, construct_date, date_now, date_parse, date_utc};
pub use global_data::GlobalData;
pub use tables::{
    DATE_CONSTRUCTOR_CLASS, DATE_CONSTRUCTOR_TABLE, DATE_INSTANCE_CLASS, DATE_PROTOTYPE_CLASS,
    DATE_PROTOTYPE_TABLE, NUMBER_CONSTRUCTOR_CLASS, NUMBER_CONSTRUCTOR_TABLE, register_builtin_tables,
    table_by_name,
};
