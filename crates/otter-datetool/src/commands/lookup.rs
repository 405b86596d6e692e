//! Lookup command - query a built-in static property table.

use anyhow::Result;
use clap::Args;
use otter_date_intrinsics::GlobalData;
use otter_date_intrinsics::conversion::number_to_string;
use otter_lookup::{ConstantValue, HashEntry, StaticValue};

#[derive(Args)]
pub struct LookupCommand {
    /// Table: Number, Date or Date.prototype
    pub table: String,

    /// Property name
    pub name: String,
}

fn describe(entry: &HashEntry) -> String {
    let value = match entry.value() {
        StaticValue::Constant(ConstantValue::Number(n)) => number_to_string(*n),
        StaticValue::Constant(ConstantValue::String(s)) => format!("{s:?}"),
        StaticValue::Constant(other) => format!("{other:?}"),
        StaticValue::Getter(_) => "getter".to_string(),
        StaticValue::Accessor(_, _) => "accessor".to_string(),
        StaticValue::LazyFunction { arity, .. } => format!("function, length {arity}"),
    };
    format!("{}: {} {:?}", entry.key(), value, entry.attributes())
}

impl LookupCommand {
    pub fn execute(&self, global: &GlobalData) -> Result<String> {
        match global.lookup_static(&self.table, &self.name) {
            Some(entry) => Ok(describe(entry)),
            None => Err(anyhow::anyhow!(
                "{} has no static property {:?}",
                self.table,
                self.name
            )),
        }
    }
}
