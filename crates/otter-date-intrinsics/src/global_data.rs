//! Per-runtime state shared by the built-ins

use std::any::Any;
use std::sync::Arc;

use otter_datemath::{DateMath, DateMathConfig, DateMathResult, TimePlatform, time_clip};
use otter_lookup::{
    Attributes, ExecState, HashEntry, Identifier, IdentifierTable, JsObject, JsValue,
    NativeFunctionObject, PropertySlot, StaticTables, VmError, VmResult, delete_property,
    get_static_property_slot, lookup_put,
};

use crate::date_constructor::{call_date, construct_date};
use crate::tables::{
    DATE_CONSTRUCTOR_CLASS, DATE_INSTANCE_CLASS, DATE_PROTOTYPE_CLASS, NUMBER_CONSTRUCTOR_CLASS,
    register_builtin_tables, table_by_name,
};

/// The natives' view of their runtime
pub(crate) fn global_data(exec: &dyn ExecState) -> VmResult<&GlobalData> {
    exec.as_any()
        .downcast_ref::<GlobalData>()
        .ok_or_else(|| VmError::internal("date built-in called outside of a GlobalData runtime"))
}

/// Identifier table, static tables, date engine and the built-in objects.
///
/// Dropping it tears the static tables down.
pub struct GlobalData {
    identifiers: IdentifierTable,
    tables: StaticTables,
    date_math: DateMath,
    number_constructor: Arc<JsObject>,
    date_constructor: Arc<JsObject>,
    date_prototype: Arc<JsObject>,
}

impl GlobalData {
    /// Create a runtime on `platform` with the default date configuration
    pub fn new(platform: Arc<dyn TimePlatform>) -> Self {
        Self::from_date_math(DateMath::new(platform))
    }

    /// Create a runtime with an explicit date configuration
    pub fn with_config(platform: Arc<dyn TimePlatform>, config: DateMathConfig) -> DateMathResult<Self> {
        Ok(Self::from_date_math(DateMath::with_config(platform, config)?))
    }

    fn from_date_math(date_math: DateMath) -> Self {
        let identifiers = IdentifierTable::new();
        let mut tables = StaticTables::new();
        register_builtin_tables(&mut tables);

        let number_constructor = JsObject::new(&NUMBER_CONSTRUCTOR_CLASS);
        let date_prototype =
            JsObject::with_internal_value(&DATE_PROTOTYPE_CLASS, JsValue::number(f64::NAN));
        let date_constructor = JsObject::new_function_with_class(
            &DATE_CONSTRUCTOR_CLASS,
            NativeFunctionObject::new(identifiers.intern("Date"), 7, call_date),
        );

        date_constructor.put_direct(
            identifiers.intern("prototype"),
            JsValue::Object(date_prototype.clone()),
            Attributes::constant(),
        );
        date_prototype.put_direct(
            identifiers.intern("constructor"),
            JsValue::Object(date_constructor.clone()),
            Attributes::DONT_ENUM,
        );

        tracing::debug!(tables = tables.len(), "global data initialized");

        Self {
            identifiers,
            tables,
            date_math,
            number_constructor,
            date_constructor,
            date_prototype,
        }
    }

    /// The date engine
    pub fn date_math(&self) -> &DateMath {
        &self.date_math
    }

    /// The `Number` constructor
    pub fn number_constructor(&self) -> &Arc<JsObject> {
        &self.number_constructor
    }

    /// The `Date` constructor
    pub fn date_constructor(&self) -> &Arc<JsObject> {
        &self.date_constructor
    }

    /// `Date.prototype`
    pub fn date_prototype(&self) -> &Arc<JsObject> {
        &self.date_prototype
    }

    /// Intern `name` in this runtime's identifier table
    pub fn intern(&self, name: &str) -> Identifier {
        self.identifiers.intern(name)
    }

    /// A Date instance holding the clipped time value `ms`
    pub fn new_date(&self, ms: f64) -> Arc<JsObject> {
        JsObject::with_prototype(
            &DATE_INSTANCE_CLASS,
            Some(self.date_prototype.clone()),
            JsValue::number(time_clip(ms)),
        )
    }

    /// `new Date(...args)`
    pub fn construct_date(&self, args: &[JsValue]) -> Arc<JsObject> {
        construct_date(self, args)
    }

    /// Look `name` up on `object` itself: its class tables first, then direct storage
    pub fn get_own_property_slot(&self, object: &Arc<JsObject>, name: &Identifier, slot: &mut PropertySlot) -> bool {
        for class in object.class().ancestry() {
            let Some(table) = class.table.and_then(|id| self.tables.get(id)) else {
                continue;
            };
            if get_static_property_slot(self, table, object, name, slot) {
                return true;
            }
        }

        match object.get_direct(name) {
            Some(value) => {
                slot.set_value(value);
                true
            }
            None => false,
        }
    }

    /// `object[name]`, following the prototype chain
    pub fn get(&self, object: &Arc<JsObject>, name: &str) -> VmResult<JsValue> {
        let name = self.intern(name);
        let mut current = Some(object);
        while let Some(holder) = current {
            let mut slot = PropertySlot::new();
            if self.get_own_property_slot(holder, &name, &mut slot) {
                return slot.get_value(self, &name);
            }
            current = holder.prototype();
        }
        Ok(JsValue::Undefined)
    }

    /// `object[name] = value`
    pub fn put(&self, object: &Arc<JsObject>, name: &str, value: JsValue) -> VmResult<()> {
        let name = self.intern(name);
        for class in object.class().ancestry() {
            let Some(table) = class.table.and_then(|id| self.tables.get(id)) else {
                continue;
            };
            if lookup_put(self, table, object, &name, value.clone())? {
                return Ok(());
            }
        }

        match object.get_direct_property(&name) {
            Some(existing) if existing.attributes.contains(Attributes::READ_ONLY) => {}
            Some(existing) => object.put_direct(name, value, existing.attributes),
            None => object.put_direct(name, value, Attributes::empty()),
        }
        Ok(())
    }

    /// `delete object[name]`
    pub fn delete(&self, object: &JsObject, name: &str) -> bool {
        delete_property(self, object, &self.intern(name))
    }

    /// `object[name](...args)`
    pub fn call_method(&self, object: &Arc<JsObject>, name: &str, args: &[JsValue]) -> VmResult<JsValue> {
        let method = self.get(object, name)?;
        match method.as_object() {
            Some(function) if function.as_function().is_some() => {
                function.call(self, &JsValue::Object(object.clone()), args)
            }
            _ => Err(VmError::type_error(format!("{name} is not a function"))),
        }
    }

    /// The static entry for `name` in the table of `table_name`
    /// (`"Number"`, `"Date"` or `"Date.prototype"`)
    pub fn lookup_static(&self, table_name: &str, name: &str) -> Option<&HashEntry> {
        let table = self.tables.get(table_by_name(table_name)?)?;
        table.entry(&self.identifiers, &self.intern(name))
    }
}

impl ExecState for GlobalData {
    fn identifiers(&self) -> &IdentifierTable {
        &self.identifiers
    }

    fn static_tables(&self) -> &StaticTables {
        &self.tables
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlobalData {
    fn drop(&mut self) {
        // Date.prototype.constructor and Date.prototype form a cycle
        if let Some(constructor) = self.identifiers.get("constructor") {
            self.date_prototype.remove_direct(&constructor);
        }
    }
}
