//! Resolving properties through static tables
//!
//! These mirror the class hierarchy lookups of built-in objects: a miss in
//! the static table falls through to the object's direct storage.

use std::sync::Arc;

use crate::entry::{Attributes, HashEntry, StaticValue};
use crate::error::VmResult;
use crate::exec::ExecState;
use crate::identifier::Identifier;
use crate::object::{ClassInfo, JsObject, NativeFunctionObject};
use crate::slot::PropertySlot;
use crate::table::HashTable;
use crate::value::JsValue;

/// Point `slot` at the function for a `FUNCTION` entry, creating it on first use.
///
/// The function is stored directly on `this` with the entry's attributes,
/// so later lookups on the same object find it without the table.
/// Returns `false` for entries that are not lazy functions.
pub fn set_up_static_function_slot(
    _exec: &dyn ExecState,
    entry: &HashEntry,
    this: &Arc<JsObject>,
    name: &Identifier,
    slot: &mut PropertySlot,
) -> bool {
    debug_assert!(entry.attributes().contains(Attributes::FUNCTION));

    let value = match this.get_direct(name) {
        Some(value) => value,
        None => {
            let Some((function, arity)) = entry.function() else {
                return false;
            };
            let object =
                JsObject::new_native_function(NativeFunctionObject::new(name.clone(), arity, function));
            tracing::trace!(name = %name, class = this.class().class_name, "materialized static function");
            this.put_direct(name.clone(), JsValue::Object(object.clone()), entry.attributes());
            JsValue::Object(object)
        }
    };

    slot.set_value(value);
    true
}

fn set_up_static_value_slot(entry: &HashEntry, this: &Arc<JsObject>, slot: &mut PropertySlot) -> bool {
    match entry.value() {
        StaticValue::Constant(constant) => slot.set_value(constant.to_value()),
        StaticValue::Getter(getter) | StaticValue::Accessor(getter, _) => {
            slot.set_getter(this.clone(), *getter)
        }
        StaticValue::LazyFunction { .. } => return false,
    }
    true
}

fn get_direct_slot(this: &JsObject, name: &Identifier, slot: &mut PropertySlot) -> bool {
    match this.get_direct(name) {
        Some(value) => {
            slot.set_value(value);
            true
        }
        None => false,
    }
}

/// Look `name` up in `table`, then in the object's direct storage.
pub fn get_static_property_slot(
    exec: &dyn ExecState,
    table: &HashTable,
    this: &Arc<JsObject>,
    name: &Identifier,
    slot: &mut PropertySlot,
) -> bool {
    let Some(entry) = table.entry(exec.identifiers(), name) else {
        return get_direct_slot(this, name, slot);
    };

    if entry.attributes().contains(Attributes::FUNCTION) {
        set_up_static_function_slot(exec, entry, this, name, slot)
    } else {
        set_up_static_value_slot(entry, this, slot)
    }
}

/// Look `name` up in direct storage, then among the table's functions.
///
/// For tables holding only functions. A materialized function, or a value
/// written over it, shadows the table.
pub fn get_static_function_slot(
    exec: &dyn ExecState,
    table: &HashTable,
    this: &Arc<JsObject>,
    name: &Identifier,
    slot: &mut PropertySlot,
) -> bool {
    if get_direct_slot(this, name, slot) {
        return true;
    }

    match table.entry(exec.identifiers(), name) {
        Some(entry) if entry.attributes().contains(Attributes::FUNCTION) => {
            set_up_static_function_slot(exec, entry, this, name, slot)
        }
        _ => false,
    }
}

/// Look `name` up among the table's values, then in direct storage.
///
/// For tables holding no functions.
pub fn get_static_value_slot(
    exec: &dyn ExecState,
    table: &HashTable,
    this: &Arc<JsObject>,
    name: &Identifier,
    slot: &mut PropertySlot,
) -> bool {
    match table.entry(exec.identifiers(), name) {
        Some(entry) if !entry.attributes().contains(Attributes::FUNCTION) => {
            set_up_static_value_slot(entry, this, slot)
        }
        _ => get_direct_slot(this, name, slot),
    }
}

/// Assign through a static table.
///
/// Returns `Ok(false)` when `name` is not in the table and the caller should
/// store the value itself. Functions are overridden by a direct property;
/// read-only entries ignore the write; accessors run their setter.
pub fn lookup_put(
    exec: &dyn ExecState,
    table: &HashTable,
    this: &Arc<JsObject>,
    name: &Identifier,
    value: JsValue,
) -> VmResult<bool> {
    let Some(entry) = table.entry(exec.identifiers(), name) else {
        return Ok(false);
    };

    if entry.attributes().contains(Attributes::FUNCTION) {
        this.put_direct(name.clone(), value, Attributes::empty());
    } else if !entry.attributes().contains(Attributes::READ_ONLY) {
        match entry.property_putter() {
            Some(setter) => setter(exec, this, value)?,
            None => this.put_direct(name.clone(), value, Attributes::empty()),
        }
    }
    Ok(true)
}

/// The static entry for `name` in `class` or the nearest ancestor with one.
pub fn find_property_hash_entry<'a>(
    exec: &'a dyn ExecState,
    class: &'static ClassInfo,
    name: &Identifier,
) -> Option<&'a HashEntry> {
    class
        .ancestry()
        .filter_map(|ancestor| ancestor.table)
        .filter_map(|id| exec.static_tables().get(id))
        .find_map(|table| table.entry(exec.identifiers(), name))
}

/// Attributes of `name` on `object`, from direct storage or its class tables.
pub fn property_attributes(exec: &dyn ExecState, object: &JsObject, name: &Identifier) -> Option<Attributes> {
    if let Some(property) = object.get_direct_property(name) {
        return Some(property.attributes);
    }
    find_property_hash_entry(exec, object.class(), name).map(HashEntry::attributes)
}

/// `delete object[name]`.
///
/// Direct properties go unless `DONT_DELETE`. Static properties are never
/// removed, and refuse when `DONT_DELETE`.
pub fn delete_property(exec: &dyn ExecState, object: &JsObject, name: &Identifier) -> bool {
    if let Some(property) = object.get_direct_property(name) {
        if property.attributes.contains(Attributes::DONT_DELETE) {
            return false;
        }
        object.remove_direct(name);
        return true;
    }

    match find_property_hash_entry(exec, object.class(), name) {
        Some(entry) => !entry.attributes().contains(Attributes::DONT_DELETE),
        None => true,
    }
}
