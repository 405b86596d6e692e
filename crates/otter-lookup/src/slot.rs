//! Property lookup results

use std::sync::Arc;

use crate::entry::NativeGetter;
use crate::error::VmResult;
use crate::exec::ExecState;
use crate::identifier::Identifier;
use crate::object::JsObject;
use crate::value::JsValue;

/// Where a property's value comes from, filled in by a lookup.
#[derive(Debug, Clone, Default)]
pub enum PropertySlot {
    /// Nothing found yet
    #[default]
    Unset,
    /// A stored value
    Value(JsValue),
    /// Computed by a native getter on `base`
    Getter {
        /// Object the property was found on
        base: Arc<JsObject>,
        /// The getter
        getter: NativeGetter,
    },
}

impl PropertySlot {
    /// An empty slot
    pub fn new() -> Self {
        Self::Unset
    }

    /// Point the slot at a stored value
    pub fn set_value(&mut self, value: JsValue) {
        *self = Self::Value(value);
    }

    /// Point the slot at a native getter
    pub fn set_getter(&mut self, base: Arc<JsObject>, getter: NativeGetter) {
        *self = Self::Getter { base, getter };
    }

    /// Check if a lookup filled the slot
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Read the value, running the getter if there is one
    pub fn get_value(&self, exec: &dyn ExecState, name: &Identifier) -> VmResult<JsValue> {
        match self {
            Self::Unset => Ok(JsValue::Undefined),
            Self::Value(value) => Ok(value.clone()),
            Self::Getter { base, getter } => getter(exec, base, name),
        }
    }
}
