//! Objects with direct property storage
//!
//! Built-in objects keep most of their properties in static tables. What
//! lives here is what scripts wrote and what got materialized from a table.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::entry::{Attributes, NativeFunction};
use crate::error::VmResult;
use crate::exec::ExecState;
use crate::identifier::Identifier;
use crate::registry::TableId;
use crate::value::JsValue;

/// Static description of an object class
#[derive(Debug)]
pub struct ClassInfo {
    /// Name reported by `Object.prototype.toString`
    pub class_name: &'static str,
    /// Class this one inherits static properties from
    pub parent: Option<&'static ClassInfo>,
    /// This class's own static property table
    pub table: Option<TableId>,
}

impl ClassInfo {
    /// The class and its ancestors, nearest first
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static ClassInfo> {
        std::iter::successors(Some(self), |class| class.parent)
    }
}

/// Class of plain objects
pub static OBJECT_CLASS: ClassInfo = ClassInfo {
    class_name: "Object",
    parent: None,
    table: None,
};

/// Class of native function objects
pub static FUNCTION_CLASS: ClassInfo = ClassInfo {
    class_name: "Function",
    parent: None,
    table: None,
};

/// A value stored directly on an object
#[derive(Debug, Clone)]
pub struct Property {
    /// The value
    pub value: JsValue,
    /// Attributes
    pub attributes: Attributes,
}

/// A function implemented in Rust
#[derive(Clone)]
pub struct NativeFunctionObject {
    name: Identifier,
    arity: u32,
    function: NativeFunction,
}

impl NativeFunctionObject {
    /// Wrap `function`, which expects `arity` arguments
    pub fn new(name: Identifier, arity: u32, function: NativeFunction) -> Self {
        Self {
            name,
            arity,
            function,
        }
    }

    /// The function's `name`
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// The function's `length`
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// The wrapped function pointer
    pub fn function(&self) -> NativeFunction {
        self.function
    }
}

impl fmt::Debug for NativeFunctionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunctionObject")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// A JavaScript object
pub struct JsObject {
    class: &'static ClassInfo,
    prototype: Option<Arc<JsObject>>,
    properties: RwLock<FxHashMap<Identifier, Property>>,
    internal_value: RwLock<JsValue>,
    function: Option<NativeFunctionObject>,
}

impl JsObject {
    /// Create an empty object of `class`
    pub fn new(class: &'static ClassInfo) -> Arc<Self> {
        Self::with_internal_value(class, JsValue::Undefined)
    }

    /// Create an object of `class` wrapping a primitive
    pub fn with_internal_value(class: &'static ClassInfo, value: JsValue) -> Arc<Self> {
        Self::with_prototype(class, None, value)
    }

    /// Create an object of `class` inheriting from `prototype`, as Date instances do
    pub fn with_prototype(
        class: &'static ClassInfo,
        prototype: Option<Arc<JsObject>>,
        value: JsValue,
    ) -> Arc<Self> {
        Arc::new(Self {
            class,
            prototype,
            properties: RwLock::new(FxHashMap::default()),
            internal_value: RwLock::new(value),
            function: None,
        })
    }

    /// Create a callable object
    pub fn new_native_function(function: NativeFunctionObject) -> Arc<Self> {
        Self::new_function_with_class(&FUNCTION_CLASS, function)
    }

    /// Create a callable object of `class`, for constructors with static tables
    pub fn new_function_with_class(class: &'static ClassInfo, function: NativeFunctionObject) -> Arc<Self> {
        Arc::new(Self {
            class,
            prototype: None,
            properties: RwLock::new(FxHashMap::default()),
            internal_value: RwLock::new(JsValue::Undefined),
            function: Some(function),
        })
    }

    /// The object's class
    pub fn class(&self) -> &'static ClassInfo {
        self.class
    }

    /// The object this one inherits from
    pub fn prototype(&self) -> Option<&Arc<JsObject>> {
        self.prototype.as_ref()
    }

    /// Check if the object's class is `class` or derives from it
    pub fn inherits(&self, class: &'static ClassInfo) -> bool {
        self.class.ancestry().any(|ancestor| std::ptr::eq(ancestor, class))
    }

    /// The wrapped primitive
    pub fn internal_value(&self) -> JsValue {
        self.internal_value.read().clone()
    }

    /// Replace the wrapped primitive
    pub fn set_internal_value(&self, value: JsValue) {
        *self.internal_value.write() = value;
    }

    /// The native function, if the object is callable
    pub fn as_function(&self) -> Option<&NativeFunctionObject> {
        self.function.as_ref()
    }

    /// Call the object with `this` and `args`
    pub fn call(&self, exec: &dyn ExecState, this: &JsValue, args: &[JsValue]) -> VmResult<JsValue> {
        match &self.function {
            Some(function) => (function.function)(exec, this, args),
            None => Err(crate::error::VmError::type_error(format!(
                "{} is not a function",
                self.class.class_name
            ))),
        }
    }

    /// Directly stored value for `name`
    pub fn get_direct(&self, name: &Identifier) -> Option<JsValue> {
        self.properties.read().get(name).map(|p| p.value.clone())
    }

    /// Directly stored property for `name`, attributes included
    pub fn get_direct_property(&self, name: &Identifier) -> Option<Property> {
        self.properties.read().get(name).cloned()
    }

    /// Check for a direct property
    pub fn has_direct(&self, name: &Identifier) -> bool {
        self.properties.read().contains_key(name)
    }

    /// Store `value` directly under `name`
    pub fn put_direct(&self, name: Identifier, value: JsValue, attributes: Attributes) {
        self.properties
            .write()
            .insert(name, Property { value, attributes });
    }

    /// Remove a direct property. Returns whether one was there.
    pub fn remove_direct(&self, name: &Identifier) -> bool {
        self.properties.write().remove(name).is_some()
    }

    /// Names of direct properties that are not `DONT_ENUM`
    pub fn enumerable_direct_names(&self) -> Vec<Identifier> {
        self.properties
            .read()
            .iter()
            .filter(|(_, p)| !p.attributes.contains(Attributes::DONT_ENUM))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Number of direct properties
    pub fn direct_len(&self) -> usize {
        self.properties.read().len()
    }
}

impl fmt::Debug for JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsObject")
            .field("class", &self.class.class_name)
            .field("has_prototype", &self.prototype.is_some())
            .field("properties", &self.direct_len())
            .field("function", &self.function)
            .finish_non_exhaustive()
    }
}
