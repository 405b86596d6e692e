//! Static property rows and built table entries

use std::fmt;
use std::sync::Arc;

use crate::error::VmResult;
use crate::exec::ExecState;
use crate::identifier::Identifier;
use crate::object::JsObject;
use crate::value::JsValue;

bitflags::bitflags! {
    /// Property attributes shared by static rows and direct storage.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Property cannot be assigned
        const READ_ONLY = 1 << 1;
        /// Property is skipped by for-in
        const DONT_ENUM = 1 << 2;
        /// Property cannot be deleted
        const DONT_DELETE = 1 << 3;
        /// Property is a lazily created native function
        const FUNCTION = 1 << 4;
        /// Property is computed by a native getter
        const GETTER = 1 << 5;
    }
}

impl Attributes {
    /// `DontEnum | Function`, the usual attributes of built-in methods
    pub const fn method() -> Self {
        Self::DONT_ENUM.union(Self::FUNCTION)
    }

    /// `ReadOnly | DontEnum | DontDelete`, the usual attributes of built-in constants
    pub const fn constant() -> Self {
        Self::READ_ONLY.union(Self::DONT_ENUM).union(Self::DONT_DELETE)
    }
}

/// A native function: `(exec, this, args)`
pub type NativeFunction = fn(&dyn ExecState, &JsValue, &[JsValue]) -> VmResult<JsValue>;

/// A native property getter: `(exec, this, name)`
pub type NativeGetter = fn(&dyn ExecState, &Arc<JsObject>, &Identifier) -> VmResult<JsValue>;

/// A native property setter: `(exec, this, value)`
pub type NativeSetter = fn(&dyn ExecState, &Arc<JsObject>, JsValue) -> VmResult<()>;

/// A primitive that can be written in a static table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// A boolean
    Boolean(bool),
    /// A number
    Number(f64),
    /// A string
    String(&'static str),
}

impl ConstantValue {
    /// The runtime value
    pub fn to_value(self) -> JsValue {
        match self {
            Self::Undefined => JsValue::Undefined,
            Self::Null => JsValue::Null,
            Self::Boolean(b) => JsValue::Boolean(b),
            Self::Number(n) => JsValue::Number(n),
            Self::String(s) => JsValue::from(s),
        }
    }
}

/// What a static row resolves to
#[derive(Clone, Copy)]
pub enum StaticValue {
    /// A fixed primitive
    Constant(ConstantValue),
    /// A read-only computed value
    Getter(NativeGetter),
    /// A computed value with a setter
    Accessor(NativeGetter, NativeSetter),
    /// A native function created on first access
    LazyFunction {
        /// The native
        function: NativeFunction,
        /// Its `length`
        arity: u32,
    },
}

impl fmt::Debug for StaticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Getter(_) => f.write_str("Getter"),
            Self::Accessor(..) => f.write_str("Accessor"),
            Self::LazyFunction { arity, .. } => {
                f.debug_struct("LazyFunction").field("arity", arity).finish_non_exhaustive()
            }
        }
    }
}

/// One row of a static table definition
#[derive(Debug, Clone, Copy)]
pub struct HashTableValue {
    /// Property name
    pub name: &'static str,
    /// Attributes
    pub attributes: Attributes,
    /// Value or accessor
    pub value: StaticValue,
}

impl HashTableValue {
    /// A built-in method with `DontEnum | Function`
    pub const fn function(name: &'static str, function: NativeFunction, arity: u32) -> Self {
        Self {
            name,
            attributes: Attributes::method(),
            value: StaticValue::LazyFunction { function, arity },
        }
    }

    /// A read-only number constant
    pub const fn number(name: &'static str, value: f64) -> Self {
        Self {
            name,
            attributes: Attributes::constant(),
            value: StaticValue::Constant(ConstantValue::Number(value)),
        }
    }

    /// A read-only computed property
    pub const fn getter(name: &'static str, attributes: Attributes, getter: NativeGetter) -> Self {
        Self {
            name,
            attributes: attributes.union(Attributes::GETTER).union(Attributes::READ_ONLY),
            value: StaticValue::Getter(getter),
        }
    }

    /// A computed property with a setter
    pub const fn accessor(
        name: &'static str,
        attributes: Attributes,
        getter: NativeGetter,
        setter: NativeSetter,
    ) -> Self {
        Self {
            name,
            attributes: attributes.union(Attributes::GETTER),
            value: StaticValue::Accessor(getter, setter),
        }
    }
}

/// A built entry: the row's data keyed by its interned name
#[derive(Debug, Clone)]
pub struct HashEntry {
    pub(crate) key: Identifier,
    pub(crate) attributes: Attributes,
    pub(crate) value: StaticValue,
    pub(crate) next: Option<u32>,
}

impl HashEntry {
    pub(crate) fn new(key: Identifier, row: &HashTableValue) -> Self {
        Self {
            key,
            attributes: row.attributes,
            value: row.value,
            next: None,
        }
    }

    /// The interned name
    pub fn key(&self) -> &Identifier {
        &self.key
    }

    /// Attributes
    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    /// Value or accessor
    pub fn value(&self) -> &StaticValue {
        &self.value
    }

    /// Index of the next entry in the same bucket (compact tables only)
    pub fn next(&self) -> Option<u32> {
        self.next
    }

    /// The lazy function and its arity
    pub fn function(&self) -> Option<(NativeFunction, u32)> {
        match self.value {
            StaticValue::LazyFunction { function, arity } => Some((function, arity)),
            _ => None,
        }
    }

    /// The getter of a computed property
    pub fn property_getter(&self) -> Option<NativeGetter> {
        match self.value {
            StaticValue::Getter(getter) | StaticValue::Accessor(getter, _) => Some(getter),
            _ => None,
        }
    }

    /// The setter of a writable computed property
    pub fn property_putter(&self) -> Option<NativeSetter> {
        match self.value {
            StaticValue::Accessor(_, setter) => Some(setter),
            _ => None,
        }
    }

    /// Function `length`, zero for non-functions
    pub fn function_length(&self) -> u32 {
        self.function().map_or(0, |(_, arity)| arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &dyn ExecState, _: &JsValue, _: &[JsValue]) -> VmResult<JsValue> {
        Ok(JsValue::Undefined)
    }

    #[test]
    fn test_row_constructors() {
        let method = HashTableValue::function("now", noop, 0);
        assert_eq!(method.attributes, Attributes::DONT_ENUM | Attributes::FUNCTION);

        let constant = HashTableValue::number("MAX_VALUE", f64::MAX);
        assert!(constant.attributes.contains(Attributes::READ_ONLY | Attributes::DONT_DELETE));
        assert!(!constant.attributes.contains(Attributes::FUNCTION));
    }

    #[test]
    fn test_constant_to_value() {
        assert_eq!(ConstantValue::Number(1.5).to_value(), JsValue::number(1.5));
        assert_eq!(ConstantValue::String("x").to_value(), JsValue::from("x"));
        assert!(ConstantValue::Undefined.to_value().is_undefined());
    }
}
