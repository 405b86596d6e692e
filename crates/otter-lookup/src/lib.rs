//! # Otter Lookup
//!
//! Static property tables for built-in objects.
//!
//! Built-ins such as `Number` or `Date.prototype` have fixed property sets.
//! Instead of filling every instance's property map, each class points at a
//! static table that is built once per runtime, on first lookup, and
//! resolves interned names to constants, native accessors or lazily
//! created native functions.
//!
//! ## Design Principles
//!
//! - **Interned keys**: Lookups compare [`Identifier`] handles by pointer
//! - **Build once**: Tables are immutable after their first lookup
//! - **Index links**: Collision chains are slot indices, not pointers
//! - **Lazy functions**: Methods become real properties only when first read

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod exec;
pub mod identifier;
pub mod lookup;
pub mod object;
pub mod registry;
pub mod slot;
pub mod table;
pub mod value;

pub use entry::{
    Attributes, ConstantValue, HashEntry, HashTableValue, NativeFunction, NativeGetter, NativeSetter,
    StaticValue,
};
pub use error::{VmError, VmResult};
pub use exec::ExecState;
pub use identifier::{Identifier, IdentifierTable, identifier_hash};
pub use lookup::{
    delete_property, find_property_hash_entry, get_static_function_slot, get_static_property_slot,
    get_static_value_slot, lookup_put, property_attributes, set_up_static_function_slot,
};
pub use object::{ClassInfo, JsObject, NativeFunctionObject, Property};
pub use registry::{StaticTables, TableId};
pub use slot::PropertySlot;
pub use table::{HashTable, HashTableDef, TableMode, find_perfect_hash_mask};
pub use value::JsValue;
