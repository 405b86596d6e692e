//! Interned property names
//!
//! An [`Identifier`] is the canonical handle for a name within one
//! [`IdentifierTable`]. Equality is pointer identity, so comparing two
//! identifiers never touches the characters.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash of `name`.
///
/// Stable across runs and platforms, so table parameters chosen ahead of
/// time keep working.
pub const fn identifier_hash(name: &str) -> u32 {
    let bytes = name.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

struct IdentifierData {
    name: Box<str>,
    hash: u32,
}

/// Canonical, reference-counted handle for an interned name
#[derive(Clone)]
pub struct Identifier(Arc<IdentifierData>);

impl Identifier {
    /// The name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0.name
    }

    /// Cached [`identifier_hash`] of the name
    #[inline]
    pub fn hash_value(&self) -> u32 {
        self.0.hash
    }

    /// Number of live handles, the table's own included
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl PartialEq for Identifier {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.hash);
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:?})", self.as_str())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier interning table
///
/// One per runtime. Handles from different tables never compare equal.
pub struct IdentifierTable {
    identifiers: DashMap<Box<str>, Identifier, FxBuildHasher>,
}

impl IdentifierTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            identifiers: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// The canonical handle for `name`, interning it on first use
    pub fn intern(&self, name: &str) -> Identifier {
        if let Some(existing) = self.identifiers.get(name) {
            return existing.clone();
        }

        self.identifiers
            .entry(Box::from(name))
            .or_insert_with(|| {
                Identifier(Arc::new(IdentifierData {
                    name: Box::from(name),
                    hash: identifier_hash(name),
                }))
            })
            .clone()
    }

    /// The handle for `name` if it was interned before
    pub fn get(&self, name: &str) -> Option<Identifier> {
        self.identifiers.get(name).map(|entry| entry.clone())
    }

    /// Check if `name` is interned
    pub fn is_interned(&self, name: &str) -> bool {
        self.identifiers.contains_key(name)
    }

    /// Get the number of interned names
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

impl Default for IdentifierTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdentifierTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierTable")
            .field("len", &self.len())
            .finish()
    }
}
