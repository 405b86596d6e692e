//! Static property hash tables
//!
//! A [`HashTableDef`] is a compile-time list of rows plus sizing parameters.
//! The [`HashTable`] built from it maps interned names to [`HashEntry`]s.
//!
//! Two layouts exist:
//!
//! - **Perfect**: `hash_size_mask + 1` slots indexed by `hash & mask`, one
//!   entry per slot. The mask is chosen ahead of time so the row names never
//!   collide ([`find_perfect_hash_mask`]).
//! - **Compact**: `size` slots. Entries start at `hash & hash_size_mask`;
//!   collisions go to the overflow region after the mask and are chained
//!   through [`HashEntry::next`].
//!
//! Tables belong to one runtime and are not shared across threads.

use std::cell::{Cell, OnceCell};

use crate::entry::{HashEntry, HashTableValue};
use crate::identifier::{Identifier, IdentifierTable, identifier_hash};

/// How a table's entries are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    /// Collision-free direct indexing
    Perfect {
        /// Slot count minus one, a power of two minus one
        hash_size_mask: u32,
    },
    /// Bucket heads plus a chained overflow region
    Compact {
        /// Bucket count minus one, a power of two minus one
        hash_size_mask: u32,
        /// Total slots, overflow included
        size: u32,
    },
}

impl TableMode {
    /// Compact sizing that always fits `entry_count` rows
    pub const fn compact_for(entry_count: usize) -> Self {
        let buckets = if entry_count == 0 {
            1
        } else {
            entry_count.next_power_of_two()
        };
        Self::Compact {
            hash_size_mask: (buckets - 1) as u32,
            size: (buckets + entry_count) as u32,
        }
    }

    /// Mask applied to identifier hashes
    pub const fn hash_size_mask(&self) -> u32 {
        match *self {
            Self::Perfect { hash_size_mask } | Self::Compact { hash_size_mask, .. } => hash_size_mask,
        }
    }

    /// Number of slots to allocate
    pub const fn slot_count(&self) -> usize {
        match *self {
            Self::Perfect { hash_size_mask } => hash_size_mask as usize + 1,
            Self::Compact { size, .. } => size as usize,
        }
    }
}

/// Smallest perfect-hash mask under which `names` do not collide.
///
/// Used when writing a table definition. `None` when two names hash
/// identically, duplicates included.
pub fn find_perfect_hash_mask(names: &[&str]) -> Option<u32> {
    let hashes: Vec<u32> = names.iter().map(|name| identifier_hash(name)).collect();

    let mut sorted = hashes.clone();
    sorted.sort_unstable();
    if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
        return None;
    }

    let mut size = names.len().max(1).next_power_of_two();
    while size <= 1 << 31 {
        let mask = (size - 1) as u32;
        let mut taken = vec![false; size];
        let collides = hashes.iter().any(|hash| {
            let slot = (hash & mask) as usize;
            std::mem::replace(&mut taken[slot], true)
        });
        if !collides {
            return Some(mask);
        }
        size <<= 1;
    }
    None
}

/// A static table definition
#[derive(Debug)]
pub struct HashTableDef {
    /// Rows
    pub values: &'static [HashTableValue],
    /// Layout
    pub mode: TableMode,
}

impl HashTableDef {
    /// Number of rows
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Check for an empty definition
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A lazily built static property table
#[derive(Debug)]
pub struct HashTable {
    def: &'static HashTableDef,
    table: OnceCell<Box<[Option<HashEntry>]>>,
    building: Cell<bool>,
}

impl HashTable {
    /// An unbuilt table for `def`
    pub const fn new(def: &'static HashTableDef) -> Self {
        Self {
            def,
            table: OnceCell::new(),
            building: Cell::new(false),
        }
    }

    /// The definition this table is built from
    pub fn def(&self) -> &'static HashTableDef {
        self.def
    }

    /// Check if the entries exist
    pub fn is_built(&self) -> bool {
        self.table.get().is_some()
    }

    /// Build the entries, interning every row name in `identifiers`.
    ///
    /// # Panics
    ///
    /// When the table is already built or being built, when two names share
    /// a slot in a perfect table, or when a compact table runs out of
    /// overflow slots. All of these mean the definition is wrong.
    pub fn create_table(&self, identifiers: &IdentifierTable) {
        assert!(
            !self.is_built() && !self.building.get(),
            "static table built twice"
        );
        self.building.set(true);

        let entries = match self.def.mode {
            TableMode::Perfect { hash_size_mask } => self.build_perfect(identifiers, hash_size_mask),
            TableMode::Compact { hash_size_mask, size } => {
                self.build_compact(identifiers, hash_size_mask, size)
            }
        };

        tracing::debug!(
            entries = self.def.values.len(),
            slots = entries.len(),
            mode = ?self.def.mode,
            "built static property table"
        );

        let stored = self.table.set(entries).is_ok();
        self.building.set(false);
        assert!(stored, "static table built twice");
    }

    fn build_perfect(&self, identifiers: &IdentifierTable, mask: u32) -> Box<[Option<HashEntry>]> {
        let mut entries: Vec<Option<HashEntry>> = vec![None; mask as usize + 1];
        for row in self.def.values {
            let key = identifiers.intern(row.name);
            let slot = &mut entries[(key.hash_value() & mask) as usize];
            if let Some(existing) = slot {
                panic!(
                    "perfect hash collision between {:?} and {:?} under mask {mask:#x}",
                    existing.key.as_str(),
                    row.name
                );
            }
            *slot = Some(HashEntry::new(key, row));
        }
        entries.into_boxed_slice()
    }

    fn build_compact(
        &self,
        identifiers: &IdentifierTable,
        mask: u32,
        size: u32,
    ) -> Box<[Option<HashEntry>]> {
        let mut entries: Vec<Option<HashEntry>> = vec![None; size as usize];
        let mut link_index = mask as usize + 1;

        for row in self.def.values {
            let key = identifiers.intern(row.name);
            let mut index = (key.hash_value() & mask) as usize;

            if entries[index].is_some() {
                // Walk to the end of the chain
                while let Some(next) = entries[index].as_ref().and_then(HashEntry::next) {
                    index = next as usize;
                }
                assert!(
                    link_index < entries.len(),
                    "compact static table overflowed {size} slots at {:?}",
                    row.name
                );
                if let Some(tail) = entries[index].as_mut() {
                    tail.next = Some(link_index as u32);
                }
                index = link_index;
                link_index += 1;
            }

            entries[index] = Some(HashEntry::new(key, row));
        }
        entries.into_boxed_slice()
    }

    /// The entry for `name`, building the table on first use.
    pub fn entry(&self, identifiers: &IdentifierTable, name: &Identifier) -> Option<&HashEntry> {
        if !self.is_built() {
            self.create_table(identifiers);
        }
        let entries = self.table.get()?;

        let mut index = (name.hash_value() & self.def.mode.hash_size_mask()) as usize;
        match self.def.mode {
            TableMode::Perfect { .. } => entries[index].as_ref().filter(|entry| entry.key == *name),
            TableMode::Compact { .. } => loop {
                let entry = entries[index].as_ref()?;
                if entry.key == *name {
                    return Some(entry);
                }
                index = entry.next? as usize;
            },
        }
    }

    /// Live entries in slot order. Empty when unbuilt.
    pub fn iter(&self) -> impl Iterator<Item = &HashEntry> {
        self.table
            .get()
            .into_iter()
            .flat_map(|entries| entries.iter().flatten())
    }

    /// Release the entries and their identifier handles.
    ///
    /// The table can be built again afterwards. No-op when unbuilt.
    pub fn delete_table(&mut self) {
        if let Some(entries) = self.table.take() {
            tracing::debug!(entries = entries.iter().flatten().count(), "deleted static property table");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{ConstantValue, StaticValue};

    static TWO_ROWS: [HashTableValue; 2] = [
        HashTableValue::number("NaN", f64::NAN),
        HashTableValue::number("MAX_VALUE", f64::MAX),
    ];

    static COMPACT_TWO: HashTableDef = HashTableDef {
        values: &TWO_ROWS,
        mode: TableMode::compact_for(2),
    };

    // Every name lands in bucket zero
    static ONE_BUCKET: HashTableDef = HashTableDef {
        values: &TWO_ROWS,
        mode: TableMode::Compact {
            hash_size_mask: 0,
            size: 2,
        },
    };

    static TOO_SMALL: HashTableDef = HashTableDef {
        values: &TWO_ROWS,
        mode: TableMode::Compact {
            hash_size_mask: 0,
            size: 1,
        },
    };

    static PERFECT_COLLIDING: HashTableDef = HashTableDef {
        values: &TWO_ROWS,
        mode: TableMode::Perfect { hash_size_mask: 0 },
    };

    fn number_of(entry: &HashEntry) -> f64 {
        match entry.value() {
            StaticValue::Constant(ConstantValue::Number(n)) => *n,
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_compact_lookup() {
        let ids = IdentifierTable::new();
        let table = HashTable::new(&COMPACT_TWO);

        let nan = table.entry(&ids, &ids.intern("NaN")).unwrap();
        assert!(number_of(nan).is_nan());
        let max = table.entry(&ids, &ids.intern("MAX_VALUE")).unwrap();
        assert_eq!(number_of(max), f64::MAX);
        assert!(table.entry(&ids, &ids.intern("missing")).is_none());
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn test_builds_lazily() {
        let ids = IdentifierTable::new();
        let table = HashTable::new(&COMPACT_TWO);
        assert!(!table.is_built());
        assert_eq!(table.iter().count(), 0);
        table.entry(&ids, &ids.intern("NaN"));
        assert!(table.is_built());
    }

    #[test]
    fn test_chained_collisions() {
        let ids = IdentifierTable::new();
        let table = HashTable::new(&ONE_BUCKET);
        table.create_table(&ids);

        let head = table.entry(&ids, &ids.intern("NaN")).unwrap();
        assert_eq!(head.next(), Some(1));
        let tail = table.entry(&ids, &ids.intern("MAX_VALUE")).unwrap();
        assert_eq!(tail.next(), None);
        assert!(table.entry(&ids, &ids.intern("MIN_VALUE")).is_none());
    }

    #[test]
    fn test_perfect_mode() {
        let names: Vec<&str> = TWO_ROWS.iter().map(|row| row.name).collect();
        let mask = find_perfect_hash_mask(&names).unwrap();

        let def: &'static HashTableDef = Box::leak(Box::new(HashTableDef {
            values: &TWO_ROWS,
            mode: TableMode::Perfect { hash_size_mask: mask },
        }));
        let ids = IdentifierTable::new();
        let table = HashTable::new(def);
        assert!(table.entry(&ids, &ids.intern("NaN")).is_some());
        assert!(table.entry(&ids, &ids.intern("MAX_VALUE")).is_some());
        assert!(table.entry(&ids, &ids.intern("MIN_VALUE")).is_none());
    }

    #[test]
    fn test_lookup_uses_identity() {
        let ids = IdentifierTable::new();
        let other = IdentifierTable::new();
        let table = HashTable::new(&COMPACT_TWO);
        table.create_table(&ids);
        assert!(table.entry(&ids, &other.intern("NaN")).is_none());
    }

    #[test]
    #[should_panic(expected = "built twice")]
    fn test_double_build_panics() {
        let ids = IdentifierTable::new();
        let table = HashTable::new(&COMPACT_TWO);
        table.create_table(&ids);
        table.create_table(&ids);
    }

    #[test]
    #[should_panic(expected = "perfect hash collision")]
    fn test_perfect_collision_panics() {
        let ids = IdentifierTable::new();
        HashTable::new(&PERFECT_COLLIDING).create_table(&ids);
    }

    #[test]
    #[should_panic(expected = "overflowed")]
    fn test_compact_overflow_panics() {
        let ids = IdentifierTable::new();
        HashTable::new(&TOO_SMALL).create_table(&ids);
    }

    #[test]
    fn test_delete_releases_identifiers() {
        let ids = IdentifierTable::new();
        let mut table = HashTable::new(&COMPACT_TWO);
        table.delete_table();

        table.create_table(&ids);
        let nan = ids.intern("NaN");
        assert_eq!(nan.ref_count(), 3);

        table.delete_table();
        assert!(!table.is_built());
        assert_eq!(nan.ref_count(), 2);
    }

    #[test]
    fn test_compact_sizing() {
        assert_eq!(
            TableMode::compact_for(3),
            TableMode::Compact {
                hash_size_mask: 3,
                size: 7
            }
        );
        assert_eq!(TableMode::compact_for(0).slot_count(), 1);
        assert_eq!(TableMode::Perfect { hash_size_mask: 7 }.slot_count(), 8);
    }
}
