//! Per-runtime static table registry

use rustc_hash::FxHashMap;

use crate::table::{HashTable, HashTableDef};

/// Names a static table from a [`ClassInfo`](crate::object::ClassInfo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(pub u32);

/// The static tables of one runtime, torn down with it.
#[derive(Debug, Default)]
pub struct StaticTables {
    tables: FxHashMap<TableId, HashTable>,
}

impl StaticTables {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def` under `id`. The table is built on first lookup.
    ///
    /// # Panics
    ///
    /// When `id` is already taken.
    pub fn register(&mut self, id: TableId, def: &'static HashTableDef) {
        let previous = self.tables.insert(id, HashTable::new(def));
        assert!(previous.is_none(), "static table {id:?} registered twice");
    }

    /// The table registered under `id`
    pub fn get(&self, id: TableId) -> Option<&HashTable> {
        self.tables.get(&id)
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Number of tables built so far
    pub fn built_count(&self) -> usize {
        self.tables.values().filter(|table| table.is_built()).count()
    }

    /// Delete every built table, releasing its identifiers.
    pub fn delete_tables(&mut self) {
        for table in self.tables.values_mut() {
            table.delete_table();
        }
    }
}

impl Drop for StaticTables {
    fn drop(&mut self) {
        if self.built_count() > 0 {
            tracing::debug!(tables = self.built_count(), "tearing down static tables");
        }
        self.delete_tables();
    }
}
