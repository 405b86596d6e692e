//! The execution context handed to natives

use std::any::Any;

use crate::identifier::IdentifierTable;
use crate::registry::StaticTables;

/// What a native function, getter or setter can reach of its runtime.
pub trait ExecState {
    /// The runtime's identifier table
    fn identifiers(&self) -> &IdentifierTable;

    /// The runtime's built static tables
    fn static_tables(&self) -> &StaticTables;

    /// The runtime itself, for natives that need more than the above
    fn as_any(&self) -> &dyn Any;
}
