//! CLI command implementations.

pub mod clip;
pub mod decompose;
pub mod format;
pub mod lookup;
pub mod parse;
