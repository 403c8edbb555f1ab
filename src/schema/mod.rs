//! Layer schema definitions and the versioned schema registry
//!
//! Each passport layer is described by a [`SchemaDefinition`]: an ordered
//! list of fields with expected value kinds and optional ontology hints.
//! Definitions are registered once in a [`SchemaRegistry`] and never edited
//! in place; new revisions get a new version number so mapping plans built
//! against an older version stay valid.

mod error;
mod registry;
mod types;

pub use error::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{FieldKind, SchemaDefinition, SchemaField};
