//! Ontology loading and indexing
//!
//! This module turns external classification-dictionary and unit-dictionary
//! XML sources into an immutable in-memory index:
//! - **Exact lookup** - term code to [`OntologyTerm`]
//! - **Inverted term index** - normalized token to candidate term codes,
//!   so term search never scans the whole dictionary
//! - **Unit resolution** - unit codes and symbols to [`UnitTerm`], including
//!   SI-base equivalence for unit-aware matching
//! - **Case-item recovery** - item classes declared as cases of a
//!   categorization class are indexed under that class code
//!
//! The index is built once at startup and read-only afterwards; a malformed
//! source or dangling unit reference fails the whole build and publishes no
//! partial index.
//!
//! # Example
//!
//! ```rust,ignore
//! use dpp_core::ontology::OntologyIndex;
//!
//! let index = OntologyIndex::build_from_dir("ontology_data/eclass", "ontology_data/units.xml")?;
//! if let Some(term) = index.lookup("0173-101-ABX123") {
//!     println!("{}: {}", term.code, term.preferred_name);
//! }
//! for term in index.search_by_term("rated torque") {
//!     println!("candidate: {}", term.code);
//! }
//! ```

mod error;
mod index;
mod loader;
mod normalize;
mod types;

pub use error::{OntologyError, OntologyResult};
pub use index::OntologyIndex;
pub use normalize::{normalize, tokenize};
pub(crate) use normalize::token_overlap;
pub use types::{OntologyTerm, UnitTerm};
