//! kiwix-sort - Kiwix library catalog sorter
//!
//! Reorders the `<book>` entries of a Kiwix `library.xml` by their `path`
//! attribute and writes the result to a new file, then verifies that every
//! unique book id from the input survived the rewrite.
//!
//! # Pipeline
//!
//! The whole run is one linear pass with no shared mutable state:
//! - Parse the input catalog into a [`Catalog`] of [`BookRecord`]s
//! - Stable-sort the records by path
//! - Serialize the catalog back out, record fragments verbatim
//! - Reparse both files and compare their id sets
//!
//! # Modules
//!
//! - `catalog`: Data model, parser and writer for the library XML
//! - `verify`: Post-write id-set comparison and duplicate detection
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Sort library.xml into library_sorted.xml
//! kiwix-sort
//!
//! # Explicit paths
//! kiwix-sort my-library.xml sorted.xml
//! ```

pub mod catalog;
pub mod cli;
pub mod verify;

// Re-export main types at crate root for convenience
pub use catalog::{BookRecord, Catalog, ParseError, WriteError};
pub use verify::{VerificationMismatch, VerifyReport};
