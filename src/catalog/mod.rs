//! Catalog data model for a Kiwix library file.
//!
//! A catalog is the parsed form of one `library.xml`: the document head
//! (declaration plus root start tag), an ordered list of book records, and
//! the document tail (everything after the last record, typically the root
//! close tag). Records keep their original source bytes so the document
//! round-trips losslessly; only their order changes.

pub mod parser;
pub mod writer;

pub use parser::ParseError;
pub use writer::WriteError;

/// One `<book>` entry of the catalog.
///
/// Immutable once parsed; sorting only changes its position.
#[derive(Debug, Clone)]
pub struct BookRecord {
    /// The `id` attribute, if present. Records without an id are passed
    /// through but contribute nothing to verification.
    pub id: Option<String>,

    /// The `path` attribute, used as the sort key. A missing path is
    /// recorded as the empty string, which sorts before every real path.
    pub path: String,

    /// Raw text (indentation, comments) between the previous record and
    /// this element. Travels with the record so reordering keeps the
    /// document's inter-record texture intact.
    pub lead: String,

    /// The element's exact source bytes, re-emitted unmodified.
    pub fragment: String,
}

/// A parsed library document.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Everything up to and including the root start tag.
    pub head: String,

    /// All book records, in document order until sorted.
    pub records: Vec<BookRecord>,

    /// Everything after the last record through end of file.
    pub tail: String,
}

impl Catalog {
    /// Sort records ascending by `path` bytes.
    ///
    /// `sort_by` is stable, so records sharing a path keep their original
    /// relative order and repeated runs are reproducible.
    pub fn sort_by_path(&mut self) {
        self.records
            .sort_by(|a, b| a.path.as_bytes().cmp(b.path.as_bytes()));
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
