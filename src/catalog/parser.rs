//! Record parser: library XML file → [`Catalog`].
//!
//! Walks the document with a `quick_xml` event reader but never rebuilds the
//! markup from events. Each top-level `<book>` element is located by its byte
//! span in the source text and captured verbatim, so the writer can re-emit
//! it untouched. Everything around the records (declaration, root tag,
//! whitespace, comments) is captured as raw text for the same reason.

use std::path::{Path, PathBuf};

use quick_xml::events::attributes::AttrError;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

use super::{BookRecord, Catalog};

/// Errors that can occur while parsing a library file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML in {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed attribute in {path}: {source}")]
    Attribute {
        path: PathBuf,
        #[source]
        source: AttrError,
    },

    #[error("No root element found in {path}")]
    NoRoot { path: PathBuf },
}

/// Parse a library file into a [`Catalog`].
///
/// Read-only and re-entrant: the verifier calls this on both the input and
/// the freshly written output.
pub fn parse_file(path: &Path) -> Result<Catalog, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_str(&text, path)?;
    debug!(
        records = catalog.len(),
        "parsed catalog from {}",
        path.display()
    );
    Ok(catalog)
}

/// Parse an in-memory library document. `origin` is only used in errors.
fn parse_str(text: &str, origin: &Path) -> Result<Catalog, ParseError> {
    let mut reader = Reader::from_str(text);

    let xml_err = |source| ParseError::Xml {
        path: origin.to_path_buf(),
        source,
    };

    let mut records = Vec::new();
    // Byte offset just past the root start tag; set once the root is seen.
    let mut head_end: Option<usize> = None;
    // Start of unclaimed text between records.
    let mut cursor = 0usize;
    // Element nesting depth; the root's children sit at depth 1.
    let mut depth = 0usize;

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                if depth == 1 && e.name().as_ref() == b"book" {
                    let (id, path) = book_attributes(&e, origin)?;
                    reader.read_to_end(e.name()).map_err(xml_err)?;
                    let end = reader.buffer_position() as usize;
                    records.push(BookRecord {
                        id,
                        path,
                        lead: text[cursor..start].to_string(),
                        fragment: text[start..end].to_string(),
                    });
                    cursor = end;
                } else {
                    if depth == 0 {
                        let end = reader.buffer_position() as usize;
                        head_end = Some(end);
                        cursor = end;
                    }
                    depth += 1;
                }
            }
            Event::Empty(e) => {
                if depth == 1 && e.name().as_ref() == b"book" {
                    let (id, path) = book_attributes(&e, origin)?;
                    let end = reader.buffer_position() as usize;
                    records.push(BookRecord {
                        id,
                        path,
                        lead: text[cursor..start].to_string(),
                        fragment: text[start..end].to_string(),
                    });
                    cursor = end;
                } else if depth == 0 {
                    // Self-closing root; the document has no records.
                    let end = reader.buffer_position() as usize;
                    head_end = Some(end);
                    cursor = end;
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    let head_end = head_end.ok_or_else(|| ParseError::NoRoot {
        path: origin.to_path_buf(),
    })?;

    Ok(Catalog {
        head: text[..head_end].to_string(),
        records,
        tail: text[cursor..].to_string(),
    })
}

/// Extract the `id` and `path` attributes from a `<book>` start tag.
///
/// Values are captured verbatim (no unescaping or normalization); a missing
/// path becomes the empty string so it sorts before every real path.
fn book_attributes(
    e: &quick_xml::events::BytesStart<'_>,
    origin: &Path,
) -> Result<(Option<String>, String), ParseError> {
    let mut id = None;
    let mut path = String::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|source| ParseError::Attribute {
            path: origin.to_path_buf(),
            source,
        })?;
        match attr.key.as_ref() {
            b"id" => id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            b"path" => path = String::from_utf8_lossy(&attr.value).into_owned(),
            _ => {}
        }
    }

    Ok((id, path))
}
