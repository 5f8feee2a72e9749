//! Serializer: [`Catalog`] → library XML file.
//!
//! Emits the document head, every record's lead and fragment in their
//! current order, then the tail. Because all pieces are the original source
//! bytes, writing an unsorted catalog reproduces the input byte-for-byte.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::Catalog;

/// Errors that can occur while writing a library file
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a catalog to `path`, overwriting any existing file there.
pub fn write_file(catalog: &Catalog, path: &Path) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = std::fs::File::create(path).map_err(io_err)?;
    file.write_all(catalog.head.as_bytes()).map_err(io_err)?;
    for record in &catalog.records {
        file.write_all(record.lead.as_bytes()).map_err(io_err)?;
        file.write_all(record.fragment.as_bytes()).map_err(io_err)?;
    }
    file.write_all(catalog.tail.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;

    debug!(records = catalog.len(), "wrote catalog to {}", path.display());
    Ok(())
}
