//! Post-write verification of the sorted catalog.
//!
//! Reparses the input and output files independently of the sort pass and
//! compares their unique book-id sets. A mismatch means the transformation
//! dropped or invented records and is reported as an error. Duplicate ids in
//! the input are a property of the source data, so they only warrant a
//! warning; deduplication is not this tool's job.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use thiserror::Error;

use crate::catalog::{parser, ParseError};

/// Identifier sets of input and output differ after the rewrite.
///
/// Should never occur under correct operation; it indicates a bug in the
/// sort/serialize pass, not in the source data.
#[derive(Debug, Error)]
#[error(
    "Verification failed: {} id(s) missing from output, {} unexpected",
    missing.len(),
    unexpected.len()
)]
pub struct VerificationMismatch {
    /// Ids present in the input but absent from the output.
    pub missing: Vec<String>,

    /// Ids present in the output but absent from the input.
    pub unexpected: Vec<String>,
}

/// Outcome of one verification pass.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// Record count of the input file.
    pub input_records: usize,

    /// Record count of the output file.
    pub output_records: usize,

    /// Number of unique ids found in the input.
    pub unique_input_ids: usize,

    /// Ids missing from the output, sorted.
    pub missing: Vec<String>,

    /// Ids present in the output but not the input, sorted.
    pub unexpected: Vec<String>,

    /// Input ids appearing more than once, with their counts, sorted by id.
    pub duplicates: Vec<(String, usize)>,
}

impl VerifyReport {
    /// Whether the id sets of input and output are equal.
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }

    /// Turn a set mismatch into a [`VerificationMismatch`] error.
    pub fn check(&self) -> Result<(), VerificationMismatch> {
        if self.is_match() {
            Ok(())
        } else {
            Err(VerificationMismatch {
                missing: self.missing.clone(),
                unexpected: self.unexpected.clone(),
            })
        }
    }
}

/// Compare the id sets of the original and the freshly written file.
///
/// Both files are parsed with the regular record parser; nothing is shared
/// with the sort pass, so this is an independent check on the whole
/// transformation. Report ordering is deterministic.
pub fn verify(input: &Path, output: &Path) -> Result<VerifyReport, ParseError> {
    let input_catalog = parser::parse_file(input)?;
    let output_catalog = parser::parse_file(output)?;

    let mut input_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &input_catalog.records {
        if let Some(id) = record.id.as_deref() {
            *input_counts.entry(id).or_insert(0) += 1;
        }
    }

    let output_ids: BTreeSet<&str> = output_catalog
        .records
        .iter()
        .filter_map(|r| r.id.as_deref())
        .collect();

    let missing = input_counts
        .keys()
        .filter(|id| !output_ids.contains(**id))
        .map(|id| id.to_string())
        .collect();

    let unexpected = output_ids
        .iter()
        .filter(|id| !input_counts.contains_key(**id))
        .map(|id| id.to_string())
        .collect();

    let duplicates = input_counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(id, count)| (id.to_string(), *count))
        .collect();

    Ok(VerifyReport {
        input_records: input_catalog.len(),
        output_records: output_catalog.len(),
        unique_input_ids: input_counts.len(),
        missing,
        unexpected,
        duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, format!("<library>{body}</library>")).unwrap();
        path
    }

    #[test]
    fn test_identical_id_sets_match() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "in.xml", "<book id=\"1\" path=\"b\"/><book id=\"2\" path=\"a\"/>");
        let output = write(&dir, "out.xml", "<book id=\"2\" path=\"a\"/><book id=\"1\" path=\"b\"/>");

        let report = verify(&input, &output).unwrap();

        assert!(report.is_match());
        assert!(report.check().is_ok());
        assert_eq!(report.input_records, 2);
        assert_eq!(report.output_records, 2);
        assert_eq!(report.unique_input_ids, 2);
        assert!(report.duplicates.is_empty());
    }

    #[test]
    fn test_missing_id_is_reported() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "in.xml", "<book id=\"1\" path=\"a\"/><book id=\"2\" path=\"b\"/>");
        let output = write(&dir, "out.xml", "<book id=\"1\" path=\"a\"/>");

        let report = verify(&input, &output).unwrap();

        assert!(!report.is_match());
        assert_eq!(report.missing, vec!["2"]);
        assert!(report.unexpected.is_empty());

        let err = report.check().unwrap_err();
        assert_eq!(err.missing, vec!["2"]);
    }

    #[test]
    fn test_unexpected_id_is_reported() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "in.xml", "<book id=\"1\" path=\"a\"/>");
        let output = write(&dir, "out.xml", "<book id=\"1\" path=\"a\"/><book id=\"9\" path=\"z\"/>");

        let report = verify(&input, &output).unwrap();

        assert_eq!(report.unexpected, vec!["9"]);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_duplicate_ids_warn_but_still_match() {
        let dir = TempDir::new().unwrap();
        let input = write(
            &dir,
            "in.xml",
            "<book id=\"7\" path=\"a\"/><book id=\"7\" path=\"b\"/><book id=\"8\" path=\"c\"/>",
        );
        let output = write(
            &dir,
            "out.xml",
            "<book id=\"7\" path=\"a\"/><book id=\"7\" path=\"b\"/><book id=\"8\" path=\"c\"/>",
        );

        let report = verify(&input, &output).unwrap();

        assert!(report.is_match());
        assert_eq!(report.duplicates, vec![("7".to_string(), 2)]);
        assert_eq!(report.input_records, 3);
        assert_eq!(report.unique_input_ids, 2);
    }

    #[test]
    fn test_records_without_ids_are_ignored() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "in.xml", "<book path=\"a\"/><book id=\"1\" path=\"b\"/>");
        let output = write(&dir, "out.xml", "<book id=\"1\" path=\"b\"/><book path=\"a\"/>");

        let report = verify(&input, &output).unwrap();

        assert!(report.is_match());
        assert_eq!(report.unique_input_ids, 1);
    }

    #[test]
    fn test_missing_output_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "in.xml", "<book id=\"1\" path=\"a\"/>");

        let err = verify(&input, &dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
    }
}
