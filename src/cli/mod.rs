//! Command-line interface for kiwix-sort.
//!
//! One command: sort a library file by path and verify the result. Input and
//! output default to the conventional `library.xml` / `library_sorted.xml`
//! next to the working directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::catalog::{parser, writer};
use crate::verify;

/// kiwix-sort - sort a Kiwix library catalog by content path
#[derive(Parser, Debug)]
#[command(name = "kiwix-sort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input library file
    #[arg(default_value = "library.xml")]
    pub input: PathBuf,

    /// Output file for the sorted library (overwritten if it exists)
    #[arg(default_value = "library_sorted.xml")]
    pub output: PathBuf,
}

impl Cli {
    /// Execute the sort-and-verify pipeline
    pub fn execute(self) -> Result<()> {
        // Parse and sort. Parsing happens before any write, so a bad input
        // never leaves a partial output file behind.
        let mut catalog = parser::parse_file(&self.input)?;
        info!(
            records = catalog.len(),
            "parsed {}",
            self.input.display()
        );

        catalog.sort_by_path();
        writer::write_file(&catalog, &self.output)?;
        println!(
            "Sorted {} record(s) from {} into {}",
            catalog.len(),
            self.input.display(),
            self.output.display()
        );

        // Independent verification pass over both files.
        let report = verify::verify(&self.input, &self.output)
            .context("Failed to reparse files for verification")?;

        if report.unique_input_ids == 0 {
            warn!("No book ids found in {}", self.input.display());
        }
        for (id, count) in &report.duplicates {
            warn!("Duplicate book id in input: {id} ({count} occurrences)");
        }

        println!(
            "Verification: {} unique book id(s) in input, {} record(s) written",
            report.unique_input_ids, report.output_records
        );

        if report.is_match() {
            println!("All book ids are present in the output");
        } else {
            for id in &report.missing {
                eprintln!("  missing from output: {id}");
            }
            for id in &report.unexpected {
                eprintln!("  unexpected in output: {id}");
            }
        }
        report.check()?;

        Ok(())
    }
}
