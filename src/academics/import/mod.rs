//! CSV import of the upload service's submission history export.
//!
//! Normalization happens here, at the boundary: field-name variants and
//! loose timestamp formats are resolved into strict `SubmissionRecord`s
//! before any calendar logic sees them.

mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::{StudentId, SubmissionRecord};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionImportError {
    #[error("failed to read submission export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid submission CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// One normalized row of the export.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSubmission {
    pub student: StudentId,
    pub record: SubmissionRecord,
}

/// Result of an import run. Rows without a usable timestamp are dropped
/// rather than failing the whole file, and counted in `skipped_rows`.
#[derive(Debug, Default)]
pub struct SubmissionImport {
    pub records: Vec<ImportedSubmission>,
    pub skipped_rows: usize,
}

impl SubmissionImport {
    pub fn for_student(&self, student: &StudentId) -> Vec<SubmissionRecord> {
        self.records
            .iter()
            .filter(|imported| &imported.student == student)
            .map(|imported| imported.record)
            .collect()
    }

    pub fn all_records(&self) -> Vec<SubmissionRecord> {
        self.records.iter().map(|imported| imported.record).collect()
    }
}

pub struct SubmissionLogImporter;

impl SubmissionLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SubmissionImport, SubmissionImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<SubmissionImport, SubmissionImportError> {
        let mut import = SubmissionImport::default();

        for row in parser::parse_rows(reader)? {
            match row.record {
                Some(record) => import.records.push(ImportedSubmission {
                    student: row.student,
                    record,
                }),
                None => import.skipped_rows += 1,
            }
        }

        Ok(import)
    }
}
