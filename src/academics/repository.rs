use std::sync::Mutex;

use serde::Serialize;

use super::domain::{StudentId, SubmissionRecord};

/// A submission accepted by the intake gate, with its resolved semester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredSubmission {
    pub student: StudentId,
    pub record: SubmissionRecord,
    pub semester: u16,
}

/// Errors raised by the submission log backend.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("submission log unavailable: {0}")]
    Unavailable(String),
}

/// Append-only store of accepted submissions.
pub trait SubmissionRepository: Send + Sync {
    fn append(&self, submission: StoredSubmission) -> Result<(), RepositoryError>;

    fn for_student(&self, student: &StudentId) -> Result<Vec<StoredSubmission>, RepositoryError>;
}

/// Notification fired once a student's covered set becomes complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateAlert {
    pub student: StudentId,
    pub enrollment_span: String,
    pub semesters_documented: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("failed to deliver notification: {0}")]
    Delivery(String),
}

pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, alert: CertificateAlert) -> Result<(), AlertError>;
}

/// Process-local submission log, the default backing for the demo server.
#[derive(Debug, Default)]
pub struct MemorySubmissionRepository {
    entries: Mutex<Vec<StoredSubmission>>,
}

impl SubmissionRepository for MemorySubmissionRepository {
    fn append(&self, submission: StoredSubmission) -> Result<(), RepositoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("submission log poisoned".to_string()))?;
        entries.push(submission);
        Ok(())
    }

    fn for_student(&self, student: &StudentId) -> Result<Vec<StoredSubmission>, RepositoryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("submission log poisoned".to_string()))?;
        Ok(entries
            .iter()
            .filter(|entry| &entry.student == student)
            .cloned()
            .collect())
    }
}

/// Publisher that records certificate alerts to the service log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationPublisher for TracingNotifier {
    fn publish(&self, alert: CertificateAlert) -> Result<(), AlertError> {
        tracing::info!(
            student = %alert.student.0,
            enrollment_span = %alert.enrollment_span,
            semesters = alert.semesters_documented,
            "certificate requirements completed"
        );
        Ok(())
    }
}
