use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::capture::{CapturePolicy, CaptureViolation};
use super::domain::{GeoPoint, StudentId, SubmissionRecord};
use super::eligibility::{EligibilityEvaluator, EligibilityResult};
use super::repository::{
    AlertError, CertificateAlert, NotificationPublisher, RepositoryError, StoredSubmission,
    SubmissionRepository,
};
use super::term::{ProgramTerm, TermParseError};
use super::window::{SubmissionWindowDecision, SubmissionWindowGuard};

/// One attempt to record progress evidence, as received from the upload UI.
///
/// `captured_at` is the moment of the attempt; the service never reads the
/// ambient clock itself.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionAttempt {
    pub student: StudentId,
    pub enrollment_span: String,
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub capture_location: Option<GeoPoint>,
    #[serde(default)]
    pub registered_site: Option<GeoPoint>,
}

/// Confirmation returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub student: StudentId,
    pub semester: u16,
    pub eligibility: EligibilityResult,
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionServiceError {
    #[error(transparent)]
    Term(#[from] TermParseError),
    #[error("{}", .0.summary())]
    WindowClosed(SubmissionWindowDecision),
    #[error(transparent)]
    Capture(#[from] CaptureViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}

/// Service composing the capture policy, window guard, submission log, and
/// eligibility evaluator.
pub struct ProgressTrackingService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    capture: CapturePolicy,
}

impl<R, N> ProgressTrackingService<R, N>
where
    R: SubmissionRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, capture: CapturePolicy) -> Self {
        Self {
            repository,
            notifier,
            capture,
        }
    }

    /// Gate and record a submission attempt.
    ///
    /// Denials from the window guard surface as `WindowClosed` so callers
    /// can render the reason and the next-allowed date; geofence failures
    /// reject before any semester bookkeeping happens.
    pub fn submit(
        &self,
        attempt: SubmissionAttempt,
    ) -> Result<SubmissionReceipt, SubmissionServiceError> {
        let term = ProgramTerm::parse_display(&attempt.enrollment_span)?;

        if let Some(site) = attempt.registered_site {
            let location = attempt
                .capture_location
                .ok_or(CaptureViolation::MissingLocation)?;
            self.capture.verify(site, location)?;
        }

        let evaluator = EligibilityEvaluator::new(term);
        let history = self.history_records(&attempt.student)?;
        let covered = evaluator.covered_semesters(&history);

        let guard = SubmissionWindowGuard::new(term);
        let decision = guard.decide(attempt.captured_at.date_naive(), &covered);
        let semester = match decision {
            SubmissionWindowDecision::Open { semester } => semester,
            closed => return Err(SubmissionServiceError::WindowClosed(closed)),
        };

        let record = SubmissionRecord {
            captured_at: attempt.captured_at,
            location: attempt.capture_location,
        };
        self.repository.append(StoredSubmission {
            student: attempt.student.clone(),
            record,
            semester,
        })?;

        let history = self.history_records(&attempt.student)?;
        let eligibility = evaluator.evaluate(&history);

        if eligibility.certificate_eligible {
            self.notifier.publish(CertificateAlert {
                student: attempt.student.clone(),
                enrollment_span: attempt.enrollment_span.clone(),
                semesters_documented: eligibility.required_semesters,
            })?;
        }

        info!(
            student = %attempt.student.0,
            semester,
            "progress submission accepted"
        );

        Ok(SubmissionReceipt {
            student: attempt.student,
            semester,
            eligibility,
        })
    }

    /// Certificate eligibility for a student's recorded history.
    pub fn eligibility(
        &self,
        student: &StudentId,
        enrollment_span: &str,
    ) -> Result<EligibilityResult, SubmissionServiceError> {
        let term = ProgramTerm::parse_display(enrollment_span)?;
        let history = self.history_records(student)?;
        Ok(EligibilityEvaluator::new(term).evaluate(&history))
    }

    /// Window decision a student would receive for an attempt on `on`.
    pub fn window(
        &self,
        student: &StudentId,
        enrollment_span: &str,
        on: NaiveDate,
    ) -> Result<SubmissionWindowDecision, SubmissionServiceError> {
        let term = ProgramTerm::parse_display(enrollment_span)?;
        let history = self.history_records(student)?;
        let covered = EligibilityEvaluator::new(term).covered_semesters(&history);
        Ok(SubmissionWindowGuard::new(term).decide(on, &covered))
    }

    fn history_records(
        &self,
        student: &StudentId,
    ) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Ok(self
            .repository
            .for_student(student)?
            .into_iter()
            .map(|stored| stored.record)
            .collect())
    }
}
