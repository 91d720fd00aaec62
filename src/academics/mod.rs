//! Academic calendar resolution, certificate eligibility, and submission
//! intake gating.

pub mod calendar;
pub mod capture;
pub mod domain;
pub mod eligibility;
pub mod import;
pub mod presentation;
pub mod repository;
pub mod router;
pub mod service;
pub mod term;
pub mod window;

#[cfg(test)]
mod tests;

pub use calendar::{standing_for_display, AcademicCalendar, AcademicStanding, NextSemester};
pub use capture::{haversine_distance_m, CapturePolicy, CaptureViolation};
pub use domain::{GeoPoint, StudentId, SubmissionRecord};
pub use eligibility::{evaluate_display, EligibilityEvaluator, EligibilityResult};
pub use import::{
    ImportedSubmission, SubmissionImport, SubmissionImportError, SubmissionLogImporter,
};
pub use presentation::{ordinal, EligibilityView, StandingView, WindowView};
pub use repository::{
    AlertError, CertificateAlert, MemorySubmissionRepository, NotificationPublisher,
    RepositoryError, StoredSubmission, SubmissionRepository, TracingNotifier,
};
pub use router::progress_router;
pub use service::{
    ProgressTrackingService, SubmissionAttempt, SubmissionReceipt, SubmissionServiceError,
};
pub use term::{ProgramTerm, TermParseError};
pub use window::{SubmissionWindowDecision, SubmissionWindowGuard};
