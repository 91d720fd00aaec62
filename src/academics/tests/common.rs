use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::academics::capture::CapturePolicy;
use crate::academics::domain::{GeoPoint, StudentId, SubmissionRecord};
use crate::academics::repository::{
    AlertError, CertificateAlert, MemorySubmissionRepository, NotificationPublisher,
    RepositoryError, StoredSubmission, SubmissionRepository,
};
use crate::academics::service::{ProgressTrackingService, SubmissionAttempt};
use crate::academics::term::ProgramTerm;

pub(super) const SPAN: &str = "2025 - 2029";

pub(super) fn term() -> ProgramTerm {
    ProgramTerm::new(2025, 2029).expect("valid term")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn submission(year: i32, month: u32, day: u32) -> SubmissionRecord {
    SubmissionRecord::at(instant(year, month, day))
}

/// One date inside each of the eight semesters of the 2025-2029 program.
pub(super) fn semester_dates() -> [(i32, u32, u32); 8] {
    [
        (2025, 7, 15),
        (2026, 1, 15),
        (2026, 7, 15),
        (2027, 1, 15),
        (2027, 7, 15),
        (2028, 1, 15),
        (2028, 7, 15),
        (2029, 1, 15),
    ]
}

pub(super) fn full_coverage() -> Vec<SubmissionRecord> {
    semester_dates()
        .into_iter()
        .map(|(year, month, day)| submission(year, month, day))
        .collect()
}

pub(super) fn student(id: &str) -> StudentId {
    StudentId(id.to_string())
}

pub(super) fn attempt(id: &str, year: i32, month: u32, day: u32) -> SubmissionAttempt {
    SubmissionAttempt {
        student: student(id),
        enrollment_span: SPAN.to_string(),
        captured_at: instant(year, month, day),
        capture_location: None,
        registered_site: None,
    }
}

pub(super) fn registered_site() -> GeoPoint {
    GeoPoint {
        latitude: 41.5868,
        longitude: -93.6250,
    }
}

/// Roughly 10 m north of the registered site.
pub(super) fn capture_near_site() -> GeoPoint {
    GeoPoint {
        latitude: 41.5868 + 0.00009,
        longitude: -93.6250,
    }
}

/// Roughly 110 m north of the registered site.
pub(super) fn capture_far_from_site() -> GeoPoint {
    GeoPoint {
        latitude: 41.5868 + 0.001,
        longitude: -93.6250,
    }
}

pub(super) fn build_service() -> (
    ProgressTrackingService<MemorySubmissionRepository, MemoryAlerts>,
    Arc<MemorySubmissionRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemorySubmissionRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = ProgressTrackingService::new(
        repository.clone(),
        alerts.clone(),
        CapturePolicy::default(),
    );
    (service, repository, alerts)
}

#[derive(Default)]
pub(super) struct MemoryAlerts {
    events: Mutex<Vec<CertificateAlert>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<CertificateAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryAlerts {
    fn publish(&self, alert: CertificateAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn append(&self, _submission: StoredSubmission) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_student(&self, _student: &StudentId) -> Result<Vec<StoredSubmission>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
