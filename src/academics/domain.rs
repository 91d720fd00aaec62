use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for enrolled students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// WGS-84 coordinate attached to a capture or a registered planting site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One evidentiary upload (progress photo) pinned to its capture instant.
///
/// Which semester it counts toward is always derived from `captured_at`,
/// never from the evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub captured_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl SubmissionRecord {
    pub fn at(captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            location: None,
        }
    }
}
