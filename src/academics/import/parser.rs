use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::{GeoPoint, StudentId, SubmissionRecord};

#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) student: StudentId,
    pub(crate) record: Option<SubmissionRecord>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for row in csv_reader.deserialize::<SubmissionRow>() {
        let row = row?;
        let record = row.timestamp().map(|captured_at| SubmissionRecord {
            captured_at,
            location: row.location(),
        });

        rows.push(ParsedRow {
            student: StudentId(row.student_id),
            record,
        });
    }

    Ok(rows)
}

/// Upload-service export row. Older exports carry the timestamp under
/// "Uploaded At" instead of "Captured At"; the capture time wins when both
/// are present.
#[derive(Debug, Deserialize)]
struct SubmissionRow {
    #[serde(rename = "Student ID")]
    student_id: String,
    #[serde(
        rename = "Captured At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    captured_at: Option<String>,
    #[serde(
        rename = "Uploaded At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    uploaded_at: Option<String>,
    #[serde(rename = "Latitude", default)]
    latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<f64>,
}

impl SubmissionRow {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.captured_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.uploaded_at.as_deref().and_then(parse_timestamp))
    }

    fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}
