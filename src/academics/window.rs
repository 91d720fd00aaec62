use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{AcademicCalendar, AcademicStanding};
use super::term::ProgramTerm;

/// Outcome of the once-per-semester submission gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SubmissionWindowDecision {
    /// Submission permitted for the stated semester.
    Open { semester: u16 },
    /// This semester already carries a submission; the window reopens with
    /// the next semester when one exists.
    AlreadySubmitted {
        semester: u16,
        next_window_opens: Option<NaiveDate>,
    },
    /// Every required semester is documented. Distinct from
    /// `AlreadySubmitted` so callers can congratulate instead of restrict.
    ProgramComplete { required_semesters: u16 },
    /// The attempt falls outside the active program period.
    OutsideProgram { standing: AcademicStanding },
}

impl SubmissionWindowDecision {
    pub fn allowed(&self) -> bool {
        matches!(self, SubmissionWindowDecision::Open { .. })
    }

    /// Restriction reason, absent when the window is open.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            SubmissionWindowDecision::Open { .. } => None,
            SubmissionWindowDecision::AlreadySubmitted { .. } => {
                Some("already submitted for this semester")
            }
            SubmissionWindowDecision::ProgramComplete { .. } => {
                Some("all required submissions completed")
            }
            SubmissionWindowDecision::OutsideProgram { .. } => {
                Some("outside active program period")
            }
        }
    }

    pub fn next_allowed(&self) -> Option<NaiveDate> {
        match self {
            SubmissionWindowDecision::AlreadySubmitted {
                next_window_opens, ..
            } => *next_window_opens,
            _ => None,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            SubmissionWindowDecision::Open { semester } => {
                format!("submission window open for semester {semester}")
            }
            SubmissionWindowDecision::AlreadySubmitted {
                semester,
                next_window_opens,
            } => match next_window_opens {
                Some(date) => format!(
                    "already submitted for semester {semester}; next window opens {date}"
                ),
                None => format!("already submitted for semester {semester}"),
            },
            SubmissionWindowDecision::ProgramComplete { required_semesters } => {
                format!("all {required_semesters} required submissions completed")
            }
            SubmissionWindowDecision::OutsideProgram { standing } => match standing {
                AcademicStanding::NotStarted => "program has not started yet".to_string(),
                AcademicStanding::Graduated => "program period has ended".to_string(),
                _ => "outside active program period".to_string(),
            },
        }
    }
}

/// Policy gate consulted before any upload is accepted.
///
/// The geofence check lives with the upload intake; this guard only answers
/// the semester-gating question.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionWindowGuard {
    calendar: AcademicCalendar,
}

impl SubmissionWindowGuard {
    pub fn new(term: ProgramTerm) -> Self {
        Self {
            calendar: AcademicCalendar::new(term),
        }
    }

    pub fn decide(&self, today: NaiveDate, covered: &BTreeSet<u16>) -> SubmissionWindowDecision {
        let standing = self.calendar.standing_on(today);
        let semester = match standing {
            AcademicStanding::Enrolled { semester, .. } => semester,
            outside => return SubmissionWindowDecision::OutsideProgram { standing: outside },
        };

        let required_semesters = self.calendar.term().total_semesters();
        if covered.len() as u16 >= required_semesters {
            return SubmissionWindowDecision::ProgramComplete { required_semesters };
        }

        if covered.contains(&semester) {
            return SubmissionWindowDecision::AlreadySubmitted {
                semester,
                next_window_opens: self
                    .calendar
                    .next_semester(today)
                    .map(|next| next.opens_on),
            };
        }

        SubmissionWindowDecision::Open { semester }
    }
}
