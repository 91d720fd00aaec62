//! User-facing views over the calendar, eligibility, and window types.
//! Pure formatting; tolerant of unknown inputs via fixed fallbacks.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::AcademicStanding;
use super::eligibility::EligibilityResult;
use super::window::SubmissionWindowDecision;

pub const UNKNOWN_YEAR_LABEL: &str = "Unknown Year";
pub const NOT_SPECIFIED_LABEL: &str = "Not specified";

/// English ordinal label: 1st, 2nd, 3rd, 4th, with the 11/12/13 exception.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, hundreds) if hundreds != 11 => "st",
        (2, hundreds) if hundreds != 12 => "nd",
        (3, hundreds) if hundreds != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingView {
    pub year_label: String,
    pub semester_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_in_program: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_in_program: Option<u16>,
}

impl StandingView {
    pub fn from_standing(standing: &AcademicStanding) -> Self {
        let year_label = match standing {
            AcademicStanding::Enrolled { year, .. } => {
                format!("{} Year", ordinal(u32::from(*year)))
            }
            AcademicStanding::NotStarted => "Not Started".to_string(),
            AcademicStanding::Graduated => "Graduated".to_string(),
            AcademicStanding::Unknown => UNKNOWN_YEAR_LABEL.to_string(),
        };

        let semester_label = match standing {
            AcademicStanding::Enrolled { semester, .. } => {
                format!("{} Semester", ordinal(u32::from(*semester)))
            }
            _ => NOT_SPECIFIED_LABEL.to_string(),
        };

        Self {
            year_label,
            semester_label,
            year_in_program: standing.year_in_program(),
            semester_in_program: standing.semester_in_program(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityView {
    pub certificate_eligible: bool,
    pub semesters_covered: Vec<u16>,
    pub required_semesters: u16,
    pub summary: String,
}

impl EligibilityView {
    pub fn from_result(result: &EligibilityResult) -> Self {
        let summary = if result.required_semesters == 0 {
            NOT_SPECIFIED_LABEL.to_string()
        } else if result.certificate_eligible {
            format!(
                "all {} required semesters documented",
                result.required_semesters
            )
        } else {
            format!(
                "{} of {} semesters documented",
                result.covered_semesters.len(),
                result.required_semesters
            )
        };

        Self {
            certificate_eligible: result.certificate_eligible,
            semesters_covered: result.covered_semesters.iter().copied().collect(),
            required_semesters: result.required_semesters,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowView {
    pub allowed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_allowed_on: Option<NaiveDate>,
}

impl WindowView {
    pub fn from_decision(decision: &SubmissionWindowDecision) -> Self {
        Self {
            allowed: decision.allowed(),
            message: decision.summary(),
            next_allowed_on: decision.next_allowed(),
        }
    }
}
