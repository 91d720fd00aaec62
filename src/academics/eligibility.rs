use std::collections::BTreeSet;

use serde::Serialize;

use super::calendar::AcademicCalendar;
use super::domain::SubmissionRecord;
use super::term::ProgramTerm;

/// Certificate eligibility derived from a student's submission history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub certificate_eligible: bool,
    pub covered_semesters: BTreeSet<u16>,
    pub required_semesters: u16,
}

impl EligibilityResult {
    /// Fail-closed result used when no well-formed term is available.
    pub fn ineligible() -> Self {
        Self {
            certificate_eligible: false,
            covered_semesters: BTreeSet::new(),
            required_semesters: 0,
        }
    }

    pub fn outstanding_semesters(&self) -> u16 {
        self.required_semesters
            .saturating_sub(self.covered_semesters.len() as u16)
    }
}

/// Stateless evaluator deciding certificate eligibility for one term.
///
/// Order-independent by construction: submissions collapse into a set of
/// covered semesters, so any permutation of the same history yields the
/// same result.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEvaluator {
    calendar: AcademicCalendar,
}

impl EligibilityEvaluator {
    pub fn new(term: ProgramTerm) -> Self {
        Self {
            calendar: AcademicCalendar::new(term),
        }
    }

    pub fn calendar(&self) -> &AcademicCalendar {
        &self.calendar
    }

    /// Semesters with at least one in-program submission. Each submission
    /// resolves at its own capture instant; out-of-program captures drop.
    pub fn covered_semesters(&self, submissions: &[SubmissionRecord]) -> BTreeSet<u16> {
        submissions
            .iter()
            .filter_map(|submission| self.calendar.semester_on(submission.captured_at.date_naive()))
            .collect()
    }

    pub fn evaluate(&self, submissions: &[SubmissionRecord]) -> EligibilityResult {
        let covered_semesters = self.covered_semesters(submissions);
        let required_semesters = self.calendar.term().total_semesters();

        EligibilityResult {
            certificate_eligible: covered_semesters.len() as u16 >= required_semesters,
            covered_semesters,
            required_semesters,
        }
    }
}

/// Evaluate against a raw enrollment span. A missing or malformed span
/// fails closed: never eligible, never a panic.
pub fn evaluate_display(raw: Option<&str>, submissions: &[SubmissionRecord]) -> EligibilityResult {
    match raw.map(ProgramTerm::parse_display) {
        Some(Ok(term)) => EligibilityEvaluator::new(term).evaluate(submissions),
        Some(Err(_)) | None => EligibilityResult::ineligible(),
    }
}
