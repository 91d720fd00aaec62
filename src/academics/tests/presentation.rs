use super::common::*;
use crate::academics::calendar::{AcademicCalendar, AcademicStanding};
use crate::academics::eligibility::{EligibilityEvaluator, EligibilityResult};
use crate::academics::presentation::{
    ordinal, EligibilityView, StandingView, WindowView, NOT_SPECIFIED_LABEL, UNKNOWN_YEAR_LABEL,
};
use crate::academics::window::SubmissionWindowDecision;

#[test]
fn ordinals_follow_english_suffix_rules() {
    let cases = [
        (1, "1st"),
        (2, "2nd"),
        (3, "3rd"),
        (4, "4th"),
        (11, "11th"),
        (12, "12th"),
        (13, "13th"),
        (21, "21st"),
        (22, "22nd"),
        (103, "103rd"),
        (111, "111th"),
    ];

    for (n, expected) in cases {
        assert_eq!(ordinal(n), expected);
    }
}

#[test]
fn enrolled_standing_renders_year_and_semester_labels() {
    let calendar = AcademicCalendar::new(term());
    let standing = calendar.standing_on(date(2026, 6, 1));
    let view = StandingView::from_standing(&standing);

    assert_eq!(view.year_label, "2nd Year");
    assert_eq!(view.semester_label, "3rd Semester");
    assert_eq!(view.year_in_program, Some(2));
    assert_eq!(view.semester_in_program, Some(3));
}

#[test]
fn out_of_range_standings_render_phase_labels() {
    let not_started = StandingView::from_standing(&AcademicStanding::NotStarted);
    assert_eq!(not_started.year_label, "Not Started");
    assert_eq!(not_started.semester_label, NOT_SPECIFIED_LABEL);
    assert_eq!(not_started.year_in_program, None);

    let graduated = StandingView::from_standing(&AcademicStanding::Graduated);
    assert_eq!(graduated.year_label, "Graduated");
}

#[test]
fn unknown_standing_renders_the_fixed_fallback() {
    let view = StandingView::from_standing(&AcademicStanding::Unknown);

    assert_eq!(view.year_label, UNKNOWN_YEAR_LABEL);
    assert_eq!(view.semester_label, NOT_SPECIFIED_LABEL);
    assert_eq!(view.year_in_program, None);
    assert_eq!(view.semester_in_program, None);
}

#[test]
fn eligibility_views_summarize_progress() {
    let evaluator = EligibilityEvaluator::new(term());

    let partial = evaluator.evaluate(&full_coverage()[..3]);
    let view = EligibilityView::from_result(&partial);
    assert!(!view.certificate_eligible);
    assert_eq!(view.summary, "3 of 8 semesters documented");
    assert_eq!(view.semesters_covered, vec![1, 2, 3]);

    let complete = evaluator.evaluate(&full_coverage());
    let view = EligibilityView::from_result(&complete);
    assert!(view.certificate_eligible);
    assert_eq!(view.summary, "all 8 required semesters documented");
}

#[test]
fn failed_closed_eligibility_renders_the_fallback_summary() {
    let view = EligibilityView::from_result(&EligibilityResult::ineligible());

    assert!(!view.certificate_eligible);
    assert_eq!(view.summary, NOT_SPECIFIED_LABEL);
}

#[test]
fn window_views_carry_the_reason_and_next_date() {
    let denial = SubmissionWindowDecision::AlreadySubmitted {
        semester: 1,
        next_window_opens: Some(date(2025, 12, 1)),
    };
    let view = WindowView::from_decision(&denial);

    assert!(!view.allowed);
    assert!(view.message.contains("already submitted"));
    assert!(view.message.contains("2025-12-01"));
    assert_eq!(view.next_allowed_on, Some(date(2025, 12, 1)));

    let open = WindowView::from_decision(&SubmissionWindowDecision::Open { semester: 4 });
    assert!(open.allowed);
    assert_eq!(open.next_allowed_on, None);
}
