use std::collections::BTreeSet;

use super::common::*;
use crate::academics::calendar::AcademicStanding;
use crate::academics::eligibility::EligibilityEvaluator;
use crate::academics::window::{SubmissionWindowDecision, SubmissionWindowGuard};

fn guard() -> SubmissionWindowGuard {
    SubmissionWindowGuard::new(term())
}

fn covered(semesters: &[u16]) -> BTreeSet<u16> {
    semesters.iter().copied().collect()
}

#[test]
fn window_is_open_for_an_undocumented_semester() {
    let decision = guard().decide(date(2025, 7, 15), &covered(&[]));

    assert_eq!(decision, SubmissionWindowDecision::Open { semester: 1 });
    assert!(decision.allowed());
    assert_eq!(decision.reason(), None);
    assert_eq!(decision.next_allowed(), None);
}

#[test]
fn duplicate_semester_is_denied_with_the_next_window_date() {
    let decision = guard().decide(date(2025, 7, 15), &covered(&[1]));

    match &decision {
        SubmissionWindowDecision::AlreadySubmitted {
            semester,
            next_window_opens,
        } => {
            assert_eq!(*semester, 1);
            assert_eq!(*next_window_opens, Some(date(2025, 12, 1)));
        }
        other => panic!("expected duplicate denial, got {other:?}"),
    }
    assert!(!decision.allowed());
    assert_eq!(decision.reason(), Some("already submitted for this semester"));
    assert_eq!(decision.next_allowed(), Some(date(2025, 12, 1)));
}

#[test]
fn duplicate_in_december_points_to_next_june() {
    let decision = guard().decide(date(2025, 12, 15), &covered(&[2]));

    assert_eq!(decision.next_allowed(), Some(date(2026, 6, 1)));
}

#[test]
fn duplicate_in_the_final_semester_has_no_next_window() {
    let decision = guard().decide(date(2029, 1, 15), &covered(&[8]));

    match decision {
        SubmissionWindowDecision::AlreadySubmitted {
            next_window_opens, ..
        } => assert_eq!(next_window_opens, None),
        other => panic!("expected duplicate denial, got {other:?}"),
    }
}

#[test]
fn complete_program_is_denied_with_a_distinct_reason() {
    let all = covered(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let decision = guard().decide(date(2029, 1, 15), &all);

    assert_eq!(
        decision,
        SubmissionWindowDecision::ProgramComplete {
            required_semesters: 8
        }
    );
    assert_eq!(
        decision.reason(),
        Some("all required submissions completed")
    );
    assert_ne!(
        decision.reason(),
        SubmissionWindowDecision::AlreadySubmitted {
            semester: 8,
            next_window_opens: None,
        }
        .reason()
    );
}

#[test]
fn attempts_outside_the_program_are_denied_without_a_date() {
    let before = guard().decide(date(2024, 1, 1), &covered(&[]));
    assert_eq!(
        before,
        SubmissionWindowDecision::OutsideProgram {
            standing: AcademicStanding::NotStarted
        }
    );
    assert_eq!(before.reason(), Some("outside active program period"));
    assert_eq!(before.next_allowed(), None);

    let after = guard().decide(date(2030, 1, 1), &covered(&[1, 2]));
    assert_eq!(
        after,
        SubmissionWindowDecision::OutsideProgram {
            standing: AcademicStanding::Graduated
        }
    );
}

#[test]
fn guard_agrees_with_the_evaluator_on_covered_semesters() {
    let evaluator = EligibilityEvaluator::new(term());
    let history = vec![submission(2025, 7, 1), submission(2026, 1, 10)];
    let covered = evaluator.covered_semesters(&history);

    let decision = guard().decide(date(2026, 1, 20), &covered);
    assert!(matches!(
        decision,
        SubmissionWindowDecision::AlreadySubmitted { semester: 2, .. }
    ));

    let decision = guard().decide(date(2026, 7, 1), &covered);
    assert_eq!(decision, SubmissionWindowDecision::Open { semester: 3 });
}
