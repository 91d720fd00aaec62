//! Academic progress tracking engine.
//!
//! Resolves a student's position in the academic calendar from their
//! enrollment span, evaluates certificate eligibility from recorded progress
//! submissions, and gates new submissions to one per semester.

pub mod academics;
pub mod config;
pub mod error;
pub mod telemetry;
