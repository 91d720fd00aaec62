//! Pure date arithmetic mapping calendar dates onto a program's academic
//! calendar. This is the single home for semester math; callers must not
//! reimplement it.
//!
//! The academic year runs June through May. June-November is the first
//! semester of an academic year, December-May the second.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::term::{ProgramTerm, TermParseError};

/// First month of the academic year (June).
pub const ACADEMIC_YEAR_START_MONTH: u32 = 6;
/// First month of the second semester within an academic year (December).
pub const SECOND_SEMESTER_START_MONTH: u32 = 12;

/// Resolved position within a program for a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum AcademicStanding {
    /// The date falls before the program's first academic year.
    NotStarted,
    /// Actively enrolled. `semester` counts across the whole program
    /// (1-based), `semester_in_year` is 1 or 2.
    Enrolled {
        year: u16,
        semester_in_year: u16,
        semester: u16,
    },
    /// The date falls after the program's last academic year.
    Graduated,
    /// Sentinel for an unparseable enrollment span; always renderable,
    /// never an error.
    Unknown,
}

impl AcademicStanding {
    pub fn year_in_program(&self) -> Option<u16> {
        match self {
            AcademicStanding::Enrolled { year, .. } => Some(*year),
            _ => None,
        }
    }

    pub fn semester_in_program(&self) -> Option<u16> {
        match self {
            AcademicStanding::Enrolled { semester, .. } => Some(*semester),
            _ => None,
        }
    }

    pub fn is_enrolled(&self) -> bool {
        matches!(self, AcademicStanding::Enrolled { .. })
    }
}

/// The upcoming semester and the calendar date its window opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextSemester {
    pub semester: u16,
    pub opens_on: NaiveDate,
}

/// Deterministic resolver from dates to academic standings for one term.
#[derive(Debug, Clone, Copy)]
pub struct AcademicCalendar {
    term: ProgramTerm,
}

impl AcademicCalendar {
    pub fn new(term: ProgramTerm) -> Self {
        Self { term }
    }

    pub fn from_display(raw: &str) -> Result<Self, TermParseError> {
        ProgramTerm::parse_display(raw).map(Self::new)
    }

    pub fn term(&self) -> ProgramTerm {
        self.term
    }

    /// Resolve the standing for `on`. Out-of-range dates are normal
    /// outcomes (`NotStarted`/`Graduated`), not errors.
    pub fn standing_on(&self, on: NaiveDate) -> AcademicStanding {
        let year_offset = academic_start_year(on) - self.term.start_year() + 1;

        if year_offset < 1 {
            return AcademicStanding::NotStarted;
        }
        if year_offset > i32::from(self.term.total_years()) {
            return AcademicStanding::Graduated;
        }

        let year = year_offset as u16;
        let semester_in_year = semester_in_year(on);
        AcademicStanding::Enrolled {
            year,
            semester_in_year,
            semester: (year - 1) * 2 + semester_in_year,
        }
    }

    /// Overall semester number for `on`, when enrolled.
    pub fn semester_on(&self, on: NaiveDate) -> Option<u16> {
        self.standing_on(on).semester_in_program()
    }

    /// The semester after the one containing `on`, with its opening date.
    /// `None` when `on` is outside the program or already in the final
    /// semester.
    pub fn next_semester(&self, on: NaiveDate) -> Option<NextSemester> {
        let (semester_in_year, semester) = match self.standing_on(on) {
            AcademicStanding::Enrolled {
                semester_in_year,
                semester,
                ..
            } => (semester_in_year, semester),
            _ => return None,
        };

        let next = semester + 1;
        if next > self.term.total_semesters() {
            return None;
        }

        let opens_on = if semester_in_year == 1 {
            NaiveDate::from_ymd_opt(on.year(), SECOND_SEMESTER_START_MONTH, 1)?
        } else {
            // A December date already sits in the semester that runs into
            // the next calendar year, so its June belongs to that year too.
            let year = if on.month() == 12 {
                on.year() + 1
            } else {
                on.year()
            };
            NaiveDate::from_ymd_opt(year, ACADEMIC_YEAR_START_MONTH, 1)?
        };

        Some(NextSemester {
            semester: next,
            opens_on,
        })
    }
}

/// Resolve a raw enrollment span, degrading to the `Unknown` sentinel so
/// presentation layers always have something to render.
pub fn standing_for_display(raw: &str, on: NaiveDate) -> AcademicStanding {
    match AcademicCalendar::from_display(raw) {
        Ok(calendar) => calendar.standing_on(on),
        Err(_) => AcademicStanding::Unknown,
    }
}

fn academic_start_year(on: NaiveDate) -> i32 {
    if on.month() >= ACADEMIC_YEAR_START_MONTH {
        on.year()
    } else {
        on.year() - 1
    }
}

fn semester_in_year(on: NaiveDate) -> u16 {
    if (ACADEMIC_YEAR_START_MONTH..SECOND_SEMESTER_START_MONTH).contains(&on.month()) {
        1
    } else {
        2
    }
}
