use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Calendar-year span of a student's enrollment, e.g. `"2025 - 2029"`.
///
/// The span is half-open in academic terms: a 2025-2029 enrollment covers
/// four academic years (the `- 2029` bound names the graduation year, not a
/// fifth year of study).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramTerm {
    start_year: i32,
    end_year: i32,
}

/// Errors raised while reading an enrollment span display string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermParseError {
    #[error("enrollment span '{0}' is missing the year separator")]
    MissingSeparator(String),
    #[error("enrollment span year '{0}' is not a number")]
    InvalidYear(String),
    #[error("enrollment year {0} is outside the supported range")]
    YearOutOfRange(i32),
    #[error("enrollment span ends in {end}, on or before its {start} start")]
    EmptySpan { start: i32, end: i32 },
}

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

impl ProgramTerm {
    pub fn new(start_year: i32, end_year: i32) -> Result<Self, TermParseError> {
        for year in [start_year, end_year] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(TermParseError::YearOutOfRange(year));
            }
        }

        if end_year <= start_year {
            return Err(TermParseError::EmptySpan {
                start: start_year,
                end: end_year,
            });
        }

        Ok(Self {
            start_year,
            end_year,
        })
    }

    /// Parse the profile-service display form `"<start> - <end>"`.
    pub fn parse_display(raw: &str) -> Result<Self, TermParseError> {
        let trimmed = raw.trim();
        let (start, end) = trimmed
            .split_once('-')
            .ok_or_else(|| TermParseError::MissingSeparator(trimmed.to_string()))?;

        let start_year = parse_year(start)?;
        let end_year = parse_year(end)?;
        Self::new(start_year, end_year)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Length of the program in academic years: `end - start`, no `+1`.
    pub fn total_years(&self) -> u16 {
        (self.end_year - self.start_year) as u16
    }

    pub fn total_semesters(&self) -> u16 {
        self.total_years() * 2
    }
}

fn parse_year(part: &str) -> Result<i32, TermParseError> {
    let cleaned = part.trim();
    cleaned
        .parse::<i32>()
        .map_err(|_| TermParseError::InvalidYear(cleaned.to_string()))
}

impl fmt::Display for ProgramTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_year, self.end_year)
    }
}

impl FromStr for ProgramTerm {
    type Err = TermParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse_display(raw)
    }
}
