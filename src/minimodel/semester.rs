use std::fmt;

use chrono::NaiveDate;

/// One of the two halves of a Gemini observing year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SemesterHalf {
    A,
    B,
}

impl SemesterHalf {
    pub fn start_month(self) -> u32 {
        match self {
            SemesterHalf::A => 2,
            SemesterHalf::B => 8,
        }
    }

    pub fn end_month(self) -> u32 {
        match self {
            SemesterHalf::A => 7,
            SemesterHalf::B => 1,
        }
    }
}

/// A period for which programs are submitted, e.g. `2018B`.
///
/// Semester B ends in January of the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Semester {
    pub year: i32,
    pub half: SemesterHalf,
}

impl Semester {
    pub fn new(year: i32, half: SemesterHalf) -> Self {
        Self { year, half }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.half.start_month(), 1)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        let year = match self.half {
            SemesterHalf::A => self.year,
            SemesterHalf::B => self.year + 1,
        };
        NaiveDate::from_ymd_opt(year, self.half.end_month(), 31)
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.year, self.half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_year_and_half() {
        assert_eq!(Semester::new(2018, SemesterHalf::B).to_string(), "2018B");
    }

    #[test]
    fn a_runs_february_to_july() {
        let s = Semester::new(2020, SemesterHalf::A);
        assert_eq!(s.start_date(), NaiveDate::from_ymd_opt(2020, 2, 1));
        assert_eq!(s.end_date(), NaiveDate::from_ymd_opt(2020, 7, 31));
    }

    #[test]
    fn b_ends_next_january() {
        let s = Semester::new(2020, SemesterHalf::B);
        assert_eq!(s.start_date(), NaiveDate::from_ymd_opt(2020, 8, 1));
        assert_eq!(s.end_date(), NaiveDate::from_ymd_opt(2021, 1, 31));
    }

    #[test]
    fn semesters_order_chronologically() {
        assert!(Semester::new(2018, SemesterHalf::B) < Semester::new(2019, SemesterHalf::A));
        assert!(Semester::new(2019, SemesterHalf::A) < Semester::new(2019, SemesterHalf::B));
    }
}
