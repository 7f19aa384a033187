pub mod time;

use std::fmt::Display;

use chrono::{Month, Weekday};

use crate::parser::{month_abbreviation, weekday_abbreviation};

pub use time::TimeSpan;

// TimeRule

/// A single parsed clause, or one of the rules a clause expanded to.
///
/// Each rule denotes one continuous interval per occurrence of its timeslot
/// and either adds open time or removes it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TimeRule {
    pub slot: Timeslot,
    pub kind: RuleKind,
}

impl TimeRule {
    #[inline]
    pub fn new(slot: Timeslot, kind: RuleKind) -> Self {
        Self { slot, kind }
    }

    /// Check if this rule adds open time, as opposed to closing periods
    /// opened by other rules.
    ///
    /// ```
    /// use isopen_syntax::parse;
    ///
    /// let rules = parse("24/7; Su off").unwrap();
    /// assert!(rules[0].is_positive());
    /// assert!(!rules[1].is_positive());
    /// ```
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.kind == RuleKind::Open
    }
}

impl Display for TimeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slot)?;

        if self.kind == RuleKind::Closed {
            write!(f, " off")?;
        }

        Ok(())
    }
}

// Timeslot

/// When a rule applies, resolved against actual dates at evaluation.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Timeslot {
    /// Every day, all day.
    Always,
    /// From sunrise to sunset, every day.
    SunriseSunset,
    /// Every occurrence of a weekday.
    Weekday { weekday: Weekday, span: TimeSpan },
    /// Every day of a month, a day-crossing span continues on the next day.
    Month { month: Month, span: TimeSpan },
    /// A single day of a month, every year.
    MonthDay { month: Month, day: u8, span: TimeSpan },
    /// All day, on public holidays.
    Holiday,
}

impl Display for Timeslot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let span = match self {
            Self::Always => return write!(f, "24/7"),
            Self::SunriseSunset => return write!(f, "sunrise-sunset"),
            Self::Holiday => return write!(f, "PH"),
            Self::Weekday { weekday, span } => {
                write!(f, "{}", weekday_abbreviation(*weekday))?;
                span
            }
            Self::Month { month, span } => {
                write!(f, "{}", month_abbreviation(*month))?;
                span
            }
            Self::MonthDay { month, day, span } => {
                write!(f, "{} {day}", month_abbreviation(*month))?;
                span
            }
        };

        if !span.is_full_day() {
            write!(f, " {span}")?;
        }

        Ok(())
    }
}

// RuleKind

#[derive(Copy, Clone, Debug, Default, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum RuleKind {
    #[default]
    Open,
    Closed,
}
