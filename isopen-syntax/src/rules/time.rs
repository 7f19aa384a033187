use std::fmt::Display;

use crate::clock_time::ClockTime;

// TimeSpan

/// A continuous range of clock times starting on a given day.
///
/// Spans of weekday rules never wrap past midnight: a range such as
/// *22:00-02:00* is split into two weekday rules by the parser. Month rules
/// keep a day-crossing span, which ends on the day following each date of
/// the month.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TimeSpan {
    start: ClockTime,
    end: ClockTime,
}

impl TimeSpan {
    /// The whole day, from *00:00* to *24:00*.
    pub const FULL_DAY: Self = Self {
        start: ClockTime::MIDNIGHT_00,
        end: ClockTime::MIDNIGHT_24,
    };

    /// Create a new span, returning `None` if it would end before it starts.
    ///
    /// ```
    /// use isopen_syntax::ClockTime;
    /// use isopen_syntax::rules::time::TimeSpan;
    ///
    /// let eight = ClockTime::new(8, 0).unwrap();
    /// let noon = ClockTime::new(12, 0).unwrap();
    /// assert!(TimeSpan::new(eight, noon).is_some());
    /// assert!(TimeSpan::new(noon, eight).is_none());
    /// ```
    #[inline]
    pub fn new(start: ClockTime, end: ClockTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Create a span that may cross midnight, ending the following day if
    /// `end` is before `start`.
    ///
    /// ```
    /// use isopen_syntax::ClockTime;
    /// use isopen_syntax::rules::time::TimeSpan;
    ///
    /// let late = ClockTime::new(22, 0).unwrap();
    /// let early = ClockTime::new(2, 0).unwrap();
    /// assert!(TimeSpan::new_wrapping(late, early).is_day_crossing());
    /// assert!(!TimeSpan::new_wrapping(early, late).is_day_crossing());
    /// ```
    #[inline]
    pub fn new_wrapping(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Create a span from a given time to the end of the day.
    #[inline]
    pub fn until_midnight(start: ClockTime) -> Self {
        Self { start, end: ClockTime::MIDNIGHT_24 }
    }

    /// Create a span from the start of the day to a given time.
    #[inline]
    pub fn since_midnight(end: ClockTime) -> Self {
        Self { start: ClockTime::MIDNIGHT_00, end }
    }

    #[inline]
    pub fn start(self) -> ClockTime {
        self.start
    }

    #[inline]
    pub fn end(self) -> ClockTime {
        self.end
    }

    /// Check if this span ends on the following day.
    #[inline]
    pub fn is_day_crossing(self) -> bool {
        self.end < self.start
    }

    /// Check if this span covers the whole day.
    #[inline]
    pub fn is_full_day(self) -> bool {
        self == Self::FULL_DAY
    }
}

impl Default for TimeSpan {
    #[inline]
    fn default() -> Self {
        Self::FULL_DAY
    }
}

impl Display for TimeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
