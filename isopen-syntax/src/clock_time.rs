use std::convert::TryInto;
use std::fmt::{Debug, Display};

/// An hour+minute struct that can go up to *24:00*, the end of a day.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Start of the day, *00:00*.
    pub const MIDNIGHT_00: Self = Self { hour: 0, minute: 0 };

    /// End of the day, *24:00*.
    pub const MIDNIGHT_24: Self = Self { hour: 24, minute: 0 };

    /// Create a new clock time, this may return `None` if input values are out
    /// of range.
    ///
    /// ```
    /// use isopen_syntax::ClockTime;
    ///
    /// assert!(ClockTime::new(17, 45).is_some());
    /// assert!(ClockTime::new(24, 0).is_some());
    /// assert!(ClockTime::new(24, 1).is_none()); // past the end of the day
    /// assert!(ClockTime::new(12, 60).is_none()); // minutes are out of bound
    /// ```
    #[inline]
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 24 || minute > 59 || (hour == 24 && minute > 0) {
            None
        } else {
            Some(Self { hour, minute })
        }
    }

    /// Get the number of full hours in this clock time.
    #[inline]
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Get the number of remaining minutes in this clock time.
    #[inline]
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Get the total number of minutes from *00:00*.
    ///
    /// ```
    /// use isopen_syntax::ClockTime;
    ///
    /// let time = ClockTime::new(9, 33).unwrap();
    /// assert_eq!(time.mins_from_midnight(), 9 * 60 + 33);
    /// assert_eq!(ClockTime::MIDNIGHT_24.mins_from_midnight(), 24 * 60);
    /// ```
    #[inline]
    pub fn mins_from_midnight(self) -> u16 {
        u16::from(self.minute) + 60 * u16::from(self.hour)
    }

    /// Build a clock time from the total number of minutes from midnight and
    /// return `None` if the result is out of bounds.
    ///
    /// ```
    /// use isopen_syntax::ClockTime;
    ///
    /// assert_eq!(ClockTime::from_mins_from_midnight(17 * 60 + 45), ClockTime::new(17, 45));
    /// assert!(ClockTime::from_mins_from_midnight(24 * 60 + 1).is_none());
    /// ```
    #[inline]
    pub fn from_mins_from_midnight(minute: u16) -> Option<Self> {
        let hour = (minute / 60).try_into().ok()?;
        let minute = (minute % 60).try_into().ok()?;
        Self::new(hour, minute)
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Debug for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{self}")
    }
}
