use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::EvalError;

/// Source for public holidays of a region.
pub trait HolidayProvider: Send + Sync {
    /// Check if a date is a public holiday in given region.
    fn is_holiday(&self, date: NaiveDate, region: &str) -> Result<bool, EvalError>;
}

impl<F> HolidayProvider for F
where
    F: Fn(NaiveDate, &str) -> Result<bool, EvalError> + Send + Sync,
{
    fn is_holiday(&self, date: NaiveDate, region: &str) -> Result<bool, EvalError> {
        self(date, region)
    }
}

/// Explicit sets of public holidays, indexed by region.
///
/// Regions that were never registered are unresolved.
///
/// ```
/// use chrono::NaiveDate;
/// use isopen::localization::{HolidayCalendar, HolidayProvider};
/// use isopen::EvalError;
///
/// let national_day = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
/// let calendar = HolidayCalendar::new().with_region("CH", [national_day]);
///
/// assert_eq!(calendar.is_holiday(national_day, "CH"), Ok(true));
/// assert_eq!(calendar.is_holiday(national_day.succ_opt().unwrap(), "CH"), Ok(false));
/// assert_eq!(calendar.is_holiday(national_day, "FR"), Err(EvalError::RegionUnresolved));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    regions: HashMap<Arc<str>, BTreeSet<NaiveDate>>,
}

impl HolidayCalendar {
    /// Create a calendar that doesn't know about any region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region with its set of public holidays.
    pub fn with_region(
        mut self,
        region: impl Into<Arc<str>>,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        self.regions
            .entry(region.into())
            .or_default()
            .extend(dates);

        self
    }

    /// Add a public holiday to a region, registering the region if needed.
    /// Return `false` if the date was already a holiday.
    pub fn insert(&mut self, region: &str, date: NaiveDate) -> bool {
        self.regions.entry(region.into()).or_default().insert(date)
    }

    /// List all registered regions.
    pub fn regions(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions.keys().map(AsRef::as_ref)
    }
}

impl HolidayProvider for HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate, region: &str) -> Result<bool, EvalError> {
        self.regions
            .get(region)
            .map(|dates| dates.contains(&date))
            .ok_or(EvalError::RegionUnresolved)
    }
}
