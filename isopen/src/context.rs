use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::EvalError;
use crate::localization::{
    Coordinates, HolidayCalendar, HolidayProvider, SolarProvider, SunriseSolar,
};
use crate::utils::dates::localize_next_valid;

/// All the context attached to a schedule and that can alter its evaluation
/// semantics.
///
/// Clock times written in rules are interpreted in the timezone of the
/// context, while resolved intervals are always expressed in UTC.
///
/// ```
/// use std::sync::Arc;
///
/// use chrono::NaiveDate;
/// use isopen::localization::{Coordinates, HolidayCalendar};
/// use isopen::Context;
///
/// let holidays = HolidayCalendar::new()
///     .with_region("CH-ZH", [NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()]);
///
/// let ctx = Context::default()
///     .with_timezone(chrono::FixedOffset::east_opt(3600).unwrap())
///     .with_location(Coordinates::new(47.5, 8.72).unwrap())
///     .with_region("CH-ZH")
///     .with_holiday_provider(holidays);
///
/// assert_eq!(ctx.region.as_deref(), Some("CH-ZH"));
/// ```
#[derive(Clone)]
pub struct Context<Tz: TimeZone = Utc> {
    /// Timezone of the clock times written in rules
    pub timezone: Tz,
    /// Position used to compute sunrise and sunset
    pub location: Option<Coordinates>,
    /// Region used to look for public holidays
    pub region: Option<Arc<str>>,
    pub(crate) solar: Arc<dyn SolarProvider>,
    pub(crate) holidays: Arc<dyn HolidayProvider>,
}

impl<Tz: TimeZone> Context<Tz> {
    /// Interpret clock times of the rules in a new timezone.
    pub fn with_timezone<Tz2: TimeZone>(self, timezone: Tz2) -> Context<Tz2> {
        Context {
            timezone,
            location: self.location,
            region: self.region,
            solar: self.solar,
            holidays: self.holidays,
        }
    }

    /// Attach a location, required to evaluate sunrise and sunset.
    pub fn with_location(self, location: Coordinates) -> Self {
        Self { location: Some(location), ..self }
    }

    /// Attach a region, required to evaluate public holidays.
    pub fn with_region(self, region: impl Into<Arc<str>>) -> Self {
        Self { region: Some(region.into()), ..self }
    }

    /// Replace the source of sunrise and sunset times.
    pub fn with_solar_provider(self, solar: impl SolarProvider + 'static) -> Self {
        Self { solar: Arc::new(solar), ..self }
    }

    /// Replace the source of public holidays.
    pub fn with_holiday_provider(self, holidays: impl HolidayProvider + 'static) -> Self {
        Self { holidays: Arc::new(holidays), ..self }
    }

    pub(crate) fn solar_times(
        &self,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), EvalError> {
        let Some(location) = self.location else {
            #[cfg(feature = "log")]
            log::debug!("Sunrise and sunset requested for {date} with no location");
            return Err(EvalError::LocationUnresolved);
        };

        self.solar.solar_times(date, location)
    }

    pub(crate) fn is_holiday(&self, date: NaiveDate) -> Result<bool, EvalError> {
        let Some(region) = self.region.as_deref() else {
            #[cfg(feature = "log")]
            log::debug!("Holidays requested for {date} with no region");
            return Err(EvalError::RegionUnresolved);
        };

        self.holidays.is_holiday(date, region)
    }

    /// Convert a local datetime into UTC.
    pub(crate) fn utc(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        localize_next_valid(naive, &self.timezone)
    }
}

impl Default for Context<Utc> {
    fn default() -> Self {
        Self {
            timezone: Utc,
            location: None,
            region: None,
            solar: Arc::new(SunriseSolar),
            holidays: Arc::new(HolidayCalendar::default()),
        }
    }
}

impl<Tz: TimeZone + Debug> Debug for Context<Tz> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("timezone", &self.timezone)
            .field("location", &self.location)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
