use chrono::{DateTime, NaiveDate, Utc};

use crate::error::EvalError;
use crate::localization::Coordinates;

/// Source for the times of sunrise and sunset.
///
/// Any function or closure with a matching signature can be used as a
/// provider, which is handy to get deterministic results:
///
/// ```
/// use chrono::{DateTime, NaiveDate, Utc};
/// use isopen::localization::{Coordinates, SolarProvider};
/// use isopen::EvalError;
///
/// let fixed = |date: NaiveDate, _: Coordinates| -> Result<_, EvalError> {
///     let sunrise = date.and_hms_opt(6, 0, 0).unwrap().and_utc();
///     let sunset = date.and_hms_opt(18, 0, 0).unwrap().and_utc();
///     Ok((sunrise, sunset))
/// };
///
/// let coords = Coordinates::new(47.5, 8.72).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let (sunrise, _) = fixed.solar_times(date, coords).unwrap();
/// assert_eq!(sunrise.to_string(), "2024-06-21 06:00:00 UTC");
/// ```
pub trait SolarProvider: Send + Sync {
    /// Get the times of sunrise and sunset at a date and location.
    fn solar_times(
        &self,
        date: NaiveDate,
        location: Coordinates,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), EvalError>;
}

impl<F> SolarProvider for F
where
    F: Fn(NaiveDate, Coordinates) -> Result<(DateTime<Utc>, DateTime<Utc>), EvalError>
        + Send
        + Sync,
{
    fn solar_times(
        &self,
        date: NaiveDate,
        location: Coordinates,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), EvalError> {
        self(date, location)
    }
}

/// Astronomical computation of sunrise and sunset.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct SunriseSolar;

impl SolarProvider for SunriseSolar {
    fn solar_times(
        &self,
        date: NaiveDate,
        location: Coordinates,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), EvalError> {
        Ok(location.sun_times(date))
    }
}
