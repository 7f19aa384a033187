use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use sunrise::{SolarDay, SolarEvent};

/// A valid pair of geographic coordinates.
///
/// See https://en.wikipedia.org/wiki/Geographic_coordinate_system
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Coordinates(sunrise::Coordinates);

impl Coordinates {
    /// Validate a pair of latitude / longitude.
    ///
    /// Return `None` if values are out of range (`abs(lat) > 90` or
    /// `abs(lon) > 180`).
    ///
    /// ```
    /// use isopen::localization::Coordinates;
    ///
    /// assert!(Coordinates::new(47.5, 8.72).is_some());
    /// assert!(Coordinates::new(91.0, 8.72).is_none());
    /// ```
    pub const fn new(lat: f64, lon: f64) -> Option<Self> {
        match sunrise::Coordinates::new(lat, lon) {
            Some(c) => Some(Self(c)),
            None => None,
        }
    }

    /// Get the times of sunrise and sunset at a given date.
    ///
    /// When the sun doesn't cross the horizon, the whole UTC day is returned
    /// for a polar day and an empty period at midnight for a polar night.
    ///
    /// ```
    /// use chrono::{Duration, NaiveDate};
    /// use isopen::localization::Coordinates;
    ///
    /// let tromso = Coordinates::new(69.65, 18.96).unwrap();
    /// let summer = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
    /// let winter = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
    ///
    /// let (sunrise, sunset) = tromso.sun_times(summer);
    /// assert_eq!(sunset - sunrise, Duration::days(1));
    ///
    /// let (sunrise, sunset) = tromso.sun_times(winter);
    /// assert_eq!(sunrise, sunset);
    /// ```
    pub fn sun_times(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let solar_day = SolarDay::new(self.0, date);
        let sunrise = solar_day.event_time(SolarEvent::Sunrise);
        let sunset = solar_day.event_time(SolarEvent::Sunset);

        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let is_near_date = |time: DateTime<Utc>| (time - midnight).num_days().abs() <= 1;

        if sunrise < sunset && is_near_date(sunrise) && is_near_date(sunset) {
            return (sunrise, sunset);
        }

        if self.is_polar_day(date) {
            let next_midnight = midnight
                .checked_add_signed(Duration::days(1))
                .unwrap_or(DateTime::<Utc>::MAX_UTC);

            (midnight, next_midnight)
        } else {
            (midnight, midnight)
        }
    }

    /// On a day the sun neither rises nor sets, check if it stays above the
    /// horizon. The sun is above the hemisphere matching the sign of its
    /// declination.
    fn is_polar_day(&self, date: NaiveDate) -> bool {
        let year_angle = 2.0 * PI * f64::from(date.ordinal0() + 10) / 365.0;
        let declination = -23.44 * year_angle.cos();
        self.lat() * declination > 0.0
    }

    /// Get latitude component.
    pub fn lat(&self) -> f64 {
        self.0.lat()
    }

    /// Get longitude component.
    pub fn lon(&self) -> f64 {
        self.0.lon()
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat(), self.lon())
    }
}
