use chrono::NaiveDate;

use crate::error::EvalError;
use crate::localization::{
    Coordinates, HolidayCalendar, HolidayProvider, SolarProvider, SunriseSolar,
};
use crate::{date, datetime, Context};

#[test]
fn invalid_coordinates() {
    assert!(Coordinates::new(89.9, 179.9).is_some());
    assert!(Coordinates::new(-89.9, -179.9).is_some());
    assert!(Coordinates::new(90.1, 0.0).is_none());
    assert!(Coordinates::new(0.0, -180.1).is_none());
}

#[test]
fn sunrise_solar() {
    let coords = Coordinates::new(47.37, 8.54).unwrap();
    let (sunrise, sunset) = SunriseSolar.solar_times(date!("2024-12-21"), coords).unwrap();

    // Shortest day of the year in Zurich
    assert!(sunrise > datetime!("2024-12-21 07:00").and_utc());
    assert!(sunrise < datetime!("2024-12-21 07:30").and_utc());
    assert!(sunset > datetime!("2024-12-21 15:30").and_utc());
    assert!(sunset < datetime!("2024-12-21 16:00").and_utc());
}

#[test]
fn holiday_calendar() {
    let mut calendar = HolidayCalendar::new().with_region("FR", [date!("2024-05-01")]);
    assert!(calendar.insert("FR", date!("2024-07-14")));
    assert!(!calendar.insert("FR", date!("2024-05-01")));
    assert!(calendar.insert("BE", date!("2024-07-21")));

    let mut regions: Vec<_> = calendar.regions().collect();
    regions.sort_unstable();
    assert_eq!(regions, ["BE", "FR"]);

    assert_eq!(calendar.is_holiday(date!("2024-07-14"), "FR"), Ok(true));
    assert_eq!(calendar.is_holiday(date!("2024-07-14"), "BE"), Ok(false));
    assert_eq!(calendar.is_holiday(date!("2024-07-14"), "DE"), Err(EvalError::RegionUnresolved));
}

#[test]
fn closure_providers() {
    let weekends = |date: NaiveDate, _: &str| -> Result<bool, EvalError> {
        use chrono::Datelike;
        Ok(date.weekday().number_from_monday() >= 6)
    };

    assert_eq!(weekends.is_holiday(date!("2024-06-08"), "XX"), Ok(true));
    assert_eq!(weekends.is_holiday(date!("2024-06-10"), "XX"), Ok(false));
}

#[test]
fn context_requirements() {
    let ctx = Context::default();
    assert_eq!(ctx.solar_times(date!("2024-06-08")), Err(EvalError::LocationUnresolved));
    assert_eq!(ctx.is_holiday(date!("2024-06-08")), Err(EvalError::RegionUnresolved));

    // Region is known from context but not from the provider
    let ctx = ctx.with_region("FR");
    assert_eq!(ctx.is_holiday(date!("2024-06-08")), Err(EvalError::RegionUnresolved));

    let ctx = ctx.with_location(Coordinates::new(48.85, 2.35).unwrap());
    assert!(ctx.solar_times(date!("2024-06-08")).is_ok());
}

#[test]
fn context_debug() {
    let ctx = Context::default().with_region("CH-ZH");
    let debug = format!("{ctx:?}");
    assert!(debug.starts_with("Context {"));
    assert!(debug.contains("CH-ZH"));
}
