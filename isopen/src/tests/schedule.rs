use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::error::{EvalError, ParserError};
use crate::localization::{Coordinates, HolidayCalendar};
use crate::{date, datetime, Context, RuleKind, Schedule, TimeRule, Timeslot};

fn utc(date: &str) -> DateTime<Utc> {
    datetime!(date).and_utc()
}

#[test]
fn always_open() -> Result<(), ParserError> {
    let schedule = Schedule::parse("24/7")?;
    let window = utc("2024-06-03 10:00")..utc("2024-06-04 10:00");

    assert_eq!(schedule.intervals(window.clone()), Ok(vec![window]));
    assert_eq!(schedule.is_open_at(utc("1970-01-01 00:00")), Ok(true));
    assert_eq!(schedule.is_open_now(), Ok(true));
    assert_eq!(schedule.open_intervals_24h().map(|open| open.len()), Ok(1));
    Ok(())
}

#[test]
fn always_open_but_sunday() -> Result<(), ParserError> {
    let schedule = Schedule::parse("24/7; Su off")?;

    for day in 0..30 {
        let start = utc("2024-06-01 13:37") + Duration::days(day);
        let open = schedule.intervals(start..start + Duration::days(1)).unwrap();
        assert!(!open.is_empty());
        assert!(open.len() <= 2);
    }

    assert_eq!(schedule.is_open_at(utc("2024-06-01 23:59")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-06-02 00:00")), Ok(false));
    assert_eq!(schedule.is_open_at(utc("2024-06-02 23:59")), Ok(false));
    assert_eq!(schedule.is_open_at(utc("2024-06-03 00:00")), Ok(true));
    Ok(())
}

#[test]
fn closed_rules_take_precedence() -> Result<(), ParserError> {
    let expected = vec![
        utc("2024-06-03 08:00")..utc("2024-06-03 12:00"),
        utc("2024-06-03 13:00")..utc("2024-06-03 20:00"),
    ];

    let window = utc("2024-06-03 00:00")..utc("2024-06-04 00:00");

    for raw in [
        "Mo 08:00-20:00; Mo 12:00-13:00 off",
        "Mo 12:00-13:00 off; Mo 08:00-20:00",
        "Mo 12:00-13:00 closed; Mo 08:00-20:00 open",
    ] {
        let schedule = Schedule::parse(raw)?;
        assert_eq!(schedule.intervals(window.clone()), Ok(expected.clone()));
    }

    Ok(())
}

#[test]
fn half_open_intervals() -> Result<(), ParserError> {
    let schedule = Schedule::parse("Mo 08:00-12:00")?;
    assert_eq!(schedule.is_open_at(utc("2024-06-03 07:59")), Ok(false));
    assert_eq!(schedule.is_open_at(utc("2024-06-03 08:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-06-03 11:59")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-06-03 12:00")), Ok(false));

    let last_second = utc("2024-06-03 12:00") - Duration::seconds(1);
    assert_eq!(schedule.is_open_at(last_second), Ok(true));
    Ok(())
}

#[test]
fn day_crossing_range() -> Result<(), ParserError> {
    let schedule = Schedule::parse("Fr-Sa 22:00-03:00")?;
    let window = utc("2024-06-03 00:00")..utc("2024-06-10 00:00");

    assert_eq!(
        schedule.intervals(window),
        Ok(vec![
            utc("2024-06-07 22:00")..utc("2024-06-08 03:00"),
            utc("2024-06-08 22:00")..utc("2024-06-09 03:00"),
        ]),
    );

    assert_eq!(schedule.is_open_at(utc("2024-06-09 02:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-06-09 22:00")), Ok(false));
    Ok(())
}

#[test]
fn several_spans() -> Result<(), ParserError> {
    let schedule = Schedule::parse("Mo-Fr 08:00-12:00,14:00-18:00; We 14:00-18:00 off")?;
    let window = utc("2024-06-03 00:00")..utc("2024-06-10 00:00");
    let open = schedule.intervals(window).unwrap();

    assert_eq!(open.len(), 9);
    assert_eq!(open[4], utc("2024-06-05 08:00")..utc("2024-06-05 12:00"));
    assert_eq!(open[5], utc("2024-06-06 08:00")..utc("2024-06-06 12:00"));
    Ok(())
}

#[test]
fn months_and_days() -> Result<(), ParserError> {
    let schedule = Schedule::parse("Dec 10:00-18:00; Dec 24-26 off; Dec 31 10:00-14:00 off")?;

    assert_eq!(schedule.is_open_at(utc("2024-12-23 12:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-12-25 12:00")), Ok(false));
    assert_eq!(schedule.is_open_at(utc("2024-12-31 12:00")), Ok(false));
    assert_eq!(schedule.is_open_at(utc("2024-12-31 15:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2025-01-02 12:00")), Ok(false));
    Ok(())
}

#[test]
fn timezone() -> Result<(), ParserError> {
    let ctx = Context::default().with_timezone(FixedOffset::west_opt(5 * 3600).unwrap());
    let schedule = Schedule::parse("Mo 20:00-23:00")?.with_context(ctx);

    assert_eq!(schedule.is_open_at(utc("2024-06-03 21:00")), Ok(false));
    assert_eq!(schedule.is_open_at(utc("2024-06-04 01:00")), Ok(true));
    Ok(())
}

#[test]
fn holidays() {
    let ctx = Context::default()
        .with_holiday_provider(HolidayCalendar::new().with_region("FR", [date!("2024-07-14")]))
        .with_region("FR");

    let schedule = Schedule::from_rules([
        TimeRule::new(Timeslot::Always, RuleKind::Open),
        TimeRule::new(Timeslot::Holiday, RuleKind::Closed),
    ]);

    assert_eq!(
        schedule.is_open_at(utc("2024-07-14 12:00")),
        Err(EvalError::RegionUnresolved),
    );

    let schedule = schedule.with_context(ctx);
    assert_eq!(schedule.is_open_at(utc("2024-07-13 12:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-07-14 12:00")), Ok(false));
}

#[test]
fn display() -> Result<(), ParserError> {
    let schedule = Schedule::parse("Mo-We 10:00-12:00; Su 22:00-01:00 off")?;

    assert_eq!(
        schedule.to_string(),
        "Mo 10:00-12:00; Tu 10:00-12:00; We 10:00-12:00; Su 22:00-24:00 off; Mo 00:00-01:00 off",
    );

    let reparsed = Schedule::from_str(&schedule.to_string())?;
    assert_eq!(reparsed.rules(), schedule.rules());
    Ok(())
}

#[test]
fn parse_errors() {
    assert!(matches!(
        Schedule::parse("Mo-Fr 08:00"),
        Err(ParserError::MalformedClause { .. }),
    ));

    assert!(matches!(
        "Mon 08:00-12:00".parse::<Schedule>(),
        Err(ParserError::UnknownAbbreviation { .. }),
    ));

    assert!(matches!(
        Schedule::parse("24/7; PH off"),
        Err(ParserError::UnsupportedConstruct { .. }),
    ));
}

#[test]
fn last_updated() -> Result<(), ParserError> {
    let before = Utc::now();
    let schedule = Schedule::parse("24/7")?;
    assert!(schedule.last_updated() >= before);
    assert!(schedule.last_updated() <= Utc::now());

    // Cloning or changing context doesn't refresh rules
    let copy = schedule.clone().with_context(Context::default());
    assert_eq!(copy.last_updated(), schedule.last_updated());
    Ok(())
}

#[test]
fn shared_between_threads() -> Result<(), ParserError> {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let schedule = Schedule::parse("Mo-Fr 08:00-18:00")?;
    assert_send_sync(&schedule);

    std::thread::scope(|scope| {
        for day in 0..4 {
            let schedule = &schedule;

            scope.spawn(move || {
                let time = utc("2024-06-03 12:00") + Duration::days(day);
                assert_eq!(schedule.is_open_at(time), Ok(true));
            });
        }
    });

    Ok(())
}

#[test]
fn deterministic() -> Result<(), ParserError> {
    let raw = "Tu-Fr 09:00-17:00; Sa 10:00-02:00; Aug off; Aug 15 11:00-13:00";
    let window = utc("2024-07-20 00:00")..utc("2024-09-10 00:00");
    let first = Schedule::parse(raw)?.intervals(window.clone());
    let second = Schedule::parse(raw)?.intervals(window);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn month_day_crossing_midnight() -> Result<(), ParserError> {
    let schedule = Schedule::parse("Jan 17-23 22:00-02:00")?;
    assert_eq!(schedule.is_open_at(utc("2024-01-17 01:00")), Ok(false));
    assert_eq!(schedule.is_open_at(utc("2024-01-17 23:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-01-24 01:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-01-24 02:00")), Ok(false));
    Ok(())
}

#[test]
fn midnight_sun() -> Result<(), ParserError> {
    let ctx = Context::default().with_location(Coordinates::new(69.65, 18.96).unwrap());
    let schedule = Schedule::parse("sunrise-sunset")?.with_context(ctx);
    assert_eq!(schedule.is_open_at(utc("2024-06-21 12:00")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-06-21 23:30")), Ok(true));
    assert_eq!(schedule.is_open_at(utc("2024-12-21 12:00")), Ok(false));
    Ok(())
}

#[test]
fn end_of_time() -> Result<(), ParserError> {
    let last_minute = DateTime::<Utc>::MAX_UTC - Duration::seconds(30);
    assert_eq!(Schedule::parse("24/7")?.is_open_at(last_minute), Ok(true));
    assert!(Schedule::parse("24/7")?.is_open_at(DateTime::<Utc>::MAX_UTC).is_ok());
    assert!(Schedule::parse("24/7; Su off")?.is_open_at(last_minute).is_ok());
    Ok(())
}
