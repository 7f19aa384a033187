//! Resolution of rules into concrete intervals of time.

use std::ops::Range;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use isopen_syntax::rules::{TimeRule, TimeSpan, Timeslot};

use crate::context::Context;
use crate::error::EvalError;
use crate::interval::{range_intersection, ResolvedInterval};
use crate::utils::dates::local_dates;

/// Compute the intervals of time denoted by a rule inside of a window.
///
/// A day-crossing span of a month rule yields a single interval running
/// from its start on a date of the month to its end on the following day.
///
/// Intervals are sorted and clipped to the window. Only the days of the
/// window are visited, plus the day before it when a span may spill over
/// midnight, so a caller interested in a distant answer must supply a window
/// wide enough to contain it.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use isopen::{resolve, Context};
///
/// let rules = isopen_syntax::parse("Mo 08:00-12:00").unwrap();
/// let monday = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
/// let window = monday..monday + chrono::Duration::days(7);
///
/// let intervals = resolve(&rules[0], window, &Context::default()).unwrap();
/// assert_eq!(intervals.len(), 1);
/// assert_eq!(intervals[0].start, Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap());
/// ```
pub fn resolve<Tz: TimeZone>(
    rule: &TimeRule,
    window: Range<DateTime<Utc>>,
    ctx: &Context<Tz>,
) -> Result<Vec<ResolvedInterval>, EvalError> {
    if window.start >= window.end {
        return Ok(Vec::new());
    }

    if rule.slot == Timeslot::Always {
        return Ok(vec![window]);
    }

    let mut output = Vec::new();
    let mut dates = local_dates(&window, &ctx.timezone).peekable();

    // A span starting the day before the window may still overlap it
    let previous_date = crosses_midnight(rule.slot)
        .then(|| dates.peek().and_then(|date| date.pred_opt()))
        .flatten();

    for date in previous_date.into_iter().chain(dates) {
        let Some(range) = resolve_on_date(rule.slot, date, ctx)? else {
            continue;
        };

        if let Some(range) = range_intersection(range, window.clone()) {
            output.push(range);
        }
    }

    Ok(output)
}

/// Get the interval covered by a timeslot on a given local date, if any.
fn resolve_on_date<Tz: TimeZone>(
    slot: Timeslot,
    date: NaiveDate,
    ctx: &Context<Tz>,
) -> Result<Option<ResolvedInterval>, EvalError> {
    let span = match slot {
        Timeslot::Always => TimeSpan::FULL_DAY,
        Timeslot::SunriseSunset => {
            let (sunrise, sunset) = ctx.solar_times(date)?;
            return Ok(Some(sunrise..sunset));
        }
        Timeslot::Holiday => {
            if !ctx.is_holiday(date)? {
                return Ok(None);
            }

            TimeSpan::FULL_DAY
        }
        Timeslot::Weekday { weekday, span } if date.weekday() == weekday => span,
        Timeslot::Month { month, span } if date.month() == month.number_from_month() => span,
        Timeslot::MonthDay { month, day, span }
            if date.month() == month.number_from_month() && date.day() == u32::from(day) =>
        {
            span
        }
        Timeslot::Weekday { .. } | Timeslot::Month { .. } | Timeslot::MonthDay { .. } => {
            return Ok(None)
        }
    };

    Ok(Some(day_range(date, span, ctx)))
}

/// Check if some occurrences of a timeslot end on the following day.
fn crosses_midnight(slot: Timeslot) -> bool {
    match slot {
        Timeslot::Month { span, .. } | Timeslot::MonthDay { span, .. } => span.is_day_crossing(),
        _ => false,
    }
}

/// Convert a span of local clock times starting on a date into UTC.
fn day_range<Tz: TimeZone>(date: NaiveDate, span: TimeSpan, ctx: &Context<Tz>) -> ResolvedInterval {
    let midnight = date.and_time(NaiveTime::MIN);
    let mut end = span.end().mins_from_midnight();

    if span.is_day_crossing() {
        end += 24 * 60;
    }

    let at = |mins: u16| {
        let naive = midnight
            .checked_add_signed(Duration::minutes(mins.into()))
            .unwrap_or(NaiveDateTime::MAX);

        ctx.utc(naive)
    };

    at(span.start().mins_from_midnight())..at(end)
}
