use std::ops::Range;

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Localize input datetime to its next valid occurence.
///
/// Ambiguous local times, when clocks are set back, resolve to their first
/// occurence. Local times skipped when clocks are set forward resolve to the
/// first valid time that follows them.
pub(crate) fn localize_next_valid<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    let mut curr = naive;

    loop {
        match tz.from_local_datetime(&curr) {
            LocalResult::Single(x) | LocalResult::Ambiguous(x, _) => {
                return x.with_timezone(&Utc);
            }
            LocalResult::None => match curr.checked_add_signed(Duration::minutes(1)) {
                Some(next) => curr = next,
                None => return DateTime::<Utc>::MAX_UTC,
            },
        }
    }
}

/// Iterate over the local dates overlapping a window of time.
pub(crate) fn local_dates<Tz: TimeZone>(
    window: &Range<DateTime<Utc>>,
    tz: &Tz,
) -> impl Iterator<Item = NaiveDate> {
    let first = window.start.with_timezone(tz).date_naive();
    let last = window.end.with_timezone(tz).date_naive();
    first.iter_days().take_while(move |date| *date <= last)
}
