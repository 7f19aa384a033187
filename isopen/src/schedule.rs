use std::fmt::Display;
use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use isopen_syntax::rules::TimeRule;
use isopen_syntax::CLAUSE_SEPARATOR;

use crate::context::Context;
use crate::error::{EvalError, ParserError};
use crate::interval::{combine, is_normalized, ResolvedInterval};
use crate::resolver::resolve;

/// Length of the window covered by [`Schedule::open_intervals_24h`].
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

/// Cap of the horizon searched by [`Schedule::next_change`].
pub const MAX_HORIZON_DAYS: i64 = 366;

// Schedule

/// A parsed opening hours string and its evaluation context.
///
/// A schedule is immutable once built: every query resolves its rules over
/// the window it needs, so it can be shared and queried from several threads.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use isopen::Schedule;
///
/// let schedule = Schedule::parse("Mo 08:00-20:00; Mo 12:00-13:00 off").unwrap();
/// let monday = |h, m| Utc.with_ymd_and_hms(2024, 6, 3, h, m, 0).unwrap();
///
/// assert!(schedule.is_open_at(monday(10, 0)).unwrap());
/// assert!(!schedule.is_open_at(monday(12, 30)).unwrap());
/// let next_change = schedule.next_change_after(monday(10, 0), chrono::Duration::hours(6));
/// assert_eq!(next_change.unwrap(), monday(12, 0));
/// ```
#[derive(Clone, Debug)]
pub struct Schedule<Tz: TimeZone = Utc> {
    /// Rules in source order
    rules: Arc<[TimeRule]>,
    /// When the rules were parsed
    last_updated: DateTime<Utc>,
    /// Evaluation context
    ctx: Context<Tz>,
}

impl Schedule<Utc> {
    /// Parse a raw opening hours string, with a default context.
    ///
    /// ```
    /// use isopen::Schedule;
    ///
    /// assert!(Schedule::parse("24/7; Su off").is_ok());
    /// assert!(Schedule::parse("Mo-Fr 08:00").is_err());
    /// ```
    pub fn parse(data: &str) -> Result<Self, ParserError> {
        Ok(Self::from_rules(isopen_syntax::parse(data)?))
    }

    /// Build a schedule from rules that were not written by hand.
    ///
    /// ```
    /// use isopen::{RuleKind, Schedule, TimeRule, Timeslot};
    ///
    /// let schedule = Schedule::from_rules([
    ///     TimeRule::new(Timeslot::Always, RuleKind::Open),
    ///     TimeRule::new(Timeslot::Holiday, RuleKind::Closed),
    /// ]);
    ///
    /// assert_eq!(schedule.to_string(), "24/7; PH off");
    /// ```
    pub fn from_rules(rules: impl IntoIterator<Item = TimeRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            last_updated: Utc::now(),
            ctx: Context::default(),
        }
    }
}

impl<Tz: TimeZone> Schedule<Tz> {
    // --
    // -- Builder Methods
    // --

    /// Set a new evaluation context for this schedule.
    ///
    /// ```
    /// use isopen::{Context, Schedule};
    ///
    /// let tz = chrono::FixedOffset::east_opt(7200).unwrap();
    ///
    /// let schedule = Schedule::parse("Mo 10:00-18:00")
    ///     .unwrap()
    ///     .with_context(Context::default().with_timezone(tz));
    /// ```
    pub fn with_context<Tz2: TimeZone>(self, ctx: Context<Tz2>) -> Schedule<Tz2> {
        Schedule {
            rules: self.rules,
            last_updated: self.last_updated,
            ctx,
        }
    }

    pub fn context(&self) -> &Context<Tz> {
        &self.ctx
    }

    pub fn rules(&self) -> &[TimeRule] {
        &self.rules
    }

    /// Get the time at which rules of this schedule were parsed.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    // --
    // -- Queries
    // --

    /// Get the sorted and disjoint open intervals over a window of time.
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use isopen::Schedule;
    ///
    /// let schedule = Schedule::parse("24/7; Su off").unwrap();
    /// let saturday = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    /// let intervals = schedule.intervals(saturday..saturday + Duration::days(3)).unwrap();
    ///
    /// assert_eq!(intervals.len(), 2);
    /// assert_eq!(intervals[0].end, saturday + Duration::days(1));
    /// assert_eq!(intervals[1].start, saturday + Duration::days(2));
    /// ```
    pub fn intervals(
        &self,
        window: Range<DateTime<Utc>>,
    ) -> Result<Vec<ResolvedInterval>, EvalError> {
        let mut resolved = Vec::new();

        for rule in self.rules.iter() {
            let intervals = resolve(rule, window.clone(), &self.ctx)?;
            resolved.extend(intervals.into_iter().map(|range| (range, rule.kind)));
        }

        let open = combine(resolved);
        debug_assert!(is_normalized(&open));
        Ok(open)
    }

    /// Get the open intervals over the next 24 hours.
    pub fn open_intervals_24h(&self) -> Result<Vec<ResolvedInterval>, EvalError> {
        let now = Utc::now();
        self.intervals(now..now + Duration::hours(DEFAULT_WINDOW_HOURS))
    }

    /// Check if the schedule is open at a given time.
    pub fn is_open_at(&self, time: DateTime<Utc>) -> Result<bool, EvalError> {
        let window_end = time
            .checked_add_signed(Duration::minutes(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let open = self.intervals(time..window_end)?;
        Ok(open.first().is_some_and(|range| range.contains(&time)))
    }

    pub fn is_open_now(&self) -> Result<bool, EvalError> {
        self.is_open_at(Utc::now())
    }

    /// Get the first time the state of the schedule changes strictly after
    /// `time`, and no later than `time + horizon`.
    ///
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use isopen::{EvalError, Schedule};
    ///
    /// let schedule = Schedule::parse("Jan 17 09:30-17:45").unwrap();
    /// let time = Utc.with_ymd_and_hms(2024, 1, 16, 12, 0, 0).unwrap();
    ///
    /// assert_eq!(
    ///     schedule.next_change_after(time, Duration::days(1)).unwrap(),
    ///     Utc.with_ymd_and_hms(2024, 1, 17, 9, 30, 0).unwrap(),
    /// );
    ///
    /// assert_eq!(
    ///     schedule.next_change_after(time, Duration::hours(12)),
    ///     Err(EvalError::NoChangeFound { horizon: Duration::hours(12) }),
    /// );
    /// ```
    pub fn next_change_after(
        &self,
        time: DateTime<Utc>,
        horizon: Duration,
    ) -> Result<DateTime<Utc>, EvalError> {
        let not_found = EvalError::NoChangeFound { horizon };

        let limit = time
            .checked_add_signed(horizon)
            .ok_or_else(|| not_found.clone())?;

        // Extend the window a bit so that a change at the limit is not
        // mistaken for the window's bound.
        let window_end = limit
            .checked_add_signed(Duration::minutes(1))
            .ok_or_else(|| not_found.clone())?;

        self.intervals(time..window_end)?
            .into_iter()
            .flat_map(|range| [range.start, range.end])
            .find(|&bound| bound > time && bound <= limit)
            .ok_or(not_found)
    }

    /// Get the first time the state of the schedule changes after `time`,
    /// searching up to a year ahead.
    pub fn next_change(&self, time: DateTime<Utc>) -> Result<DateTime<Utc>, EvalError> {
        let max_horizon = Duration::days(MAX_HORIZON_DAYS);
        let mut horizon = Duration::days(1);

        loop {
            match self.next_change_after(time, horizon) {
                Err(EvalError::NoChangeFound { .. }) if horizon < max_horizon => {
                    horizon = std::cmp::min(horizon * 2, max_horizon);

                    #[cfg(feature = "log")]
                    log::debug!(
                        horizon_days = horizon.num_days();
                        "No change found, extending horizon"
                    );
                }
                res => return res,
            }
        }
    }

    /// Get the time left before the state of the schedule changes.
    pub fn remaining_time(
        &self,
        time: DateTime<Utc>,
        horizon: Duration,
    ) -> Result<Duration, EvalError> {
        Ok(self.next_change_after(time, horizon)? - time)
    }

    pub fn remaining_time_now(&self) -> Result<Duration, EvalError> {
        let now = Utc::now();
        Ok(self.next_change(now)? - now)
    }
}

impl FromStr for Schedule {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<Tz: TimeZone> Display for Schedule<Tz> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rules = self.rules.iter();

        if let Some(first) = rules.next() {
            write!(f, "{first}")?;
        }

        for rule in rules {
            write!(f, "{CLAUSE_SEPARATOR}{rule}")?;
        }

        Ok(())
    }
}
