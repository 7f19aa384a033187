use std::ops::RangeInclusive;

use chrono::{Month, Weekday};

use pest::iterators::Pair;
use pest::Parser;

use crate::clock_time::ClockTime;
use crate::error::{Error, Result};
use crate::rules::{RuleKind, TimeRule, TimeSpan, Timeslot};

/// Separator between two clauses of an expression.
pub const CLAUSE_SEPARATOR: &str = "; ";

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("Mo", Weekday::Mon),
    ("Tu", Weekday::Tue),
    ("We", Weekday::Wed),
    ("Th", Weekday::Thu),
    ("Fr", Weekday::Fri),
    ("Sa", Weekday::Sat),
    ("Su", Weekday::Sun),
];

const MONTHS: [(&str, Month); 12] = [
    ("Jan", Month::January),
    ("Feb", Month::February),
    ("Mar", Month::March),
    ("Apr", Month::April),
    ("May", Month::May),
    ("Jun", Month::June),
    ("Jul", Month::July),
    ("Aug", Month::August),
    ("Sep", Month::September),
    ("Oct", Month::October),
    ("Nov", Month::November),
    ("Dec", Month::December),
];

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct ClauseParser;

/// Parse an expression into the ordered list of rules of its clauses.
///
/// ```
/// use isopen_syntax::parse;
///
/// let rules = parse("Mo-Fr 08:00-12:00,12:30-15:00; Sa 22:00-02:00; Su off").unwrap();
/// assert_eq!(rules.len(), 13);
/// ```
pub fn parse(data: &str) -> Result<Vec<TimeRule>> {
    let mut rules = Vec::new();

    for clause in data.split(CLAUSE_SEPARATOR) {
        rules.extend(parse_clause(clause)?);
    }

    Ok(rules)
}

/// Parse a single clause, which must not contain any clause separator.
pub fn parse_clause(clause: &str) -> Result<Vec<TimeRule>> {
    let pair = ClauseParser::parse(Rule::input_clause, clause)
        .map_err(|pest_err| Error::MalformedClause {
            clause: clause.to_string(),
            cause: Some(Box::new(pest_err)),
        })?
        .next()
        .expect("grammar error: no clause found");

    ClauseBuilder { clause }.build_clause(pair)
}

pub(crate) fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize].0
}

pub(crate) fn month_abbreviation(month: Month) -> &'static str {
    MONTHS[month.number_from_month() as usize - 1].0
}

fn unexpected_token<T>(token: Rule, parent: Rule) -> T {
    unreachable!("Grammar error: found `{token:?}` inside of `{parent:?}`")
}

/// A time range as written in the expression, which may wrap past midnight.
type RawSpan = (ClockTime, ClockTime);

enum Abbreviation {
    Weekday(Weekday),
    Month(Month),
}

/// Turns the pairs of one clause into rules, errors refer to this clause.
struct ClauseBuilder<'c> {
    clause: &'c str,
}

impl ClauseBuilder<'_> {
    fn malformed(&self) -> Error {
        Error::malformed(self.clause)
    }

    fn unsupported(&self, construct: &'static str) -> Error {
        Error::unsupported(self.clause, construct)
    }

    // ---
    // --- Clause
    // ---

    fn build_clause(&self, pair: Pair<Rule>) -> Result<Vec<TimeRule>> {
        assert_eq!(pair.as_rule(), Rule::clause);
        let mut pairs = pair.into_inner();
        let selector = pairs.next().expect("grammar error: empty clause");

        let kind = pairs
            .next()
            .map(build_rule_modifier)
            .unwrap_or(RuleKind::Open);

        let slots = match selector.as_rule() {
            Rule::always_open => vec![Timeslot::Always],
            Rule::sunrise_sunset => vec![Timeslot::SunriseSunset],
            Rule::range_selector => self.build_range_selector(selector)?,
            Rule::holiday_selector => return Err(self.unsupported("public holidays")),
            Rule::unsupported_range => {
                return Err(self.unsupported("range of neither weekdays nor months"))
            }
            other => unexpected_token(other, Rule::clause),
        };

        Ok(slots
            .into_iter()
            .map(|slot| TimeRule::new(slot, kind))
            .collect())
    }

    // ---
    // --- Day selectors
    // ---

    fn build_range_selector(&self, pair: Pair<Rule>) -> Result<Vec<Timeslot>> {
        assert_eq!(pair.as_rule(), Rule::range_selector);
        let mut pairs = pair.into_inner();

        let (start, end) = {
            let pair = pairs.next().expect("grammar error: empty range selector");
            assert_eq!(pair.as_rule(), Rule::abbreviation_range);
            let mut pairs = pair.into_inner();
            let start = self.build_abbreviation(pairs.next().expect("empty abbreviation range"))?;
            let end = pairs.next().map(|pair| self.build_abbreviation(pair)).transpose()?;
            (start, end)
        };

        let mut days = None;
        let mut spans = None;

        for pair in pairs {
            match pair.as_rule() {
                Rule::daynum_range => days = Some(pair),
                Rule::time_selector => spans = Some(self.build_time_selector(pair)?),
                other => unexpected_token(other, Rule::range_selector),
            }
        }

        match (start, end) {
            (Abbreviation::Weekday(weekday), None) => {
                if days.is_some() {
                    return Err(self.malformed());
                }

                Ok(weekday_slots(weekday, spans.as_deref()))
            }
            (Abbreviation::Weekday(start), Some(Abbreviation::Weekday(end))) => {
                if days.is_some() {
                    return Err(self.malformed());
                }

                let range = self.normalized_range(
                    start.num_days_from_monday() as usize,
                    end.num_days_from_monday() as usize,
                );

                Ok(WEEKDAYS[range]
                    .iter()
                    .flat_map(|(_, weekday)| weekday_slots(*weekday, spans.as_deref()))
                    .collect())
            }
            (Abbreviation::Month(month), None) => {
                let days = days
                    .map(|pair| self.build_daynum_range(pair, month))
                    .transpose()?;

                Ok(month_slots(month, days, spans))
            }
            (Abbreviation::Month(start), Some(Abbreviation::Month(end))) => {
                if days.is_some() || spans.is_some() {
                    return Err(self.unsupported("month range combined with days or times"));
                }

                let range = self.normalized_range(
                    start.number_from_month() as usize - 1,
                    end.number_from_month() as usize - 1,
                );

                Ok(MONTHS[range]
                    .iter()
                    .map(|(_, month)| Timeslot::Month { month: *month, span: TimeSpan::FULL_DAY })
                    .collect())
            }
            (Abbreviation::Weekday(_), Some(Abbreviation::Month(_)))
            | (Abbreviation::Month(_), Some(Abbreviation::Weekday(_))) => {
                Err(self.unsupported("range mixing weekdays and months"))
            }
        }
    }

    /// Bounds of a reversed range are swapped rather than wrapping around.
    fn normalized_range(&self, start: usize, end: usize) -> RangeInclusive<usize> {
        if start <= end {
            return start..=end;
        }

        #[cfg(feature = "log")]
        log::warn!("Reversed range in `{}`: bounds were swapped", self.clause);

        end..=start
    }

    fn build_abbreviation(&self, pair: Pair<Rule>) -> Result<Abbreviation> {
        assert_eq!(pair.as_rule(), Rule::abbreviation);
        let token = pair.as_str();

        if let Some((_, weekday)) = WEEKDAYS.iter().find(|(abbr, _)| *abbr == token) {
            return Ok(Abbreviation::Weekday(*weekday));
        }

        if let Some((_, month)) = MONTHS.iter().find(|(abbr, _)| *abbr == token) {
            return Ok(Abbreviation::Month(*month));
        }

        Err(Error::unknown_abbreviation(self.clause, token))
    }

    fn build_daynum_range(&self, pair: Pair<Rule>, month: Month) -> Result<RangeInclusive<u8>> {
        assert_eq!(pair.as_rule(), Rule::daynum_range);
        let mut pairs = pair.into_inner();
        let start = build_daynum(pairs.next().expect("empty day range"));
        let end = pairs.next().map(build_daynum).unwrap_or(start);

        if start == 0 || start > end || end > max_days_in_month(month) {
            return Err(self.malformed());
        }

        Ok(start..=end)
    }

    // ---
    // --- Time selector
    // ---

    fn build_time_selector(&self, pair: Pair<Rule>) -> Result<Vec<RawSpan>> {
        assert_eq!(pair.as_rule(), Rule::time_selector);
        pair.into_inner().map(|pair| self.build_timespan(pair)).collect()
    }

    fn build_timespan(&self, pair: Pair<Rule>) -> Result<RawSpan> {
        assert_eq!(pair.as_rule(), Rule::timespan);
        let mut pairs = pair.into_inner();
        let start = self.build_hour_minutes(pairs.next().expect("empty timespan"))?;
        let end = self.build_hour_minutes(pairs.next().expect("missing end of timespan"))?;

        if start == ClockTime::MIDNIGHT_24 {
            return Err(self.malformed());
        }

        // An end at 00:00 closes the day it started
        if end == ClockTime::MIDNIGHT_00 && start != ClockTime::MIDNIGHT_00 {
            return Ok((start, ClockTime::MIDNIGHT_24));
        }

        Ok((start, end))
    }

    fn build_hour_minutes(&self, pair: Pair<Rule>) -> Result<ClockTime> {
        assert_eq!(pair.as_rule(), Rule::hour_minutes);
        let mut pairs = pair.into_inner();

        let hour = pairs
            .next()
            .expect("missing hour")
            .as_str()
            .parse()
            .expect("invalid hour");

        let minutes = pairs
            .next()
            .expect("missing minutes")
            .as_str()
            .parse()
            .expect("invalid minutes");

        ClockTime::new(hour, minutes).ok_or_else(|| self.malformed())
    }
}

/// Rules for a single weekday, day-crossing spans are split at midnight and
/// continue on the next weekday.
fn weekday_slots(weekday: Weekday, spans: Option<&[RawSpan]>) -> Vec<Timeslot> {
    let Some(spans) = spans else {
        return vec![Timeslot::Weekday { weekday, span: TimeSpan::FULL_DAY }];
    };

    let mut slots = Vec::with_capacity(spans.len());

    for &(start, end) in spans {
        if let Some(span) = TimeSpan::new(start, end) {
            slots.push(Timeslot::Weekday { weekday, span });
            continue;
        }

        slots.push(Timeslot::Weekday {
            weekday,
            span: TimeSpan::until_midnight(start),
        });

        slots.push(Timeslot::Weekday {
            weekday: weekday.succ(),
            span: TimeSpan::since_midnight(end),
        });
    }

    slots
}

/// Rules for a month or some of its days, a day-crossing span is kept whole
/// and continues on the following day.
fn month_slots(
    month: Month,
    days: Option<RangeInclusive<u8>>,
    spans: Option<Vec<RawSpan>>,
) -> Vec<Timeslot> {
    let spans: Vec<TimeSpan> = match spans {
        None => vec![TimeSpan::FULL_DAY],
        Some(spans) => spans
            .into_iter()
            .map(|(start, end)| TimeSpan::new_wrapping(start, end))
            .collect(),
    };

    match days {
        None => spans
            .into_iter()
            .map(|span| Timeslot::Month { month, span })
            .collect(),
        Some(days) => days
            .flat_map(|day| {
                spans
                    .iter()
                    .map(move |&span| Timeslot::MonthDay { month, day, span })
            })
            .collect(),
    }
}

fn build_rule_modifier(pair: Pair<Rule>) -> RuleKind {
    assert_eq!(pair.as_rule(), Rule::rule_modifier);

    match pair
        .into_inner()
        .next()
        .expect("empty rule modifier")
        .as_rule()
    {
        Rule::rule_modifier_closed => RuleKind::Closed,
        Rule::rule_modifier_open => RuleKind::Open,
        other => unexpected_token(other, Rule::rule_modifier),
    }
}

fn build_daynum(pair: Pair<Rule>) -> u8 {
    assert_eq!(pair.as_rule(), Rule::daynum);
    pair.as_str().parse().expect("invalid day number")
}

/// Longest length of a month, including leap years.
fn max_days_in_month(month: Month) -> u8 {
    match month {
        Month::February => 29,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}
