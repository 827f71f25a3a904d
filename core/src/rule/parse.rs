// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Parser for the RFC 5545 `recur` grammar (Section 3.3.10).

use std::borrow::Cow;

use chumsky::error::RichPattern;
use chumsky::extra::{self, ParserExtra};
use chumsky::input::{Input, Stream, ValueInput};
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;

use crate::rule::{Frequency, RecurrenceRule, Weekday, WeekdayNum};

/// Failure raised when RRULE text cannot be turned into a rule.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum RuleParseError {
    /// The text does not match the `recur` grammar.
    #[error("invalid recurrence rule: {0}")]
    Syntax(String),

    /// `UNTIL` names a wall-clock instant outside the supported range.
    #[error("invalid UNTIL instant: {0}")]
    Until(String),
}

/// Failure reasons when a specific rule part was expected but not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleExpected {
    /// A rule part occurred more than once
    DuplicatePart,
    /// The FREQ rule part is required
    RequiredFreq,
    /// UNTIL and COUNT must not occur in the same rule
    CountUntilExclusion,
    /// A 32-bit unsigned integer value was expected
    U32,
    /// A positive 32-bit unsigned integer value was expected
    PositiveU32,
    /// A date value was expected
    Date,
    /// A time value was expected
    Time,
}

impl From<RuleExpected> for RichPattern<'_, char> {
    fn from(expected: RuleExpected) -> Self {
        match expected {
            RuleExpected::DuplicatePart => Self::Label(Cow::Borrowed("duplicate rule part")),
            RuleExpected::RequiredFreq => Self::Label(Cow::Borrowed("FREQ is required")),
            RuleExpected::CountUntilExclusion => {
                Self::Label(Cow::Borrowed("UNTIL and COUNT are mutually exclusive"))
            }
            RuleExpected::U32 => Self::Label(Cow::Borrowed("u32 out of range")),
            RuleExpected::PositiveU32 => Self::Label(Cow::Borrowed("positive integer expected")),
            RuleExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            RuleExpected::Time => Self::Label(Cow::Borrowed("invalid time")),
        }
    }
}

pub(crate) fn parse_rule(src: &str, tz: &TimeZone) -> Result<RecurrenceRule, RuleParseError> {
    let stream = Stream::from_iter(src.chars());
    let raw = rule_value::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(stream)
        .into_result()
        .map_err(|errors| {
            let rendered = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            RuleParseError::Syntax(rendered)
        })?;
    raw.resolve(tz)
}

/// An `UNTIL` value before its zone is known.
#[derive(Debug, Clone, Copy)]
struct UntilValue {
    datetime: DateTime,
    utc: bool,
}

/// A parsed rule whose `UNTIL` has not yet been resolved to a zone.
#[derive(Debug, Clone)]
struct RawRule {
    rule: RecurrenceRule,
    until: Option<UntilValue>,
}

impl RawRule {
    fn resolve(self, tz: &TimeZone) -> Result<RecurrenceRule, RuleParseError> {
        let mut rule = self.rule;
        if let Some(until) = self.until {
            let tz = if until.utc {
                TimeZone::UTC
            } else {
                tz.clone()
            };
            let zoned = until
                .datetime
                .to_zoned(tz)
                .map_err(|err| RuleParseError::Until(err.to_string()))?;
            rule.until = Some(zoned);
        }
        Ok(rule)
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
fn rule_value<'src, I, E>() -> impl Parser<'src, I, RawRule, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    rule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .then_ignore(end())
        .try_map(build_from_parts::<I, E::Error>)
}

fn build_from_parts<'src, I, Err>(parts: Vec<Part>, span: I::Span) -> Result<RawRule, Err>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    Err: LabelError<'src, I, RuleExpected>,
{
    let duplicate = || Err::expected_found([RuleExpected::DuplicatePart], None, span);

    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut wkst = None;
    let mut rule = RecurrenceRule::new(Frequency::Daily);

    for part in parts {
        match part {
            Part::Freq(v) => {
                if freq.replace(v).is_some() {
                    return Err(duplicate());
                }
            }
            Part::Until(v) => {
                if until.replace(v).is_some() {
                    return Err(duplicate());
                }
            }
            Part::Count(v) => {
                if count.replace(v).is_some() {
                    return Err(duplicate());
                }
            }
            Part::Interval(v) => {
                if interval.replace(v).is_some() {
                    return Err(duplicate());
                }
            }
            Part::Wkst(v) => {
                if wkst.replace(v).is_some() {
                    return Err(duplicate());
                }
            }
            Part::BySecond(v) => {
                if !rule.by_second.is_empty() {
                    return Err(duplicate());
                }
                rule.by_second = v;
            }
            Part::ByMinute(v) => {
                if !rule.by_minute.is_empty() {
                    return Err(duplicate());
                }
                rule.by_minute = v;
            }
            Part::ByHour(v) => {
                if !rule.by_hour.is_empty() {
                    return Err(duplicate());
                }
                rule.by_hour = v;
            }
            Part::ByDay(v) => {
                if !rule.by_day.is_empty() {
                    return Err(duplicate());
                }
                rule.by_day = v;
            }
            Part::ByMonthDay(v) => {
                if !rule.by_month_day.is_empty() {
                    return Err(duplicate());
                }
                rule.by_month_day = v;
            }
            Part::ByYearDay(v) => {
                if !rule.by_year_day.is_empty() {
                    return Err(duplicate());
                }
                rule.by_year_day = v;
            }
            Part::ByWeekNo(v) => {
                if !rule.by_week_no.is_empty() {
                    return Err(duplicate());
                }
                rule.by_week_no = v;
            }
            Part::ByMonth(v) => {
                if !rule.by_month.is_empty() {
                    return Err(duplicate());
                }
                rule.by_month = v;
            }
            Part::BySetPos(v) => {
                if !rule.by_set_pos.is_empty() {
                    return Err(duplicate());
                }
                rule.by_set_pos = v;
            }
        }
    }

    // FREQ is the one required part
    rule.freq = freq
        .ok_or_else(|| Err::expected_found([RuleExpected::RequiredFreq], None, span))?;

    if until.is_some() && count.is_some() {
        return Err(Err::expected_found(
            [RuleExpected::CountUntilExclusion],
            None,
            span,
        ));
    }

    rule.count = count;
    rule.interval = interval.unwrap_or(1);
    rule.wkst = wkst.unwrap_or(Weekday::Monday);

    Ok(RawRule { rule, until })
}

#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(UntilValue),
    Count(u32),
    Interval(u32),
    BySecond(Vec<i8>),
    ByMinute(Vec<i8>),
    ByHour(Vec<i8>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<i8>),
    ByDay(Vec<WeekdayNum>),
    BySetPos(Vec<i32>),
    Wkst(Weekday),
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn rule_part<'src, I, E>() -> impl Parser<'src, I, Part, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    let kw = |kw| just(kw).ignore_then(just('='));

    let freq = kw("FREQ").ignore_then(freq()).map(Part::Freq);
    let until = kw("UNTIL").ignore_then(enddate()).map(Part::Until);
    let count = kw("COUNT").ignore_then(u32_non_zero()).map(Part::Count);
    let interval = kw("INTERVAL")
        .ignore_then(u32_non_zero())
        .map(Part::Interval);

    let by_second = kw("BYSECOND")
        .ignore_then(seconds().separated_by(just(',')).collect())
        .map(Part::BySecond);
    let by_minute = kw("BYMINUTE")
        .ignore_then(minutes().separated_by(just(',')).collect())
        .map(Part::ByMinute);
    let by_hour = kw("BYHOUR")
        .ignore_then(hour().separated_by(just(',')).collect())
        .map(Part::ByHour);
    let by_day = kw("BYDAY")
        .ignore_then(weekdaynum().separated_by(just(',')).collect())
        .map(Part::ByDay);
    let by_month_day = kw("BYMONTHDAY")
        .ignore_then(monthdaynum().separated_by(just(',')).collect())
        .map(Part::ByMonthDay);
    let by_year_day = kw("BYYEARDAY")
        .ignore_then(yeardaynum().separated_by(just(',')).collect())
        .map(Part::ByYearDay);
    let by_week_no = kw("BYWEEKNO")
        .ignore_then(weeknum().separated_by(just(',')).collect())
        .map(Part::ByWeekNo);
    let by_month = kw("BYMONTH")
        .ignore_then(monthnum().separated_by(just(',')).collect())
        .map(Part::ByMonth);
    let by_set_pos = kw("BYSETPOS")
        .ignore_then(setposday().separated_by(just(',')).collect())
        .map(Part::BySetPos);
    let wkst = kw("WKST").ignore_then(weekday()).map(Part::Wkst);

    choice((
        freq,
        until,
        count,
        interval,
        by_second,
        by_minute,
        by_hour,
        by_day,
        by_month_day,
        by_year_day,
        by_week_no,
        by_month,
        by_set_pos,
        wkst,
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src, I, E>() -> impl Parser<'src, I, Frequency, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        just("SECONDLY").to(Frequency::Secondly),
        just("MINUTELY").to(Frequency::Minutely),
        just("HOURLY").to(Frequency::Hourly),
        just("DAILY").to(Frequency::Daily),
        just("WEEKLY").to(Frequency::Weekly),
        just("MONTHLY").to(Frequency::Monthly),
        just("YEARLY").to(Frequency::Yearly),
    ))
}

/// ```txt
/// enddate     = date / date-time
/// ```
fn enddate<'src, I, E>() -> impl Parser<'src, I, UntilValue, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    date_value()
        .then(just('T').ignore_then(time_value()).or_not())
        .map(|(date, time)| match time {
            Some((time, utc)) => UntilValue {
                datetime: DateTime::from_parts(date, time),
                utc,
            },
            None => UntilValue {
                datetime: DateTime::from_parts(date, Time::midnight()),
                utc: false,
            },
        })
}

/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn date_value<'src, I, E>() -> impl Parser<'src, I, Date, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    let year = d0_9()
        .then(d0_9())
        .then(d0_9())
        .then(d0_9())
        .map(|(((a, b), c), d)| {
            1000 * i16::from(a) + 100 * i16::from(b) + 10 * i16::from(c) + i16::from(d)
        });

    let month = choice((
        just('0').ignore_then(d1_9()),
        just('1').ignore_then(d0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(d1_9()),
        d1_2().then(d0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(d0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            Date::new(year, month, day)
                .map_err(|_| E::Error::expected_found([RuleExpected::Date], None, span))
        })
}

/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
/// time-utc     = "Z"
/// ```
fn time_value<'src, I, E>() -> impl Parser<'src, I, (Time, bool), E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    time_hour()
        .then(time_minute())
        .then(time_second())
        .then(just('Z').or_not())
        .try_map(|(((hour, minute), second), utc), span| {
            // A leap second collapses onto :59
            Time::new(hour, minute, second.min(59), 0)
                .map(|time| (time, utc.is_some()))
                .map_err(|_| E::Error::expected_found([RuleExpected::Time], None, span))
        })
}

fn time_hour<'src, I, E>() -> impl Parser<'src, I, i8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        d0_1().then(d0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(d0_3()).map(|b| 20 + b),
    ))
}

fn time_minute<'src, I, E>() -> impl Parser<'src, I, i8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    d0_5().then(d0_9()).map(|(a, b)| 10 * a + b)
}

fn time_second<'src, I, E>() -> impl Parser<'src, I, i8, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        d0_5().then(d0_9()).map(|(a, b)| 10 * a + b),
        just("60").to(60), // leap second
    ))
}

/// ```txt
/// seconds     = 1*2DIGIT       ;0 to 60
/// ```
fn seconds<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        d0_5().then(d0_9()).map(|(a, b)| 10 * a + b), // 00-59
        just("60").to(60),                            // 60
        d0_9(),                                       // 0-9
    ))
}

/// ```txt
/// minutes     = 1*2DIGIT       ;0 to 59
/// ```
fn minutes<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        d0_5().then(d0_9()).map(|(a, b)| 10 * a + b), // 00-59
        d0_9(),                                       // 0-9
    ))
}

/// ```txt
/// hour        = 1*2DIGIT       ;0 to 23
/// ```
fn hour<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        d0_1().then(d0_9()).map(|(a, b)| 10 * a + b), // 00-19
        just('2').ignore_then(d0_3()).map(|b| 20 + b), // 20-23
        d0_9(),                                       // 0-9
    ))
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// plus        = "+"
/// minus       = "-"
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekdayNum, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordwk())
        .map(|(positive, n)| if positive { n } else { -n })
        .or_not()
        .then(weekday())
        .map(|(ordinal, weekday)| WeekdayNum { weekday, ordinal })
}

/// ```txt
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn ordwk<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        d1_4().then(d0_9()).map(|(a, b)| a * 10 + b), // 10-49
        just('5').ignore_then(d0_3()).map(|a| 50 + a), // 50-53
        just('0').ignore_then(d1_9()),                // 01-09
        d1_9(),                                       // 1-9
    ))
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, Weekday, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        just("SU").to(Weekday::Sunday),
        just("MO").to(Weekday::Monday),
        just("TU").to(Weekday::Tuesday),
        just("WE").to(Weekday::Wednesday),
        just("TH").to(Weekday::Thursday),
        just("FR").to(Weekday::Friday),
        just("SA").to(Weekday::Saturday),
    ))
}

/// ```txt
/// monthdaynum = [plus / minus] ordmoday
/// ordmoday    = 1*2DIGIT       ;1 to 31
/// ```
fn monthdaynum<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    let ordmoday = choice((
        d1_2().then(d0_9()).map(|(a, b)| 10 * a + b), // 10-29
        just('3').ignore_then(d0_1()).map(|a| 30 + a), // 30-31
        just('0').or_not().ignore_then(d1_9()),       // 1-9 / 01-09
    ));

    is_positive()
        .then(ordmoday)
        .map(|(positive, n)| if positive { n } else { -n })
}

/// ```txt
/// yeardaynum  = [plus / minus] ordyrday
/// ```
fn yeardaynum<'src, I, E>() -> impl Parser<'src, I, i16, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordyrday())
        .map(|(positive, n)| if positive { n } else { -n })
}

/// ```txt
/// ordyrday    = 1*3DIGIT      ;1 to 366
/// ```
fn ordyrday<'src, I, E>() -> impl Parser<'src, I, i16, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    let i16_1_99 = d1_9()
        .map(i16::from)
        .then(d0_9().map(i16::from).or_not())
        .map(|(a, b)| match b {
            Some(b) => a * 10 + b, // 10-99
            None => a,             // 1-9
        });

    choice((
        just('3').ignore_then(choice((
            just('6')
                .ignore_then(d0_6().map(i16::from))
                .map(|a| 360 + a), // 360-366
            d0_5()
                .map(i16::from)
                .then(d0_9().map(i16::from))
                .map(|(a, b)| 300 + a * 10 + b), // 300-359
        ))),
        d1_2()
            .map(i16::from)
            .then(d0_9().map(i16::from))
            .then(d0_9().map(i16::from))
            .map(|((a, b), c)| a * 100 + b * 10 + c), // 100-299
        just('0').or_not().ignore_then(choice((
            just('0').ignore_then(d0_9().map(i16::from)), // 01-09 / 001-009
            i16_1_99,                                     // 1-99 and zero-padded forms
        ))),
    ))
}

/// ```txt
/// weeknum     = [plus / minus] ordwk
/// ```
fn weeknum<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    is_positive()
        .then(ordwk())
        .map(|(positive, n)| if positive { n } else { -n })
}

/// ```txt
/// monthnum    = 1*2DIGIT       ;1 to 12
/// ```
fn monthnum<'src, I, E>() -> impl Parser<'src, I, i8, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        just('0').ignore_then(d1_9()),                 // 01-09
        just('1').ignore_then(d0_2()).map(|a| 10 + a), // 10-12
        d1_9(),                                        // 1-9
    ))
}

/// ```txt
/// setposday   = yeardaynum
/// ```
fn setposday<'src, I, E>() -> impl Parser<'src, I, i32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    yeardaynum().map(i32::from)
}

fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

/// Parse a positive u32 (1 or more digits)
fn u32_non_zero<'src, I, E>() -> impl Parser<'src, I, u32, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits
        .collect::<String>()
        .try_map_with(|str, e| {
            lexical::parse_partial::<u32, _>(&str)
                .map_err(|_| E::Error::expected_found([RuleExpected::U32], None, e.span()))
                .and_then(|(v, _)| match v {
                    0 => Err(E::Error::expected_found(
                        [RuleExpected::PositiveU32],
                        None,
                        e.span(),
                    )),
                    v => Ok(v),
                })
        })
}

macro_rules! digit_parsers {
    ($($name:ident: $lo:literal ..= $hi:literal;)*) => {$(
        fn $name<'src, I, E>() -> impl Parser<'src, I, i8, E> + Copy
        where
            I: Input<'src, Token = char, Span = SimpleSpan> + ValueInput<'src>,
            E: ParserExtra<'src, I>,
        {
            select! { c @ $lo..=$hi => (c as u8 - b'0') as i8 }
        }
    )*};
}

digit_parsers! {
    d0_1: '0'..='1';
    d0_2: '0'..='2';
    d0_3: '0'..='3';
    d0_5: '0'..='5';
    d0_6: '0'..='6';
    d0_9: '0'..='9';
    d1_2: '1'..='2';
    d1_4: '1'..='4';
    d1_9: '1'..='9';
}
