// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule model and its RRULE text round-trip.

mod parse;

use std::fmt::{self, Display};

use jiff::Zoned;
use jiff::tz::TimeZone;

pub use parse::RuleParseError;

/// An RFC 5545 recurrence rule together with its anchor instant.
///
/// Collections are empty when the corresponding rule part is absent; the
/// RRULE grammar cannot produce a present-but-empty list, and the engine
/// treats the two identically.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    /// Frequency of recurrence.
    pub freq: Frequency,

    /// Interval between periods, at least 1.
    pub interval: u32,

    /// Anchor instant defining the series origin and its wall-clock defaults.
    pub dtstart: Option<Zoned>,

    /// Inclusive terminal instant.
    pub until: Option<Zoned>,

    /// Maximum number of occurrences.
    pub count: Option<u32>,

    /// Weekday starting the week for weekly and week-number calculations.
    pub wkst: Weekday,

    /// Month specifier, 1 to 12.
    pub by_month: Vec<i8>,

    /// Week number specifier, -53 to -1 and 1 to 53.
    pub by_week_no: Vec<i8>,

    /// Day of year specifier, -366 to -1 and 1 to 366.
    pub by_year_day: Vec<i16>,

    /// Day of month specifier, -31 to -1 and 1 to 31.
    pub by_month_day: Vec<i8>,

    /// Day of week specifier, each with an optional ordinal.
    pub by_day: Vec<WeekdayNum>,

    /// Hour specifier, 0 to 23.
    pub by_hour: Vec<i8>,

    /// Minute specifier, 0 to 59.
    pub by_minute: Vec<i8>,

    /// Second specifier, 0 to 60.
    pub by_second: Vec<i8>,

    /// Position selector over a period's candidate set, non-zero.
    pub by_set_pos: Vec<i32>,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency and every other field at its
    /// default.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            dtstart: None,
            until: None,
            count: None,
            wkst: Weekday::Monday,
            by_month: Vec::new(),
            by_week_no: Vec::new(),
            by_year_day: Vec::new(),
            by_month_day: Vec::new(),
            by_day: Vec::new(),
            by_hour: Vec::new(),
            by_minute: Vec::new(),
            by_second: Vec::new(),
            by_set_pos: Vec::new(),
        }
    }

    /// Parses an RRULE property value.
    ///
    /// Floating `UNTIL` values are resolved against `tz`; the anchor instant
    /// is not part of the grammar and stays unset.
    ///
    /// # Errors
    /// If the text does not match the RFC 5545 `recur` grammar.
    pub fn parse(src: &str, tz: &TimeZone) -> Result<Self, RuleParseError> {
        parse::parse_rule(src, tz)
    }

    /// Sets the anchor instant.
    #[must_use]
    pub fn with_dtstart(mut self, dtstart: Zoned) -> Self {
        self.dtstart = Some(dtstart);
        self
    }

    /// Sets the inclusive terminal instant.
    #[must_use]
    pub fn with_until(mut self, until: Zoned) -> Self {
        self.until = Some(until);
        self
    }

    /// Sets the maximum number of occurrences.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the interval between periods.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: Display>(f: &mut fmt::Formatter<'_>, name: &str, values: &[T]) -> fmt::Result {
            if values.is_empty() {
                return Ok(());
            }
            write!(f, ";{name}=")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{value}")?;
            }
            Ok(())
        }

        write!(f, "FREQ={}", self.freq)?;
        if let Some(until) = &self.until {
            let utc = until.with_time_zone(TimeZone::UTC);
            write!(f, ";UNTIL={}", utc.strftime("%Y%m%dT%H%M%SZ"))?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }
        if self.interval != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        list(f, "BYSECOND", &self.by_second)?;
        list(f, "BYMINUTE", &self.by_minute)?;
        list(f, "BYHOUR", &self.by_hour)?;
        list(f, "BYDAY", &self.by_day)?;
        list(f, "BYMONTHDAY", &self.by_month_day)?;
        list(f, "BYYEARDAY", &self.by_year_day)?;
        list(f, "BYWEEKNO", &self.by_week_no)?;
        list(f, "BYMONTH", &self.by_month)?;
        list(f, "BYSETPOS", &self.by_set_pos)?;
        if self.wkst != Weekday::Monday {
            write!(f, ";WKST={}", self.wkst)?;
        }
        Ok(())
    }
}

/// Recurrence frequency, finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Frequency {
    /// Every second.
    Secondly,
    /// Every minute.
    Minutely,
    /// Every hour.
    Hourly,
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every year.
    Yearly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Secondly => "SECONDLY",
            Frequency::Minutely => "MINUTELY",
            Frequency::Hourly => "HOURLY",
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        };
        write!(f, "{name}")
    }
}

/// Day of the week, numbered 0 = Monday through 6 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weekday {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Weekday {
    /// The weekday number, 0 = Monday through 6 = Sunday.
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_civil(weekday: jiff::civil::Weekday) -> Self {
        match weekday {
            jiff::civil::Weekday::Monday => Weekday::Monday,
            jiff::civil::Weekday::Tuesday => Weekday::Tuesday,
            jiff::civil::Weekday::Wednesday => Weekday::Wednesday,
            jiff::civil::Weekday::Thursday => Weekday::Thursday,
            jiff::civil::Weekday::Friday => Weekday::Friday,
            jiff::civil::Weekday::Saturday => Weekday::Saturday,
            jiff::civil::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        };
        write!(f, "{name}")
    }
}

/// Day of week with an optional ordinal, e.g. `TU`, `2SU` or `-1FR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Day of the week.
    pub weekday: Weekday,

    /// Occurrence within the period, negative counting from the end.
    pub ordinal: Option<i8>,
}

impl WeekdayNum {
    /// A weekday without an ordinal.
    #[must_use]
    pub fn every(weekday: Weekday) -> Self {
        Self {
            weekday,
            ordinal: None,
        }
    }

    /// The nth occurrence of a weekday, negative counting from the end.
    #[must_use]
    pub fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            weekday,
            ordinal: Some(ordinal),
        }
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ordinal) = self.ordinal {
            write!(f, "{ordinal}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;

    use super::*;

    #[test]
    fn formats_minimal_rule() {
        let rule = RecurrenceRule::new(Frequency::Daily);
        assert_eq!(rule.to_string(), "FREQ=DAILY");
    }

    #[test]
    fn formats_count_and_interval() {
        let rule = RecurrenceRule::new(Frequency::Weekly)
            .with_count(4)
            .with_interval(2);
        assert_eq!(rule.to_string(), "FREQ=WEEKLY;COUNT=4;INTERVAL=2");
    }

    #[test]
    fn formats_by_fields_and_wkst() {
        let mut rule = RecurrenceRule::new(Frequency::Monthly);
        rule.by_day = vec![
            WeekdayNum::nth(-1, Weekday::Friday),
            WeekdayNum::every(Weekday::Tuesday),
        ];
        rule.by_month = vec![3, 4, 5];
        rule.wkst = Weekday::Sunday;
        assert_eq!(
            rule.to_string(),
            "FREQ=MONTHLY;BYDAY=-1FR,TU;BYMONTH=3,4,5;WKST=SU"
        );
    }

    #[test]
    fn formats_until_as_utc() {
        let until = datetime(1997, 12, 24, 0, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        let rule = RecurrenceRule::new(Frequency::Daily).with_until(until);
        assert_eq!(rule.to_string(), "FREQ=DAILY;UNTIL=19971224T000000Z");
    }

    #[test]
    fn round_trips_through_parse() {
        let src = "FREQ=YEARLY;INTERVAL=2;BYDAY=2SU;BYMONTH=3";
        let rule = RecurrenceRule::parse(src, &TimeZone::UTC).unwrap();
        assert_eq!(rule.to_string(), src);
    }
}
