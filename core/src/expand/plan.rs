// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Frozen expansion parameters derived from a rule.

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::calendar;
use crate::error::Error;
use crate::rule::{Frequency, RecurrenceRule};

/// A rule's parameters after defaulting and partitioning.
///
/// Building the plan resolves the anchor into the target zone, splits
/// `BYMONTHDAY` into its positive and negative halves, splits `BYDAY` into
/// plain weekdays and ordinalled entries, injects the frequency-dependent
/// defaults, and sorts every set. The input rule is never mutated.
#[derive(Debug, Clone)]
pub(crate) struct RulePlan {
    pub(crate) freq: Frequency,
    pub(crate) interval: i64,
    pub(crate) wkst: u8,
    pub(crate) dtstart: Zoned,
    pub(crate) until: Option<Zoned>,
    pub(crate) count: Option<u32>,
    pub(crate) ignore_count: bool,
    pub(crate) by_month: Vec<i8>,
    pub(crate) by_week_no: Vec<i8>,
    pub(crate) by_year_day: Vec<i16>,
    pub(crate) by_month_day: Vec<i8>,
    pub(crate) by_month_day_neg: Vec<i8>,
    pub(crate) by_weekday: Vec<u8>,
    pub(crate) by_weekday_rel: Vec<(u8, i8)>,
    pub(crate) by_hour: Vec<i8>,
    pub(crate) by_minute: Vec<i8>,
    pub(crate) by_second: Vec<i8>,
    pub(crate) by_set_pos: Vec<i32>,
    pub(crate) tz: TimeZone,
}

impl RulePlan {
    pub(crate) fn new(
        rule: &RecurrenceRule,
        tz: &TimeZone,
        ignore_count: bool,
    ) -> Result<Self, Error> {
        let dtstart = rule
            .dtstart
            .as_ref()
            .ok_or(Error::MissingData)?
            .with_time_zone(tz.clone());

        let mut by_weekday = Vec::new();
        let mut by_weekday_rel = Vec::new();
        let relative_allowed = matches!(rule.freq, Frequency::Yearly | Frequency::Monthly);
        for entry in &rule.by_day {
            match entry.ordinal {
                // Ordinals only mean something within a year or a month
                Some(n) if n != 0 && relative_allowed => {
                    by_weekday_rel.push((entry.weekday.number(), n));
                }
                _ => by_weekday.push(entry.weekday.number()),
            }
        }

        let mut by_month_day = Vec::new();
        let mut by_month_day_neg = Vec::new();
        for &day in &rule.by_month_day {
            if day < 0 {
                by_month_day_neg.push(day);
            } else {
                by_month_day.push(day);
            }
        }

        let mut by_month = sorted_set(&rule.by_month);
        by_month.retain(|m| (1..=12).contains(m));

        // Without any day selector, the anchor drives the match
        if rule.by_week_no.is_empty()
            && rule.by_year_day.is_empty()
            && rule.by_month_day.is_empty()
            && rule.by_day.is_empty()
        {
            match rule.freq {
                Frequency::Yearly => {
                    if by_month.is_empty() {
                        by_month = vec![dtstart.month()];
                    }
                    by_month_day = vec![dtstart.day()];
                }
                Frequency::Monthly => by_month_day = vec![dtstart.day()],
                Frequency::Weekly => by_weekday = vec![calendar::weekday_number(dtstart.date())],
                _ => {}
            }
        }

        let mut by_hour = sorted_set(&rule.by_hour);
        if by_hour.is_empty() && rule.freq > Frequency::Hourly {
            by_hour = vec![dtstart.hour()];
        }
        let mut by_minute = sorted_set(&rule.by_minute);
        if by_minute.is_empty() && rule.freq > Frequency::Minutely {
            by_minute = vec![dtstart.minute()];
        }
        let mut by_second = sorted_set(&rule.by_second);
        if by_second.is_empty() && rule.freq > Frequency::Secondly {
            by_second = vec![dtstart.second()];
        }

        by_weekday.sort_unstable();
        by_weekday.dedup();
        by_month_day.sort_unstable();
        by_month_day.dedup();
        by_month_day_neg.sort_unstable();
        by_month_day_neg.dedup();

        Ok(Self {
            freq: rule.freq,
            interval: i64::from(rule.interval.max(1)),
            wkst: rule.wkst.number(),
            dtstart,
            until: rule.until.clone(),
            count: rule.count,
            ignore_count,
            by_month,
            by_week_no: sorted_set(&rule.by_week_no),
            by_year_day: sorted_set(&rule.by_year_day),
            by_month_day,
            by_month_day_neg,
            by_weekday,
            by_weekday_rel,
            by_hour,
            by_minute,
            by_second,
            by_set_pos: rule.by_set_pos.clone(),
            tz: tz.clone(),
        })
    }
}

fn sorted_set<T: Ord + Copy>(values: &[T]) -> Vec<T> {
    let mut values = values.to_vec();
    values.sort_unstable();
    values.dedup();
    values
}
