// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! The expansion iterator: one rule, a lazy ascending stream of instants.

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Span, Zoned};

use crate::calendar;
use crate::error::Error;
use crate::expand::context::YearContext;
use crate::expand::plan::RulePlan;
use crate::rule::{Frequency, RecurrenceRule};

/// Expands one rule into a lazy ascending stream of instants in `tz`.
///
/// The stream ends when `UNTIL` is crossed, `COUNT` is exhausted (unless
/// `ignore_count`) or the calendar range runs out. A rule without any
/// terminator yields instants indefinitely; bound it with an iteration
/// limit or [`Iterator::take`].
///
/// # Errors
/// [`Error::MissingData`] if the rule has no anchor instant.
pub fn expand(rule: &RecurrenceRule, tz: &TimeZone, ignore_count: bool) -> Result<RuleIter, Error> {
    let plan = RulePlan::new(rule, tz, ignore_count)?;
    Ok(RuleIter::new(plan))
}

/// Lazy ascending stream of the instants matching one rule.
///
/// The cursor walks whole periods; each emitted instant is freshly
/// constructed from a (day-of-year, time-of-day) pair and never reused
/// internally.
#[derive(Debug, Clone)]
pub struct RuleIter {
    plan: RulePlan,
    remaining: Option<u32>,
    /// Anchor of the current period; `None` once the calendar range is
    /// exhausted.
    cursor: Option<DateTime>,
    ctx: Option<YearContext>,
    nth_mask: Option<Vec<bool>>,
    nth_month: i8,
    /// Time set reused across periods at daily and coarser frequencies.
    fixed_times: Option<Vec<Time>>,
    days: Vec<usize>,
    times: Vec<Time>,
    day_idx: usize,
    time_idx: usize,
    /// Instants picked by `BYSETPOS` for the current period, ascending.
    selections: Vec<Zoned>,
    selection_idx: usize,
    done: bool,
}

impl RuleIter {
    fn new(plan: RulePlan) -> Self {
        let remaining = plan.count;
        let cursor = plan.dtstart.datetime();
        let fixed_times = (plan.freq >= Frequency::Daily)
            .then(|| time_set(&plan.by_hour, &plan.by_minute, &plan.by_second));
        let mut iter = Self {
            plan,
            remaining,
            cursor: Some(cursor),
            ctx: None,
            nth_mask: None,
            nth_month: 0,
            fixed_times,
            days: Vec::new(),
            times: Vec::new(),
            day_idx: 0,
            time_idx: 0,
            selections: Vec::new(),
            selection_idx: 0,
            done: false,
        };
        iter.load_period();
        iter
    }

    /// Rebuilds the day set, time set and position picks for the period the
    /// cursor points at.
    fn load_period(&mut self) {
        self.days.clear();
        self.times.clear();
        self.selections.clear();
        self.day_idx = 0;
        self.time_idx = 0;
        self.selection_idx = 0;

        let Some(cursor) = self.cursor else { return };

        if self
            .ctx
            .as_ref()
            .is_none_or(|ctx| ctx.year != cursor.year())
        {
            self.ctx = YearContext::new(cursor.year(), self.plan.wkst, &self.plan.by_week_no);
            self.nth_mask = None;
            if self.ctx.is_none() {
                self.cursor = None;
                return;
            }
        }
        let Some(ctx) = self.ctx.take() else { return };

        let month = cursor.month();
        if !self.plan.by_weekday_rel.is_empty()
            && matches!(self.plan.freq, Frequency::Yearly | Frequency::Monthly)
            && (self.nth_mask.is_none()
                || (self.plan.freq == Frequency::Monthly && self.nth_month != month))
        {
            let ranges: Vec<(usize, usize)> = match self.plan.freq {
                Frequency::Yearly if self.plan.by_month.is_empty() => vec![(0, ctx.year_len - 1)],
                Frequency::Yearly => self
                    .plan
                    .by_month
                    .iter()
                    .map(|&m| {
                        let m = m as usize;
                        (ctx.month_ranges[m - 1], ctx.month_ranges[m] - 1)
                    })
                    .collect(),
                _ => {
                    let m = month as usize;
                    vec![(ctx.month_ranges[m - 1], ctx.month_ranges[m] - 1)]
                }
            };
            self.nth_mask = Some(ctx.relative_weekday_mask(&ranges, &self.plan.by_weekday_rel));
            self.nth_month = month;
        }

        let raw_days: Vec<usize> = match self.plan.freq {
            Frequency::Yearly => (0..ctx.year_len).collect(),
            Frequency::Monthly => {
                let m = month as usize;
                (ctx.month_ranges[m - 1]..ctx.month_ranges[m]).collect()
            }
            Frequency::Weekly => {
                let mut days = Vec::with_capacity(7);
                let mut i = calendar::day_of_year0(cursor.date());
                for _ in 0..7 {
                    days.push(i);
                    i += 1;
                    if ctx.weekday_mask.get(i).copied() == Some(self.plan.wkst) {
                        break;
                    }
                }
                days
            }
            _ => vec![calendar::day_of_year0(cursor.date())],
        };
        let nth_mask = self.nth_mask.as_deref();
        let days: Vec<usize> = raw_days
            .into_iter()
            .filter(|&i| !day_filtered(&self.plan, &ctx, nth_mask, i))
            .collect();

        let times = if self.plan.freq >= Frequency::Daily {
            self.fixed_times.clone().unwrap_or_default()
        } else {
            self.gated_times(cursor)
        };

        if !self.plan.by_set_pos.is_empty() && !times.is_empty() {
            let mut picks: Vec<Zoned> = Vec::new();
            let time_count = times.len() as i64;
            let day_count = days.len() as i64;
            for &pos in &self.plan.by_set_pos {
                let pos = i64::from(pos);
                let (day_pos, time_pos) = if pos < 0 {
                    (pos.div_euclid(time_count), pos.rem_euclid(time_count))
                } else {
                    ((pos - 1).div_euclid(time_count), (pos - 1).rem_euclid(time_count))
                };
                let idx = if day_pos < 0 {
                    day_count + day_pos
                } else {
                    day_pos
                };
                if idx < 0 || idx >= day_count {
                    continue;
                }
                let Some(date) = ctx.date_of(days[idx as usize]) else {
                    continue;
                };
                let Some(instant) = zone_candidate(&self.plan.tz, date, times[time_pos as usize])
                else {
                    continue;
                };
                if !picks.contains(&instant) {
                    picks.push(instant);
                }
            }
            picks.sort();
            self.selections = picks;
        }

        self.days = days;
        self.times = times;
        self.ctx = Some(ctx);
    }

    /// Time set for hourly and finer frequencies: empty when the cursor's
    /// own fields fail their filters, otherwise the cross-product expanded
    /// below the frequency level.
    fn gated_times(&self, cursor: DateTime) -> Vec<Time> {
        let plan = &self.plan;
        let mut gated = !plan.by_hour.is_empty() && !plan.by_hour.contains(&cursor.hour());
        if plan.freq <= Frequency::Minutely {
            gated = gated
                || (!plan.by_minute.is_empty() && !plan.by_minute.contains(&cursor.minute()));
        }
        if plan.freq == Frequency::Secondly {
            gated = gated
                || (!plan.by_second.is_empty() && !plan.by_second.contains(&cursor.second()));
        }
        if gated {
            return Vec::new();
        }
        match plan.freq {
            Frequency::Hourly => time_set(&[cursor.hour()], &plan.by_minute, &plan.by_second),
            Frequency::Minutely => {
                time_set(&[cursor.hour()], &[cursor.minute()], &plan.by_second)
            }
            _ => time_set(&[cursor.hour()], &[cursor.minute()], &[cursor.second()]),
        }
    }

    /// The next candidate instant of the current period, in order.
    fn next_candidate(&mut self) -> Option<Zoned> {
        if !self.plan.by_set_pos.is_empty() {
            let pick = self.selections.get(self.selection_idx)?.clone();
            self.selection_idx += 1;
            return Some(pick);
        }
        loop {
            let &day = self.days.get(self.day_idx)?;
            match self.times.get(self.time_idx) {
                Some(&time) => {
                    self.time_idx += 1;
                    let date = self.ctx.as_ref().and_then(|ctx| ctx.date_of(day))?;
                    if let Some(instant) = zone_candidate(&self.plan.tz, date, time) {
                        return Some(instant);
                    }
                }
                None => {
                    self.day_idx += 1;
                    self.time_idx = 0;
                }
            }
        }
    }

    /// Moves the cursor to the anchor of the next period.
    fn advance_period(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let interval = self.plan.interval;
        let next = match self.plan.freq {
            Frequency::Yearly => {
                let year = i64::from(cursor.year()) + interval;
                i16::try_from(year)
                    .ok()
                    .and_then(|year| Date::new(year, cursor.month(), 1).ok())
                    .map(|date| DateTime::from_parts(date, cursor.time()))
            }
            Frequency::Monthly => {
                let months = i64::from(cursor.month()) - 1 + interval;
                let year = i64::from(cursor.year()) + months.div_euclid(12);
                let month = months.rem_euclid(12) as i8 + 1;
                i16::try_from(year)
                    .ok()
                    .and_then(|year| Date::new(year, month, 1).ok())
                    .map(|date| DateTime::from_parts(date, cursor.time()))
            }
            Frequency::Weekly => {
                let weekday = i64::from(calendar::weekday_number(cursor.date()));
                let wkst = i64::from(self.plan.wkst);
                let delta = if wkst > weekday {
                    -(weekday + 1 + (6 - wkst)) + interval * 7
                } else {
                    -(weekday - wkst) + interval * 7
                };
                cursor.checked_add(Span::new().days(delta)).ok()
            }
            Frequency::Daily => cursor.checked_add(Span::new().days(interval)).ok(),
            Frequency::Hourly => cursor.checked_add(Span::new().hours(interval)).ok(),
            Frequency::Minutely => cursor.checked_add(Span::new().minutes(interval)).ok(),
            Frequency::Secondly => cursor.checked_add(Span::new().seconds(interval)).ok(),
        };
        self.cursor = next;
        next.is_some()
    }
}

impl Iterator for RuleIter {
    type Item = Zoned;

    fn next(&mut self) -> Option<Zoned> {
        while !self.done {
            if let Some(candidate) = self.next_candidate() {
                if let Some(until) = &self.plan.until {
                    if candidate > *until {
                        self.done = true;
                        return None;
                    }
                }
                if candidate < self.plan.dtstart {
                    continue;
                }
                if !self.plan.ignore_count {
                    if let Some(remaining) = &mut self.remaining {
                        if *remaining == 0 {
                            self.done = true;
                            return None;
                        }
                        *remaining -= 1;
                    }
                }
                return Some(candidate);
            }
            if !self.advance_period() {
                self.done = true;
                return None;
            }
            self.load_period();
        }
        None
    }
}

impl std::iter::FusedIterator for RuleIter {}

/// Reject test for one day of the year against every active day filter.
///
/// When both halves of `BYMONTHDAY` are active a day survives if either
/// matches; every other active filter rejects on its own.
fn day_filtered(plan: &RulePlan, ctx: &YearContext, nth_mask: Option<&[bool]>, i: usize) -> bool {
    if !plan.by_month.is_empty() && !plan.by_month.contains(&ctx.month_mask[i]) {
        return true;
    }
    if let Some(mask) = &ctx.week_no_mask {
        if !mask[i] {
            return true;
        }
    }
    if !plan.by_weekday.is_empty() && !plan.by_weekday.contains(&ctx.weekday_mask[i]) {
        return true;
    }
    if let Some(mask) = nth_mask {
        if !mask[i] {
            return true;
        }
    }
    if (!plan.by_month_day.is_empty() || !plan.by_month_day_neg.is_empty())
        && !plan.by_month_day.contains(&ctx.month_day_mask[i])
        && !plan.by_month_day_neg.contains(&ctx.month_day_mask_neg[i])
    {
        return true;
    }
    if !plan.by_year_day.is_empty() {
        // Days in the tail are tested against the next year's numbering
        let (day, len) = if i < ctx.year_len {
            (i, ctx.year_len)
        } else {
            (i - ctx.year_len, ctx.next_year_len)
        };
        let positive = (day + 1) as i16;
        let negative = (day as i64 - len as i64) as i16;
        if !plan.by_year_day.contains(&positive) && !plan.by_year_day.contains(&negative) {
            return true;
        }
    }
    false
}

/// Ascending cross-product of hours, minutes and seconds.
fn time_set(hours: &[i8], minutes: &[i8], seconds: &[i8]) -> Vec<Time> {
    let mut times = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
    for &hour in hours {
        for &minute in minutes {
            for &second in seconds {
                // A leap second collapses onto :59
                if let Ok(time) = Time::new(hour, minute, second.min(59), 0) {
                    times.push(time);
                }
            }
        }
    }
    times.sort();
    times
}

fn zone_candidate(tz: &TimeZone, date: Date, time: Time) -> Option<Zoned> {
    match DateTime::from_parts(date, time).to_zoned(tz.clone()) {
        Ok(instant) => Some(instant),
        Err(err) => {
            tracing::warn!(%err, %date, %time, "skipping instant outside the zone's range");
            None
        }
    }
}
