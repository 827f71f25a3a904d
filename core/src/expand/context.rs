// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Per-year lookup tables for one expansion period.

use jiff::civil::Date;

use crate::calendar;

/// Day-of-year lookup tables for a single year.
///
/// Every mask carries a seven-day tail into the following year so that a
/// weekly window crossing the year boundary can be resolved without a
/// second context.
#[derive(Debug, Clone)]
pub(crate) struct YearContext {
    pub(crate) year: i16,
    pub(crate) year_len: usize,
    pub(crate) next_year_len: usize,
    pub(crate) jan1_weekday: usize,
    /// Month (1-12) of each day of the year, wrapping to January.
    pub(crate) month_mask: Vec<i8>,
    /// Day of the month (1-31) of each day of the year.
    pub(crate) month_day_mask: Vec<i8>,
    /// Day of the month counted from the end (-1 to -31).
    pub(crate) month_day_mask_neg: Vec<i8>,
    /// Weekday (0 = Monday) of each day of the year.
    pub(crate) weekday_mask: Vec<u8>,
    /// Day-of-year offsets at which each month starts, thirteen entries.
    pub(crate) month_ranges: [usize; 13],
    /// Days selected by `BYWEEKNO`, present only when the rule uses it.
    pub(crate) week_no_mask: Option<Vec<bool>>,
}

impl YearContext {
    pub(crate) fn new(year: i16, wkst: u8, by_week_no: &[i8]) -> Option<Self> {
        let jan1 = Date::new(year, 1, 1).ok()?;
        let jan1_weekday = calendar::weekday_number(jan1) as usize;
        let year_len = calendar::year_length(year);
        let len = year_len + 7;

        let mut month_mask = Vec::with_capacity(len);
        let mut month_day_mask = Vec::with_capacity(len);
        let mut month_day_mask_neg = Vec::with_capacity(len);
        for (m, &month_len) in calendar::month_lengths(year).iter().enumerate() {
            for day in 1..=month_len {
                month_mask.push(m as i8 + 1);
                month_day_mask.push(day);
                month_day_mask_neg.push(day - month_len - 1);
            }
        }
        // Tail: the first week of the following January
        for day in 1..=7 {
            month_mask.push(1);
            month_day_mask.push(day);
            month_day_mask_neg.push(day - 32);
        }

        let weekday_mask = (0..len).map(|i| ((jan1_weekday + i) % 7) as u8).collect();

        let mut ctx = Self {
            year,
            year_len,
            next_year_len: calendar::year_length(year.checked_add(1)?),
            jan1_weekday,
            month_mask,
            month_day_mask,
            month_day_mask_neg,
            weekday_mask,
            month_ranges: calendar::month_ranges(year),
            week_no_mask: None,
        };
        if !by_week_no.is_empty() {
            ctx.week_no_mask = Some(ctx.build_week_no_mask(usize::from(wkst), by_week_no));
        }
        Some(ctx)
    }

    /// The date `doy0` days after January 1, spilling into the next year.
    pub(crate) fn date_of(&self, doy0: usize) -> Option<Date> {
        calendar::nth_day_of_year(self.year, doy0)
    }

    /// Marks the days that fall in one of the requested week numbers.
    ///
    /// Week numbering is anchored at `wkst`: week 1 is the first week with
    /// at least four days in this year. Negative week numbers count from
    /// the last week. Days at the edges of the year may belong to the
    /// neighbouring year's weeks, which is handled in both directions.
    fn build_week_no_mask(&self, wkst: usize, by_week_no: &[i8]) -> Vec<bool> {
        let mut mask = vec![false; self.year_len + 7];

        let first_wkst = (7 + wkst - self.jan1_weekday) % 7;
        let (no1_wkst, w_year_len) = if first_wkst >= 4 {
            // Week 1 begins in the prior year and lends us its tail
            (0, self.year_len + (self.jan1_weekday + 7 - wkst) % 7)
        } else {
            (first_wkst, self.year_len - first_wkst)
        };
        let num_weeks = w_year_len / 7 + w_year_len % 7 / 4;

        for &n in by_week_no {
            let mut n = i64::from(n);
            if n < 0 {
                n += num_weeks as i64 + 1;
            }
            if n <= 0 || n > num_weeks as i64 {
                continue;
            }
            let start = if n > 1 {
                let mut i = no1_wkst + (n as usize - 1) * 7;
                if no1_wkst != first_wkst {
                    i -= 7 - first_wkst;
                }
                i
            } else {
                no1_wkst
            };
            self.fill_week(&mut mask, start, wkst);
        }

        if by_week_no.contains(&1) {
            // Week 1 of the next year may claim days of this year's tail
            let mut i = no1_wkst + num_weeks * 7;
            if no1_wkst != first_wkst {
                i -= 7 - first_wkst;
            }
            if i < self.year_len {
                self.fill_week(&mut mask, i, wkst);
            }
        }

        if no1_wkst > 0 {
            // The leading days belong to the prior year's final week. If
            // no1_wkst is zero the year either starts on wkst or week 1
            // already took days from the prior year, and nothing is left.
            let last_week = if by_week_no.contains(&-1) {
                -1
            } else {
                let prior_len = calendar::year_length(self.year - 1);
                let prior_jan1_weekday = (self.jan1_weekday + 7 - prior_len % 7) % 7;
                let prior_first_wkst = (7 + wkst - prior_jan1_weekday) % 7;
                if prior_first_wkst >= 4 {
                    52 + ((prior_len + (prior_jan1_weekday + 7 - wkst) % 7) % 7 / 4) as i64
                } else {
                    52 + ((self.year_len - no1_wkst) % 7 / 4) as i64
                }
            };
            if by_week_no.iter().any(|&n| i64::from(n) == last_week) {
                for slot in mask.iter_mut().take(no1_wkst) {
                    *slot = true;
                }
            }
        }

        mask
    }

    /// Marks up to seven days starting at `start`, stopping at the next
    /// week boundary.
    fn fill_week(&self, mask: &mut [bool], start: usize, wkst: usize) {
        let mut i = start;
        for _ in 0..7 {
            let Some(slot) = mask.get_mut(i) else { break };
            *slot = true;
            i += 1;
            if self.weekday_mask.get(i).copied() == Some(wkst as u8) {
                break;
            }
        }
    }

    /// Marks the days matched by ordinalled weekday entries within each
    /// range of day-of-year offsets (both bounds inclusive).
    pub(crate) fn relative_weekday_mask(
        &self,
        ranges: &[(usize, usize)],
        entries: &[(u8, i8)],
    ) -> Vec<bool> {
        let mut mask = vec![false; self.year_len + 7];
        for &(first, last) in ranges {
            for &(weekday, n) in entries {
                let i = if n < 0 {
                    let anchor = last as i64 + (i64::from(n) + 1) * 7;
                    let Some(wd) = self.weekday_at(anchor) else {
                        continue;
                    };
                    anchor - (i64::from(wd) - i64::from(weekday)).rem_euclid(7)
                } else {
                    let anchor = first as i64 + (i64::from(n) - 1) * 7;
                    let Some(wd) = self.weekday_at(anchor) else {
                        continue;
                    };
                    anchor + (7 - i64::from(wd) + i64::from(weekday)).rem_euclid(7)
                };
                if i >= first as i64 && i <= last as i64 {
                    mask[i as usize] = true;
                }
            }
        }
        mask
    }

    fn weekday_at(&self, i: i64) -> Option<u8> {
        usize::try_from(i)
            .ok()
            .and_then(|i| self.weekday_mask.get(i))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_masks_with_a_tail_into_the_next_year() {
        let ctx = YearContext::new(2024, 0, &[]).unwrap();
        assert_eq!(ctx.year_len, 366);
        assert_eq!(ctx.next_year_len, 365);
        assert_eq!(ctx.jan1_weekday, 0); // 2024-01-01 was a Monday

        assert_eq!(ctx.month_mask[0], 1);
        assert_eq!(ctx.month_mask[60], 3); // March 1
        assert_eq!(ctx.month_mask[366], 1); // next January

        assert_eq!(ctx.month_day_mask[59], 29); // February 29
        assert_eq!(ctx.month_day_mask_neg[59], -1);
        assert_eq!(ctx.month_day_mask_neg[31], -29); // February 1

        assert_eq!(ctx.weekday_mask[0], 0);
        assert_eq!(ctx.weekday_mask[6], 6);
        assert_eq!(ctx.weekday_mask[7], 0);
    }

    #[test]
    fn marks_requested_week_numbers() {
        // 1997-01-01 was a Wednesday; week 20 runs May 12 through May 18
        let ctx = YearContext::new(1997, 0, &[20]).unwrap();
        let mask = ctx.week_no_mask.as_ref().unwrap();
        let selected: Vec<usize> = (0..ctx.year_len).filter(|&i| mask[i]).collect();
        assert_eq!(selected, (131..138).collect::<Vec<_>>());
        assert_eq!(ctx.date_of(131), Some(jiff::civil::date(1997, 5, 12)));
    }

    #[test]
    fn marks_leading_days_of_the_prior_years_last_week() {
        // 1999-01-01 was a Friday, so Jan 1 through Jan 3 belong to the
        // last week of 1998 and week 1 starts on Jan 4.
        let ctx = YearContext::new(1999, 0, &[-1]).unwrap();
        let mask = ctx.week_no_mask.as_ref().unwrap();
        assert!(mask[0]);
        assert!(mask[2]);
        assert!(!mask[3]);

        // The last week of 1999 itself starts on December 27
        assert!(mask[360]);
        assert_eq!(ctx.date_of(360), Some(jiff::civil::date(1999, 12, 27)));
    }

    #[test]
    fn finds_relative_weekdays_within_a_month() {
        let ctx = YearContext::new(2024, 0, &[]).unwrap();

        // Second Sunday of March 2024 is March 10
        let march = (ctx.month_ranges[2], ctx.month_ranges[3] - 1);
        let mask = ctx.relative_weekday_mask(&[march], &[(6, 2)]);
        let selected: Vec<usize> = (0..ctx.year_len).filter(|&i| mask[i]).collect();
        assert_eq!(selected, vec![69]);
        assert_eq!(ctx.date_of(69), Some(jiff::civil::date(2024, 3, 10)));

        // Last Friday of January 2024 is January 26
        let january = (ctx.month_ranges[0], ctx.month_ranges[1] - 1);
        let mask = ctx.relative_weekday_mask(&[january], &[(4, -1)]);
        let selected: Vec<usize> = (0..ctx.year_len).filter(|&i| mask[i]).collect();
        assert_eq!(selected, vec![25]);
    }
}
