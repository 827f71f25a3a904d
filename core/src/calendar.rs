// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar arithmetic shared by the expansion engine.
//!
//! Weekdays are numbered 0 = Monday through 6 = Sunday throughout the
//! engine, and days of the year are zero-based offsets from January 1.

use jiff::Span;
use jiff::civil::Date;

const MONTH_LENGTHS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MONTH_LENGTHS_LEAP: [i8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Proleptic Gregorian leap-year test.
pub(crate) fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the year.
pub(crate) fn year_length(year: i16) -> usize {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Day lengths of the twelve months of the year.
pub(crate) fn month_lengths(year: i16) -> &'static [i8; 12] {
    if is_leap_year(year) {
        &MONTH_LENGTHS_LEAP
    } else {
        &MONTH_LENGTHS
    }
}

/// Day-of-year offsets at which each month starts.
///
/// Thirteen entries: `ranges[m - 1]` is the zero-based day of year of the
/// first day of month `m`, and `ranges[12]` is the year length, so month `m`
/// covers `ranges[m - 1]..ranges[m]`.
pub(crate) fn month_ranges(year: i16) -> [usize; 13] {
    let mut ranges = [0; 13];
    for (m, &len) in month_lengths(year).iter().enumerate() {
        ranges[m + 1] = ranges[m] + len as usize;
    }
    ranges
}

/// Weekday of a date, numbered 0 = Monday through 6 = Sunday.
pub(crate) fn weekday_number(date: Date) -> u8 {
    date.weekday().to_monday_zero_offset() as u8
}

/// Zero-based day of the year of a date.
pub(crate) fn day_of_year0(date: Date) -> usize {
    date.day_of_year() as usize - 1
}

/// The date `doy0` days after January 1 of `year`.
///
/// Offsets past the end of the year spill into the following year; `None`
/// only when the result leaves the supported calendar range.
pub(crate) fn nth_day_of_year(year: i16, doy0: usize) -> Option<Date> {
    let jan1 = Date::new(year, 1, 1).ok()?;
    jan1.checked_add(Span::new().days(doy0 as i64)).ok()
}
