// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use jiff::Zoned;
use jiff::civil::datetime;
use jiff::tz::TimeZone;

/// A zoned instant in UTC.
pub fn utc(year: i16, month: i8, day: i8, hour: i8, minute: i8, second: i8) -> Zoned {
    datetime(year, month, day, hour, minute, second, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap()
}

/// A zoned instant in a named IANA zone.
pub fn zoned(tz: &str, year: i16, month: i8, day: i8, hour: i8, minute: i8, second: i8) -> Zoned {
    datetime(year, month, day, hour, minute, second, 0)
        .to_zoned(TimeZone::get(tz).unwrap())
        .unwrap()
}

/// The civil date parts of a stream of instants, for compact assertions.
pub fn dates(instants: &[Zoned]) -> Vec<(i16, i8, i8)> {
    instants
        .iter()
        .map(|z| (z.year(), z.month(), z.day()))
        .collect()
}
