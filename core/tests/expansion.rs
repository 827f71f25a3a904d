// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end expansion of single rules.

mod common;

use cadence_core::{Frequency, RecurrenceRule, Weekday, WeekdayNum, expand};
use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::common::{dates, utc, zoned};

fn collect(rule: &RecurrenceRule) -> Vec<Zoned> {
    expand(rule, &TimeZone::UTC, false).unwrap().collect()
}

#[test]
fn expands_monthly_by_count() {
    let rule = RecurrenceRule::new(Frequency::Monthly)
        .with_dtstart(utc(2014, 3, 14, 4, 0, 0))
        .with_count(3);

    let instants = collect(&rule);
    assert_eq!(
        instants,
        vec![
            utc(2014, 3, 14, 4, 0, 0),
            utc(2014, 4, 14, 4, 0, 0),
            utc(2014, 5, 14, 4, 0, 0),
        ]
    );
}

#[test]
fn expands_biweekly_weekdays() {
    let mut rule = RecurrenceRule::new(Frequency::Weekly)
        .with_dtstart(utc(2024, 1, 2, 9, 0, 0))
        .with_interval(2)
        .with_count(4);
    rule.by_day = vec![
        WeekdayNum::every(Weekday::Tuesday),
        WeekdayNum::every(Weekday::Thursday),
    ];

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(2024, 1, 2), (2024, 1, 4), (2024, 1, 16), (2024, 1, 18)]
    );
    assert!(instants.iter().all(|z| z.hour() == 9));
}

#[test]
fn expands_last_friday_of_the_month() {
    let mut rule = RecurrenceRule::new(Frequency::Monthly)
        .with_dtstart(utc(2024, 1, 1, 12, 0, 0))
        .with_count(3);
    rule.by_day = vec![WeekdayNum::nth(-1, Weekday::Friday)];

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(2024, 1, 26), (2024, 2, 23), (2024, 3, 29)]
    );
    assert!(instants.iter().all(|z| z.hour() == 12));
}

#[test]
fn expands_second_sunday_of_march() {
    let mut rule = RecurrenceRule::new(Frequency::Yearly)
        .with_dtstart(utc(2024, 1, 1, 2, 0, 0))
        .with_count(3);
    rule.by_month = vec![3];
    rule.by_day = vec![WeekdayNum::nth(2, Weekday::Sunday)];

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(2024, 3, 10), (2025, 3, 9), (2026, 3, 8)]
    );
    assert!(instants.iter().all(|z| z.hour() == 2));
}

#[test]
fn bysetpos_selects_from_the_day_time_product() {
    let mut rule = RecurrenceRule::new(Frequency::Daily)
        .with_dtstart(utc(2024, 6, 1, 0, 0, 0))
        .with_count(5);
    rule.by_hour = vec![9, 17];
    rule.by_set_pos = vec![1];

    let instants = collect(&rule);
    assert_eq!(instants.len(), 5);
    for (i, instant) in instants.iter().enumerate() {
        assert_eq!(instant.day(), 1 + i as i8);
        assert_eq!(instant.hour(), 9);
    }
}

#[test]
fn bysetpos_negative_indexes_from_the_end() {
    // Last weekday of each month
    let mut rule = RecurrenceRule::new(Frequency::Monthly)
        .with_dtstart(utc(2024, 1, 1, 9, 0, 0))
        .with_count(3);
    rule.by_day = vec![
        WeekdayNum::every(Weekday::Monday),
        WeekdayNum::every(Weekday::Tuesday),
        WeekdayNum::every(Weekday::Wednesday),
        WeekdayNum::every(Weekday::Thursday),
        WeekdayNum::every(Weekday::Friday),
    ];
    rule.by_set_pos = vec![-1];

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(2024, 1, 31), (2024, 2, 29), (2024, 3, 29)]
    );
}

#[test]
fn expands_week_numbers() {
    // RFC 5545: FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO
    let mut rule = RecurrenceRule::new(Frequency::Yearly)
        .with_dtstart(utc(1997, 5, 12, 9, 0, 0))
        .with_count(3);
    rule.by_week_no = vec![20];
    rule.by_day = vec![WeekdayNum::every(Weekday::Monday)];

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(1997, 5, 12), (1998, 5, 11), (1999, 5, 17)]
    );
}

#[test]
fn mixed_monthday_signs_combine_as_either() {
    let mut rule = RecurrenceRule::new(Frequency::Monthly)
        .with_dtstart(utc(2024, 1, 1, 0, 0, 0))
        .with_count(4);
    rule.by_month_day = vec![1, -1];

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(2024, 1, 1), (2024, 1, 31), (2024, 2, 1), (2024, 2, 29)]
    );
}

#[test]
fn negative_year_day_counts_from_the_year_end() {
    let mut rule = RecurrenceRule::new(Frequency::Yearly)
        .with_dtstart(utc(2024, 1, 1, 0, 0, 0))
        .with_count(2);
    rule.by_year_day = vec![-1];

    let instants = collect(&rule);
    assert_eq!(dates(&instants), vec![(2024, 12, 31), (2025, 12, 31)]);
}

#[test]
fn anchor_is_first_when_it_matches() {
    let rule = RecurrenceRule::new(Frequency::Weekly)
        .with_dtstart(utc(2024, 1, 2, 9, 0, 0))
        .with_count(2);

    let instants = collect(&rule);
    assert_eq!(instants[0], utc(2024, 1, 2, 9, 0, 0));
    assert_eq!(instants[1], utc(2024, 1, 9, 9, 0, 0));
}

#[test]
fn output_is_monotonic_by_timestamp() {
    let mut rule =
        RecurrenceRule::new(Frequency::Yearly).with_dtstart(utc(2024, 1, 1, 0, 0, 0));
    rule.by_day = vec![WeekdayNum::every(Weekday::Tuesday)];
    rule.by_hour = vec![9, 17];

    let instants: Vec<Zoned> = expand(&rule, &TimeZone::UTC, false)
        .unwrap()
        .take(120)
        .collect();
    assert_eq!(instants.len(), 120);
    assert!(
        instants
            .windows(2)
            .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
    );
}

#[test]
fn preserves_wall_clock_across_dst() {
    let tz = TimeZone::get("America/New_York").unwrap();
    let rule = RecurrenceRule::new(Frequency::Daily)
        .with_dtstart(zoned("America/New_York", 2024, 3, 9, 9, 0, 0))
        .with_count(3);

    let instants: Vec<Zoned> = expand(&rule, &tz, false).unwrap().collect();
    assert_eq!(
        dates(&instants),
        vec![(2024, 3, 9), (2024, 3, 10), (2024, 3, 11)]
    );
    // March 10 is the spring-forward day; the wall clock sticks to 09:00
    assert!(instants.iter().all(|z| z.hour() == 9));
    let gap = instants[1].duration_since(&instants[0]);
    assert_eq!(gap.as_hours(), 23);
}

#[test]
fn parsed_rules_expand_like_built_ones() {
    let rule = RecurrenceRule::parse("FREQ=MONTHLY;BYDAY=-1FR;COUNT=3", &TimeZone::UTC)
        .unwrap()
        .with_dtstart(utc(2024, 1, 1, 12, 0, 0));

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(2024, 1, 26), (2024, 2, 23), (2024, 3, 29)]
    );
}

#[test]
fn until_before_any_match_yields_nothing() {
    let rule = RecurrenceRule::new(Frequency::Daily)
        .with_dtstart(utc(2024, 1, 10, 9, 0, 0))
        .with_until(utc(2024, 1, 9, 9, 0, 0));

    assert!(collect(&rule).is_empty());
}

#[test]
fn yearly_leap_day_only_occurs_in_leap_years() {
    let rule = RecurrenceRule::new(Frequency::Yearly)
        .with_dtstart(utc(2024, 2, 29, 12, 0, 0))
        .with_count(3);

    let instants = collect(&rule);
    assert_eq!(
        dates(&instants),
        vec![(2024, 2, 29), (2028, 2, 29), (2032, 2, 29)]
    );
}
