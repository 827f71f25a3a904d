// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Merging rule streams and explicit date lists into one instance stream.

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::error::Error;
use crate::expand::expand;
use crate::rule::RecurrenceRule;

/// Lazy ascending stream over an explicit list of instants.
///
/// Instants are ordered by absolute timestamp and converted to the target
/// zone preserving the instant, not the wall-clock.
#[derive(Debug)]
pub struct DateListIter {
    dates: std::vec::IntoIter<Zoned>,
}

impl DateListIter {
    /// Sorts `dates` by absolute timestamp and prepares them for iteration
    /// in `tz`.
    #[must_use]
    pub fn new(mut dates: Vec<Zoned>, tz: &TimeZone) -> Self {
        dates.sort_by_key(Zoned::timestamp);
        let dates: Vec<Zoned> = dates
            .into_iter()
            .map(|date| date.with_time_zone(tz.clone()))
            .collect();
        Self {
            dates: dates.into_iter(),
        }
    }
}

impl Iterator for DateListIter {
    type Item = Zoned;

    fn next(&mut self) -> Option<Zoned> {
        self.dates.next()
    }
}

impl std::iter::FusedIterator for DateListIter {}

/// One merged input stream and its current head.
struct Source {
    head: Option<Zoned>,
    rest: Box<dyn Iterator<Item = Zoned>>,
}

impl Source {
    fn new(mut rest: Box<dyn Iterator<Item = Zoned>>) -> Self {
        let head = rest.next();
        Self { head, rest }
    }

    fn advance(&mut self) {
        self.head = self.rest.next();
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source").field("head", &self.head).finish()
    }
}

/// Merged, deduplicated, exclusion-filtered stream of instants.
///
/// At every step the minimum head across the inclusion streams is taken by
/// absolute timestamp, matching exclusion instants knock it out, and every
/// stream holding an equal head advances so duplicates collapse.
#[derive(Debug)]
pub struct InstanceIter {
    sources: Vec<Source>,
    exclusions: Vec<Source>,
    limit: Option<usize>,
    emitted: usize,
}

/// Builds the merged instance stream for a set of rules and explicit dates.
///
/// Each inclusion rule and the RDATE list become one ascending stream;
/// exclusion rules and the EXDATE list become exclusion streams whose
/// instants are dropped from the output by timestamp equality.
/// `ignore_count` suppresses COUNT on the inclusion rules only. With no
/// rules and no dates the stream is empty.
///
/// # Errors
/// [`Error::MissingData`] if any rule has no anchor instant.
#[tracing::instrument(skip_all, fields(rules = rules.len(), exrules = exrules.len()))]
pub fn instances(
    tz: &TimeZone,
    rules: &[RecurrenceRule],
    rdates: Vec<Zoned>,
    exrules: &[RecurrenceRule],
    exdates: Vec<Zoned>,
    ignore_count: bool,
    iteration_limit: Option<usize>,
) -> Result<InstanceIter, Error> {
    let mut sources: Vec<Source> = Vec::with_capacity(rules.len() + 1);
    for rule in rules {
        let iter = expand(rule, tz, ignore_count)?;
        sources.push(Source::new(Box::new(iter)));
    }
    if !rdates.is_empty() {
        sources.push(Source::new(Box::new(DateListIter::new(rdates, tz))));
    }

    let mut exclusions: Vec<Source> = Vec::with_capacity(exrules.len() + 1);
    for rule in exrules {
        let iter = expand(rule, tz, false)?;
        exclusions.push(Source::new(Box::new(iter)));
    }
    if !exdates.is_empty() {
        exclusions.push(Source::new(Box::new(DateListIter::new(exdates, tz))));
    }

    Ok(InstanceIter {
        sources,
        exclusions,
        limit: iteration_limit,
        emitted: 0,
    })
}

impl Iterator for InstanceIter {
    type Item = Zoned;

    fn next(&mut self) -> Option<Zoned> {
        loop {
            if let Some(limit) = self.limit {
                if self.emitted >= limit {
                    return None;
                }
            }

            self.sources.retain(|source| source.head.is_some());
            let minimum = self
                .sources
                .iter()
                .filter_map(|source| source.head.as_ref())
                .min_by_key(|instant| instant.timestamp())?
                .clone();

            let mut excluded = false;
            for exclusion in &mut self.exclusions {
                while let Some(head) = &exclusion.head {
                    if head.timestamp() < minimum.timestamp() {
                        exclusion.advance();
                    } else {
                        break;
                    }
                }
                if let Some(head) = &exclusion.head {
                    if head.timestamp() == minimum.timestamp() {
                        excluded = true;
                    }
                }
            }
            self.exclusions.retain(|exclusion| exclusion.head.is_some());

            // Consume every tied head so equal instants collapse to one
            for source in &mut self.sources {
                while let Some(head) = &source.head {
                    if head.timestamp() == minimum.timestamp() {
                        source.advance();
                    } else {
                        break;
                    }
                }
            }

            if !excluded {
                self.emitted += 1;
                return Some(minimum);
            }
        }
    }
}

impl std::iter::FusedIterator for InstanceIter {}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;

    use super::*;
    use crate::rule::Frequency;

    fn utc(year: i16, month: i8, day: i8, hour: i8) -> Zoned {
        datetime(year, month, day, hour, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    #[test]
    fn sorts_explicit_dates_by_timestamp() {
        let dates = vec![utc(2024, 1, 3, 0), utc(2024, 1, 1, 0), utc(2024, 1, 2, 0)];
        let sorted: Vec<Zoned> = DateListIter::new(dates, &TimeZone::UTC).collect();
        assert_eq!(
            sorted,
            vec![utc(2024, 1, 1, 0), utc(2024, 1, 2, 0), utc(2024, 1, 3, 0)]
        );
    }

    #[test]
    fn converts_dates_preserving_the_instant() {
        let new_york = TimeZone::get("America/New_York").unwrap();
        let dates = vec![utc(2024, 1, 1, 12)];
        let converted: Vec<Zoned> = DateListIter::new(dates.clone(), &new_york).collect();
        assert_eq!(converted[0].timestamp(), dates[0].timestamp());
        assert_eq!(converted[0].time_zone(), &new_york);
        assert_eq!(converted[0].hour(), 7);
    }

    #[test]
    fn subtracts_exclusion_dates() {
        let rdates = vec![utc(2024, 1, 1, 9), utc(2024, 1, 2, 9), utc(2024, 1, 3, 9)];
        let exdates = vec![utc(2024, 1, 2, 9)];
        let merged: Vec<Zoned> =
            instances(&TimeZone::UTC, &[], rdates, &[], exdates, false, None)
                .unwrap()
                .collect();
        assert_eq!(merged, vec![utc(2024, 1, 1, 9), utc(2024, 1, 3, 9)]);
    }

    #[test]
    fn deduplicates_equal_instants_across_streams() {
        let daily = RecurrenceRule::new(Frequency::Daily)
            .with_dtstart(utc(2024, 1, 1, 9))
            .with_count(3);
        let rdates = vec![utc(2024, 1, 2, 9), utc(2024, 1, 10, 9)];
        let merged: Vec<Zoned> =
            instances(&TimeZone::UTC, &[daily], rdates, &[], Vec::new(), false, None)
                .unwrap()
                .collect();
        assert_eq!(
            merged,
            vec![
                utc(2024, 1, 1, 9),
                utc(2024, 1, 2, 9),
                utc(2024, 1, 3, 9),
                utc(2024, 1, 10, 9),
            ]
        );
    }

    #[test]
    fn excludes_by_timestamp_across_zones() {
        let new_york = TimeZone::get("America/New_York").unwrap();
        let rdates = vec![utc(2024, 1, 1, 12), utc(2024, 1, 2, 12)];
        // Same instant as the first rdate, expressed in another zone
        let exdates = vec![utc(2024, 1, 1, 12).with_time_zone(new_york)];
        let merged: Vec<Zoned> =
            instances(&TimeZone::UTC, &[], rdates, &[], exdates, false, None)
                .unwrap()
                .collect();
        assert_eq!(merged, vec![utc(2024, 1, 2, 12)]);
    }

    #[test]
    fn honours_the_iteration_limit() {
        let daily = RecurrenceRule::new(Frequency::Daily).with_dtstart(utc(2024, 1, 1, 9));
        let merged: Vec<Zoned> =
            instances(&TimeZone::UTC, &[daily], Vec::new(), &[], Vec::new(), false, Some(4))
                .unwrap()
                .collect();
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn merges_two_rules_ascending() {
        let nine = RecurrenceRule::new(Frequency::Daily)
            .with_dtstart(utc(2024, 1, 1, 9))
            .with_count(2);
        let seventeen = RecurrenceRule::new(Frequency::Daily)
            .with_dtstart(utc(2024, 1, 1, 17))
            .with_count(2);
        let merged: Vec<Zoned> = instances(
            &TimeZone::UTC,
            &[seventeen, nine],
            Vec::new(),
            &[],
            Vec::new(),
            false,
            None,
        )
        .unwrap()
        .collect();
        assert_eq!(
            merged,
            vec![
                utc(2024, 1, 1, 9),
                utc(2024, 1, 1, 17),
                utc(2024, 1, 2, 9),
                utc(2024, 1, 2, 17),
            ]
        );
    }

    #[test]
    fn returns_an_empty_stream_without_inputs() {
        let merged: Vec<Zoned> =
            instances(&TimeZone::UTC, &[], Vec::new(), &[], Vec::new(), false, None)
                .unwrap()
                .collect();
        assert!(merged.is_empty());
    }
}
