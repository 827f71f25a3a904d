// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Turning an expansion stream into (start, end) occurrences.

use jiff::{SignedDuration, Zoned};

use crate::config::Options;
use crate::error::Error;
use crate::merge::instances;
use crate::rule::RecurrenceRule;

/// One rule together with its end instant and flattened date lists.
#[derive(Debug, Clone)]
pub struct RecurrenceSet {
    /// The recurrence rule, carrying the series anchor.
    pub rule: RecurrenceRule,

    /// End of the first occurrence; its distance from the anchor becomes
    /// the duration attached to every occurrence.
    pub end: Option<Zoned>,

    /// Additional occurrence instants (RDATE).
    pub rdates: Vec<Zoned>,

    /// Excluded occurrence instants (EXDATE).
    pub exdates: Vec<Zoned>,
}

impl RecurrenceSet {
    /// Creates a recurrence set around one rule.
    #[must_use]
    pub fn new(rule: RecurrenceRule) -> Self {
        Self {
            rule,
            end: None,
            rdates: Vec::new(),
            exdates: Vec::new(),
        }
    }

    /// Sets the end instant of the first occurrence.
    #[must_use]
    pub fn with_end(mut self, end: Zoned) -> Self {
        self.end = Some(end);
        self
    }

    /// Adds an additional occurrence instant.
    #[must_use]
    pub fn with_rdate(mut self, rdate: Zoned) -> Self {
        self.rdates.push(rdate);
        self
    }

    /// Adds an excluded occurrence instant.
    #[must_use]
    pub fn with_exdate(mut self, exdate: Zoned) -> Self {
        self.exdates.push(exdate);
        self
    }
}

/// A concrete occurrence of a recurring event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Start instant.
    pub start: Zoned,

    /// End instant; equals the start when the set carries no end.
    pub end: Zoned,
}

/// Caller-supplied test applied to every candidate occurrence.
pub trait Constraint {
    /// Whether the candidate start instant is acceptable.
    fn test(&self, instant: &Zoned) -> bool;

    /// Whether a failed test ends the series instead of skipping one
    /// candidate.
    fn stops_transformer(&self) -> bool {
        false
    }
}

/// Materializes the occurrences of a recurrence set as (start, end) pairs.
///
/// With `count_constraint_failures` (the default posture) every candidate,
/// accepted or not, counts towards [`Options::virtual_limit`]. When the
/// caller opts out, COUNT on the rule is suppressed inside the expander and
/// instead limits accepted occurrences, so constraint failures cost
/// nothing; the virtual limit still bounds rules without a COUNT of their
/// own.
///
/// # Errors
/// [`Error::MissingData`] if the rule has no anchor instant.
#[tracing::instrument(skip(set, constraint, options))]
pub fn occurrences(
    set: &RecurrenceSet,
    constraint: Option<&dyn Constraint>,
    count_constraint_failures: bool,
    options: &Options,
) -> Result<Vec<Occurrence>, Error> {
    let dtstart = set.rule.dtstart.as_ref().ok_or(Error::MissingData)?;
    let tz = dtstart.time_zone().clone();
    let duration = match &set.end {
        Some(end) => end.duration_since(dtstart),
        None => SignedDuration::ZERO,
    };

    let stream = instances(
        &tz,
        std::slice::from_ref(&set.rule),
        set.rdates.clone(),
        &[],
        set.exdates.clone(),
        !count_constraint_failures,
        None,
    )?;

    let cap = if count_constraint_failures {
        options.virtual_limit
    } else {
        set.rule
            .count
            .map_or(options.virtual_limit, |count| count as usize)
    };

    let mut out = Vec::new();
    if cap == 0 {
        return Ok(out);
    }

    let mut counted = 0;
    for start in stream {
        let accepted = constraint.is_none_or(|c| c.test(&start));
        if !accepted && constraint.is_some_and(Constraint::stops_transformer) {
            break;
        }
        if accepted {
            let end = match start.checked_add(duration) {
                Ok(end) => end,
                Err(err) => {
                    tracing::warn!(%err, "occurrence end out of range, clamping to start");
                    start.clone()
                }
            };
            out.push(Occurrence { start, end });
        }
        if accepted || count_constraint_failures {
            counted += 1;
            if counted >= cap {
                break;
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use jiff::civil::datetime;
    use jiff::tz::TimeZone;

    use super::*;
    use crate::rule::Frequency;

    fn utc(year: i16, month: i8, day: i8, hour: i8) -> Zoned {
        datetime(year, month, day, hour, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    struct WeekdayOnly;

    impl Constraint for WeekdayOnly {
        fn test(&self, instant: &Zoned) -> bool {
            !matches!(
                instant.weekday(),
                jiff::civil::Weekday::Saturday | jiff::civil::Weekday::Sunday
            )
        }
    }

    struct StopAtFirstFailure;

    impl Constraint for StopAtFirstFailure {
        fn test(&self, instant: &Zoned) -> bool {
            instant.day() < 3
        }

        fn stops_transformer(&self) -> bool {
            true
        }
    }

    #[test]
    fn attaches_the_duration_to_every_occurrence() {
        let rule = RecurrenceRule::new(Frequency::Daily)
            .with_dtstart(utc(2024, 1, 1, 9))
            .with_count(2);
        let set = RecurrenceSet::new(rule).with_end(utc(2024, 1, 1, 10));

        let occurrences = occurrences(&set, None, true, &Options::default()).unwrap();
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].end, utc(2024, 1, 1, 10));
        assert_eq!(occurrences[1].start, utc(2024, 1, 2, 9));
        assert_eq!(occurrences[1].end, utc(2024, 1, 2, 10));
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let set = RecurrenceSet::new(RecurrenceRule::new(Frequency::Daily));
        let err = occurrences(&set, None, true, &Options::default()).unwrap_err();
        assert_eq!(err, Error::MissingData);
    }

    #[test]
    fn virtual_limit_caps_unbounded_rules() {
        let rule = RecurrenceRule::new(Frequency::Daily).with_dtstart(utc(2024, 1, 1, 9));
        let set = RecurrenceSet::new(rule);
        let options = Options { virtual_limit: 5 };

        let occurrences = occurrences(&set, None, true, &options).unwrap();
        assert_eq!(occurrences.len(), 5);
    }

    #[test]
    fn failures_count_against_the_virtual_limit_by_default() {
        // Anchored on a Saturday: the first two candidates fail the
        // constraint and still consume the limit.
        let rule = RecurrenceRule::new(Frequency::Daily).with_dtstart(utc(2024, 1, 6, 9));
        let set = RecurrenceSet::new(rule);
        let options = Options { virtual_limit: 4 };

        let occurrences = occurrences(&set, Some(&WeekdayOnly), true, &options).unwrap();
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[0].start, utc(2024, 1, 8, 9));
        assert_eq!(occurrences[1].start, utc(2024, 1, 9, 9));
    }

    #[test]
    fn suppressed_failures_let_count_limit_acceptances() {
        let rule = RecurrenceRule::new(Frequency::Daily)
            .with_dtstart(utc(2024, 1, 6, 9))
            .with_count(3);
        let set = RecurrenceSet::new(rule);

        let occurrences =
            occurrences(&set, Some(&WeekdayOnly), false, &Options::default()).unwrap();
        assert_eq!(occurrences.len(), 3);
        assert_eq!(occurrences[0].start, utc(2024, 1, 8, 9));
        assert_eq!(occurrences[2].start, utc(2024, 1, 10, 9));
    }

    #[test]
    fn terminating_constraint_stops_the_series() {
        let rule = RecurrenceRule::new(Frequency::Daily).with_dtstart(utc(2024, 1, 1, 9));
        let set = RecurrenceSet::new(rule);

        let occurrences =
            occurrences(&set, Some(&StopAtFirstFailure), true, &Options::default()).unwrap();
        assert_eq!(occurrences.len(), 2);
    }

    #[test]
    fn exdates_remove_occurrences() {
        let rule = RecurrenceRule::new(Frequency::Daily)
            .with_dtstart(utc(2024, 1, 1, 9))
            .with_count(3);
        let set = RecurrenceSet::new(rule).with_exdate(utc(2024, 1, 2, 9));

        let occurrences = occurrences(&set, None, true, &Options::default()).unwrap();
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[1].start, utc(2024, 1, 3, 9));
    }
}
