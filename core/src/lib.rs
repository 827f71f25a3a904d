// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Expand iCalendar recurrence rules (RFC 5545) into lazy ascending
//! streams of concrete occurrence instants.
//!
//! A [`RecurrenceRule`] — parsed from RRULE text or built directly — is
//! expanded with [`expand`] into a stream of [`jiff::Zoned`] instants.
//! [`instances`] merges any number of rule streams with explicit RDATE
//! lists and subtracts EXRULE/EXDATE streams. [`occurrences`] wraps one
//! rule into (start, end) pairs for calendar display.

#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro
)]

mod calendar;
mod config;
mod error;
mod expand;
mod merge;
mod rule;
mod transform;

pub use crate::config::Options;
pub use crate::error::Error;
pub use crate::expand::{RuleIter, expand};
pub use crate::merge::{DateListIter, InstanceIter, instances};
pub use crate::rule::{Frequency, RecurrenceRule, RuleParseError, Weekday, WeekdayNum};
pub use crate::transform::{Constraint, Occurrence, RecurrenceSet, occurrences};
