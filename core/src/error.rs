// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the recurrence engine.

/// Errors raised by the recurrence engine.
///
/// Expansion has exactly one recoverable failure: a rule without an anchor
/// instant cannot produce a stream. An empty day set, an empty time set or a
/// period without matches is not an error; the stream simply moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The rule carries no anchor instant and none can be derived.
    #[error("recurrence rule has no anchor instant")]
    MissingData,
}
