// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Per-rule recurrence expansion.

mod context;
mod iter;
mod plan;

pub use iter::{RuleIter, expand};
