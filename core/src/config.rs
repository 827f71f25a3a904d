// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

//! Runtime options for occurrence generation.

/// Options recognized by the occurrence transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct Options {
    /// Hard ceiling on the occurrences produced for a single recurrence set.
    ///
    /// Bounds rules that carry neither `COUNT` nor `UNTIL`. The default
    /// covers two years of daily occurrences.
    #[serde(default = "default_virtual_limit")]
    pub virtual_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            virtual_limit: default_virtual_limit(),
        }
    }
}

const fn default_virtual_limit() -> usize {
    732
}
