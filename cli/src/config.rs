// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fs;
use std::path::Path;

use cadence_core::Options;

/// The name of the cadence application.
pub const APP_NAME: &str = "cadence";

/// Loads transformer options from a TOML file, or the defaults when no
/// path is given.
///
/// # Errors
/// If the file cannot be read or parsed.
pub fn load_options(path: Option<&Path>) -> Result<Options, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
            let options = toml::from_str(&text)
                .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))?;
            Ok(options)
        }
        None => Ok(Options::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_path() {
        let options = load_options(None).unwrap();
        assert_eq!(options, Options::default());
    }
}
