// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use cadence_core::{RecurrenceRule, instances};
use colored::Colorize;
use jiff::Zoned;
use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;

use crate::cli::ExpandArgs;
use crate::config::load_options;

/// Expands a rule and prints one occurrence per line.
///
/// # Errors
/// If the zone, the rule or any instant argument cannot be parsed.
pub fn cmd_expand(config: Option<PathBuf>, args: &ExpandArgs) -> Result<(), Box<dyn Error>> {
    let options = load_options(config.as_deref())?;

    let tz = match &args.timezone {
        Some(name) => TimeZone::get(name).map_err(|e| format!("Unknown timezone {name}: {e}"))?,
        None => TimeZone::system(),
    };

    let dtstart = parse_instant(&args.dtstart, &tz)?;
    let rule = RecurrenceRule::parse(&args.rule, &tz)?.with_dtstart(dtstart);

    let rdates = parse_instants(&args.rdates, &tz)?;
    let exdates = parse_instants(&args.exdates, &tz)?;

    let limit = args.limit.unwrap_or(options.virtual_limit);
    let stream = instances(&tz, std::slice::from_ref(&rule), rdates, &[], exdates, false, Some(limit))?;

    let mut total = 0;
    for instant in stream {
        print_instant(&instant);
        total += 1;
    }
    tracing::debug!(total, "expansion finished");

    Ok(())
}

fn print_instant(instant: &Zoned) {
    let weekday = instant.strftime("%a").to_string();
    let stamp = instant.strftime("%Y-%m-%d %H:%M:%S %:z");
    println!("{} {stamp}", weekday.cyan());
}

/// Parses a civil datetime or date, resolving it in the given zone.
fn parse_instant(src: &str, tz: &TimeZone) -> Result<Zoned, Box<dyn Error>> {
    let datetime = match src.parse::<DateTime>() {
        Ok(datetime) => datetime,
        Err(_) => src
            .parse::<Date>()
            .map_err(|e| format!("Invalid instant {src}: {e}"))?
            .to_datetime(jiff::civil::Time::midnight()),
    };
    Ok(datetime
        .to_zoned(tz.clone())
        .map_err(|e| format!("Instant {src} does not exist in this zone: {e}"))?)
}

fn parse_instants(srcs: &[String], tz: &TimeZone) -> Result<Vec<Zoned>, Box<dyn Error>> {
    srcs.iter().map(|src| parse_instant(src, tz)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_and_date_instants() {
        let tz = TimeZone::UTC;

        let full = parse_instant("2024-01-02T09:30:00", &tz).unwrap();
        assert_eq!(full.hour(), 9);
        assert_eq!(full.minute(), 30);

        let date_only = parse_instant("2024-01-02", &tz).unwrap();
        assert_eq!(date_only.hour(), 0);
        assert_eq!(date_only.day(), 2);

        assert!(parse_instant("not-a-date", &tz).is_err());
    }
}
