// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Command, ValueEnum, ValueHint, arg, crate_version, value_parser};
use clap_complete::generate;

use crate::config::APP_NAME;

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Parse the command-line arguments
    #[must_use]
    pub fn parse() -> Cli {
        let matches = build_cli().get_matches();

        let command = match matches.subcommand() {
            Some(("expand", matches)) => Commands::Expand(ExpandArgs {
                rule: matches
                    .get_one::<String>("rule")
                    .expect("rule is required")
                    .clone(),
                dtstart: matches
                    .get_one::<String>("dtstart")
                    .expect("dtstart is required")
                    .clone(),
                timezone: matches.get_one::<String>("timezone").cloned(),
                rdates: matches
                    .get_many::<String>("rdate")
                    .unwrap_or_default()
                    .cloned()
                    .collect(),
                exdates: matches
                    .get_many::<String>("exdate")
                    .unwrap_or_default()
                    .cloned()
                    .collect(),
                limit: matches.get_one::<usize>("limit").copied(),
            }),
            Some(("generate-completion", matches)) => match matches.get_one::<Shell>("shell") {
                Some(shell) => {
                    shell.generate_completion();
                    process::exit(1)
                }
                _ => unreachable!(),
            },
            _ => unreachable!(),
        };

        let config = matches.get_one::<PathBuf>("config").cloned();
        Cli { config, command }
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Expand a recurrence rule into occurrence instants
    Expand(ExpandArgs),
}

/// Arguments for the expand command
#[derive(Debug, Clone)]
pub struct ExpandArgs {
    /// RRULE property value, e.g. `FREQ=WEEKLY;BYDAY=TU,TH`
    pub rule: String,

    /// Anchor instant of the series
    pub dtstart: String,

    /// IANA zone to expand in; the system zone when absent
    pub timezone: Option<String>,

    /// Additional occurrence instants
    pub rdates: Vec<String>,

    /// Excluded occurrence instants
    pub exdates: Vec<String>,

    /// Maximum number of occurrences to print
    pub limit: Option<usize>,
}

fn build_cli() -> Command {
    Command::new(APP_NAME)
        .about("Expand iCalendar recurrence rules into concrete instants.")
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(-c --config [CONFIG] "Path to the configuration file")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("expand")
                .about("Expand a recurrence rule and print one occurrence per line")
                .arg(arg!(rule: <RULE> "RRULE property value, e.g. FREQ=DAILY;COUNT=5"))
                .arg(arg!(--dtstart <DATETIME> "Anchor instant, e.g. 2024-01-02T09:00:00"))
                .arg(arg!(--timezone [ZONE] "IANA zone name, defaults to the system zone"))
                .arg(
                    arg!(--rdate [DATETIME] "Additional occurrence instant")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--exdate [DATETIME] "Excluded occurrence instant")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--limit [N] "Maximum number of occurrences to print")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("generate-completion")
                .about("Generate shell completion for the specified shell")
                .hide(true)
                .arg(
                    arg!(shell: <SHELL> "The shell generator to use")
                        .value_parser(value_parser!(Shell)),
                ),
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Shell {
    Bash,
    Elvish,
    Fish,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    fn generate_completion(&self) {
        use clap_complete::Shell as ClapShell;

        let mut cmd = build_cli();
        let name = cmd.get_name().to_string();
        match self {
            Shell::Bash => generate(ClapShell::Bash, &mut cmd, name, &mut io::stdout()),
            Shell::Elvish => generate(ClapShell::Elvish, &mut cmd, name, &mut io::stdout()),
            Shell::Fish => generate(ClapShell::Fish, &mut cmd, name, &mut io::stdout()),
            Shell::PowerShell => generate(ClapShell::PowerShell, &mut cmd, name, &mut io::stdout()),
            Shell::Zsh => generate(ClapShell::Zsh, &mut cmd, name, &mut io::stdout()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
