// SPDX-FileCopyrightText: 2026 cadence developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use cadence_cli::{Cli, Commands, cmd_expand};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Expand(args) => cmd_expand(cli.config, &args)?,
    }
    Ok(())
}
