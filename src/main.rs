// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use caixa::{cli, commands, db, logging, store::SqliteLedger};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"));

    let path = db::db_path(matches.get_one::<PathBuf>("db").map(|p| p.as_path()))?;
    let ledger = SqliteLedger::new(db::open_or_init(&path)?)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("config", sub)) => commands::config::handle(&ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&ledger, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&ledger, sub)?,
        Some(("rules", sub)) => commands::rules::handle(&ledger, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
