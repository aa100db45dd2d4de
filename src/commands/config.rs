// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings;
use crate::store::SqliteLedger;
use crate::utils::pretty_table;
use anyhow::{bail, Result};

pub fn handle(ledger: &SqliteLedger, m: &clap::ArgMatches) -> Result<()> {
    let conn = ledger.conn();
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let all = settings::list(conn)?;
            match all.into_iter().find(|(k, _)| k == key) {
                Some((_, value)) => println!("{}", value),
                None => bail!("Unknown setting '{}'", key),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            settings::set(conn, key, value)?;
            println!("{} set", key);
        }
        Some(("list", _)) => {
            let rows = settings::list(conn)?
                .into_iter()
                .map(|(k, v)| vec![k, v])
                .collect();
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
