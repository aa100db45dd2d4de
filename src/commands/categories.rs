// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryType, NewCategory};
use crate::store::{Ledger, SqliteLedger};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &SqliteLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = sub.get_one::<String>("type").unwrap().parse::<CategoryType>()?;
            let c = ledger.create_category(&NewCategory {
                name: name.to_string(),
                kind,
            })?;
            println!("Added category '{}' ({})", c.name, c.kind.as_str());
        }
        Some(("list", sub)) => {
            let cats = ledger.list_categories()?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .iter()
                    .map(|c| vec![c.id.to_string(), c.name.clone(), c.kind.as_str().to_string()])
                    .collect();
                println!("{}", pretty_table(&["ID", "Category", "Type"], data));
            }
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let current = ledger.category(id)?;
            let name = sub
                .get_one::<String>("name")
                .cloned()
                .unwrap_or(current.name);
            let kind = match sub.get_one::<String>("type") {
                Some(t) => t.parse::<CategoryType>()?,
                None => current.kind,
            };
            let c = ledger.update_category(id, &NewCategory { name, kind })?;
            println!("Updated category {} -> '{}' ({})", c.id, c.name, c.kind.as_str());
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ledger.delete_category(id)?;
            // transactions keep the old name and show as uncategorized
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}
