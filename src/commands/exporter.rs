// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde_json::json;

use crate::categorize::display_category;
use crate::commands::transactions::criteria_from;
use crate::filter::filter;
use crate::store::{Ledger, SqliteLedger};

pub fn handle(ledger: &SqliteLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let criteria = criteria_from(sub)?;

    let transactions = ledger.list_transactions()?;
    let categories = ledger.list_categories()?;
    let mut rows = filter(&transactions, &criteria);
    // oldest first, like a statement
    rows.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "id",
                "date",
                "description",
                "amount",
                "category",
                "direction",
                "investment",
                "maturity_date",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.clone(),
                    t.description.clone(),
                    t.amount.to_string(),
                    display_category(t, &categories).to_string(),
                    t.direction.as_str().to_string(),
                    t.investment.to_string(),
                    t.maturity_date.map(|d| d.to_string()).unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "description": t.description,
                        "amount": t.amount.to_string(),
                        "category": t.category,
                        "direction": t.direction,
                        "investment": t.investment,
                        "maturity_date": t.maturity_date,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transaction(s) to {}", rows.len(), out);
    Ok(())
}
