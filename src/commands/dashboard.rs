// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::transactions::totals_table;
use crate::settings;
use crate::store::{Ledger, SqliteLedger};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let summary = ledger.dashboard_summary()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }
    let settings = settings::load(ledger.conn())?;

    println!("{}", totals_table(&summary.metrics, &settings));

    let spend = summary
        .expenses_by_category
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                fmt_money(&c.value, &settings.currency, settings.locale),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], spend));

    if !summary.investments_evolution.is_empty() {
        let evolution = summary
            .investments_evolution
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    fmt_money(&p.value, &settings.currency, settings.locale),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Invested"], evolution));
    }
    Ok(())
}
