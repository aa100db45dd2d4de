// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{aggregate, Totals};
use crate::categorize::{category_patch, display_category, recategorize, Categorizer};
use crate::filter::{available_months, filter, Criteria};
use crate::grouping::group_by_month;
use crate::models::{Category, Direction, MonthFilter, NewTransaction, Source, Transaction};
use crate::settings::{self, Settings};
use crate::store::{Ledger, SqliteLedger};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(ledger: &SqliteLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("months", sub)) => months(ledger, sub)?,
        Some(("set-category", sub)) => set_category(ledger, sub)?,
        Some(("recategorize", _)) => {
            let categorizer = Categorizer::load(ledger.conn())?;
            let n = recategorize(ledger, &categorizer)?;
            println!("Categorized {} transaction(s)", n);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            ledger.delete_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        Some(("clear", sub)) => clear(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let direction = sub.get_one::<String>("kind").unwrap().parse::<Direction>()?;
    let categories = ledger.list_categories()?;

    let category = match sub.get_one::<String>("category").map(|s| s.trim()) {
        Some(c) if !c.is_empty() => Some(c.to_string()),
        _ => {
            let categorizer = Categorizer::load(ledger.conn())?;
            categorizer.categorize(&description).map(str::to_string)
        }
    };
    let investment = category_patch(category.clone(), &categories)
        .investment
        .unwrap_or(false);

    let txn = ledger.create_transaction(&NewTransaction {
        date,
        description,
        amount: direction.signed(amount),
        category,
        direction,
        investment,
        maturity_date: None,
        source: Source::Manual,
    })?;
    println!(
        "Recorded #{} {} on {} '{}' ({})",
        txn.id,
        txn.amount,
        txn.date,
        txn.description,
        display_category(&txn, &categories)
    );
    Ok(())
}

pub fn criteria_from(sub: &clap::ArgMatches) -> Result<Criteria> {
    let search = sub
        .get_one::<String>("search")
        .cloned()
        .unwrap_or_default();
    let month = match sub.get_one::<String>("month") {
        Some(raw) => raw.parse::<MonthFilter>()?,
        None => MonthFilter::All,
    };
    Ok(Criteria::new(search, month))
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub direction: Direction,
    pub investment: bool,
}

impl TransactionRow {
    pub fn new(txn: &Transaction, categories: &[Category]) -> Self {
        TransactionRow {
            id: txn.id,
            date: txn.date.clone(),
            description: txn.description.clone(),
            category: display_category(txn, categories).to_string(),
            amount: txn.amount.to_string(),
            direction: txn.direction,
            investment: txn.investment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthRows {
    pub month: String,
    pub label: String,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Serialize)]
pub struct TransactionListing {
    pub groups: Vec<MonthRows>,
    pub totals: Totals,
    pub unparsed: usize,
}

impl TransactionListing {
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

pub fn query_rows(
    ledger: &SqliteLedger,
    sub: &clap::ArgMatches,
    settings: &Settings,
) -> Result<TransactionListing> {
    let criteria = criteria_from(sub)?;
    let transactions = ledger.list_transactions()?;
    let categories = ledger.list_categories()?;

    let mut selected = filter(&transactions, &criteria);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        selected.truncate(*limit);
    }
    let totals = aggregate(selected.iter().copied());
    let grouping = group_by_month(selected.iter().copied(), settings.locale);

    let groups = grouping
        .groups
        .into_iter()
        .map(|g| MonthRows {
            month: g.key.to_string(),
            label: g.label,
            rows: g
                .transactions
                .into_iter()
                .map(|t| TransactionRow::new(t, &categories))
                .collect(),
        })
        .collect();
    Ok(TransactionListing {
        groups,
        totals,
        unparsed: grouping.unparsed,
    })
}

pub fn totals_table(totals: &Totals, settings: &Settings) -> comfy_table::Table {
    let money = |d: &Decimal| fmt_money(d, &settings.currency, settings.locale);
    pretty_table(
        &["Income", "Expense", "Balance", "Invested"],
        vec![vec![
            money(&totals.income),
            money(&totals.expense),
            money(&totals.balance),
            money(&totals.invested),
        ]],
    )
}

fn list(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let settings = settings::load(ledger.conn())?;
    let listing = query_rows(ledger, sub, &settings)?;
    if maybe_print_json(json_flag, jsonl_flag, &listing)? {
        return Ok(());
    }

    if listing.groups.is_empty() {
        println!("No transactions found.");
    }
    for group in &listing.groups {
        println!("{} ({})", group.label, group.month);
        let rows: Vec<Vec<String>> = group
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Category", "Amount"], rows)
        );
    }
    println!("{}", totals_table(&listing.totals, &settings));
    if listing.unparsed > 0 {
        println!(
            "{} transaction(s) not shown: unreadable date (see `caixa doctor`)",
            listing.unparsed
        );
    }
    Ok(())
}

fn months(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let settings = settings::load(ledger.conn())?;
    let transactions = ledger.list_transactions()?;
    let data: Vec<Vec<String>> = available_months(&transactions)
        .into_iter()
        .map(|k| vec![k.to_string(), k.label(settings.locale)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Month", "Label"], data));
    }
    Ok(())
}

fn set_category(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let category = match (sub.get_one::<String>("category"), sub.get_flag("clear")) {
        (Some(c), _) if !c.trim().is_empty() => Some(c.trim().to_string()),
        (_, true) => None,
        _ => bail!("Pass --category NAME or --clear"),
    };
    let categories = ledger.list_categories()?;
    if let Some(name) = category.as_deref() {
        if !categories.iter().any(|c| c.name == name) {
            tracing::warn!(category = name, "category does not exist; row will show as uncategorized");
        }
    }
    let txn = ledger
        .update_transaction(id, &category_patch(category, &categories))
        .with_context(|| format!("Update category of transaction {}", id))?;
    println!(
        "Transaction {} now in '{}'",
        txn.id,
        display_category(&txn, &categories)
    );
    Ok(())
}

fn clear(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    if !(sub.get_flag("yes") && sub.get_flag("really")) {
        bail!("Refusing to delete every transaction: pass both --yes and --really (this cannot be undone)");
    }
    let n = ledger.delete_all_transactions()?;
    println!("Deleted {} transaction(s)", n);
    Ok(())
}
