// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{aggregate, investment_delta};
use crate::filter::available_months;
use crate::investments::{
    is_within_window, maturity_alerts, record_investment_action, InvestmentAction,
    InvestmentInput,
};
use crate::models::{MonthFilter, Transaction};
use crate::settings::{self, Settings};
use crate::store::{Ledger, SqliteLedger};
use crate::utils::{days_until, fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle(ledger: &SqliteLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("alerts", sub)) => alerts(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn optional_date(sub: &clap::ArgMatches, id: &str) -> Result<Option<NaiveDate>> {
    match sub.get_one::<String>(id).map(|s| s.trim()) {
        Some(raw) if !raw.is_empty() => Ok(Some(parse_date(raw)?)),
        _ => Ok(None),
    }
}

pub fn reference_day(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    Ok(optional_date(sub, "today")?.unwrap_or_else(|| Local::now().date_naive()))
}

fn add(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let input = InvestmentInput {
        action: sub
            .get_one::<String>("action")
            .unwrap()
            .parse::<InvestmentAction>()?,
        amount: sub.get_one::<String>("amount").unwrap().to_string(),
        date: optional_date(sub, "date")?.unwrap_or_else(|| Local::now().date_naive()),
        description: sub.get_one::<String>("description").unwrap().to_string(),
        maturity_date: optional_date(sub, "maturity")?,
    };
    let new = record_investment_action(&input)?;
    let txn = ledger.create_transaction(&new)?;
    println!(
        "Recorded {:?} #{} of {} on {}",
        input.action,
        txn.id,
        txn.amount.abs(),
        txn.date
    );
    Ok(())
}

fn days_to(maturity: NaiveDate, today: NaiveDate) -> i64 {
    days_until(maturity, today.and_time(NaiveTime::default()))
}

#[derive(Debug, Serialize)]
pub struct InvestmentRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub maturity_date: Option<NaiveDate>,
    pub days_to_maturity: Option<i64>,
    pub alert: bool,
    pub movement: Decimal,
}

#[derive(Debug, Serialize)]
pub struct InvestmentListing {
    pub month: String,
    pub months: Vec<String>,
    pub invested: Decimal,
    pub rows: Vec<InvestmentRow>,
}

pub fn query_investments(
    ledger: &SqliteLedger,
    sub: &clap::ArgMatches,
    settings: &Settings,
) -> Result<InvestmentListing> {
    let today = reference_day(sub)?;
    let month = sub
        .get_one::<String>("month")
        .map(|s| s.parse::<MonthFilter>())
        .transpose()?
        .unwrap_or_default();

    let transactions = ledger.list_transactions()?;
    let investments: Vec<&Transaction> = transactions.iter().filter(|t| t.investment).collect();
    let selected: Vec<&Transaction> = investments
        .iter()
        .copied()
        .filter(|t| month.matches(t.month_key()))
        .collect();

    // invested for the selection only, not a running portfolio balance
    let invested = aggregate(selected.iter().copied()).invested;
    let rows = selected
        .iter()
        .map(|t| InvestmentRow {
            id: t.id,
            date: t.date.clone(),
            description: t.description.clone(),
            maturity_date: t.maturity_date,
            days_to_maturity: t.maturity_date.map(|m| days_to(m, today)),
            alert: t
                .maturity_date
                .is_some_and(|m| is_within_window(m, today, settings.alert_window)),
            movement: investment_delta(t),
        })
        .collect();

    Ok(InvestmentListing {
        month: month.to_string(),
        months: available_months(investments.iter().copied())
            .into_iter()
            .map(|k| k.to_string())
            .collect(),
        invested,
        rows,
    })
}

fn list(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let settings = settings::load(ledger.conn())?;
    let listing = query_investments(ledger, sub, &settings)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &listing)? {
        return Ok(());
    }
    let money = |d: &Decimal| fmt_money(d, &settings.currency, settings.locale);

    let data: Vec<Vec<String>> = listing
        .rows
        .iter()
        .map(|r| {
            let sign = if r.movement.is_sign_negative() { "-" } else { "+" };
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.description.clone(),
                r.maturity_date
                    .map(|m| if r.alert { format!("{} (!)", m) } else { m.to_string() })
                    .unwrap_or_else(|| "-".into()),
                format!("{} {}", sign, money(&r.movement.abs())),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Description", "Maturity", "Amount"], data)
    );
    println!("Total ({}): {}", listing.month, money(&listing.invested));
    Ok(())
}

fn alerts(ledger: &SqliteLedger, sub: &clap::ArgMatches) -> Result<()> {
    let settings = settings::load(ledger.conn())?;
    let today = reference_day(sub)?;
    let transactions = ledger.list_transactions()?;
    let due = maturity_alerts(&transactions, today, settings.alert_window);

    let data: Vec<Vec<String>> = due
        .iter()
        .filter_map(|t| {
            let m = t.maturity_date?;
            Some(vec![
                t.id.to_string(),
                t.description.clone(),
                m.to_string(),
                days_to(m, today).to_string(),
            ])
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!(
            "No maturities between {} and {} days from {}",
            -settings.alert_window.days_past,
            settings.alert_window.days_ahead,
            today
        );
    } else {
        println!(
            "{}",
            pretty_table(&["ID", "Description", "Maturity", "Days"], data)
        );
    }
    Ok(())
}
