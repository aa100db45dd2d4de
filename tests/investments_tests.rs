// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caixa::aggregate::aggregate;
use caixa::commands::investments;
use caixa::investments::{
    is_approaching_maturity, is_within_window, maturity_alerts, record_investment_action,
    AlertWindow, InvestmentAction, InvestmentInput,
};
use caixa::models::{Direction, NewTransaction, Source};
use caixa::settings::Settings;
use caixa::store::{Ledger, SqliteLedger};
use caixa::utils::days_until;
use caixa::{cli, Error};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn input(action: InvestmentAction, amount: &str) -> InvestmentInput {
    InvestmentInput {
        action,
        amount: amount.to_string(),
        date: d("2024-01-10"),
        description: "CDB Banco Inter".to_string(),
        maturity_date: Some(d("2025-01-10")),
    }
}

#[test]
fn maturity_window_boundaries() {
    let today = d("2024-03-01");
    assert!(is_approaching_maturity(d("2024-03-31"), today));
    assert!(!is_approaching_maturity(d("2024-04-01"), today));
    assert!(!is_approaching_maturity(d("2024-02-28"), today));
    assert!(is_approaching_maturity(d("2024-02-29"), today));
    assert!(is_approaching_maturity(d("2024-03-01"), today));
}

#[test]
fn custom_window_is_honoured() {
    let window = AlertWindow {
        days_past: 0,
        days_ahead: 7,
    };
    let today = d("2024-03-01");
    assert!(is_within_window(d("2024-03-08"), today, window));
    assert!(!is_within_window(d("2024-03-09"), today, window));
    assert!(!is_within_window(d("2024-02-29"), today, window));
}

#[test]
fn days_until_rounds_partial_days_up() {
    let late_evening = d("2024-03-01").and_hms_opt(23, 59, 0).unwrap();
    assert_eq!(days_until(d("2024-03-02"), late_evening), 1);
    let noon = d("2024-03-01").and_hms_opt(12, 0, 0).unwrap();
    assert_eq!(days_until(d("2024-03-01"), noon), 0);
    assert_eq!(days_until(d("2024-02-29"), noon), -1);
    let midnight = d("2024-03-01").and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(days_until(d("2024-03-31"), midnight), 30);
}

#[test]
fn contribution_is_recorded_as_outflow() {
    let new = record_investment_action(&input(InvestmentAction::Contribution, "500")).unwrap();
    assert_eq!(new.amount, dec!(-500));
    assert_eq!(new.direction, Direction::Expense);
    assert!(new.investment);
    assert_eq!(new.category.as_deref(), Some("Investments"));
    assert_eq!(new.source, Source::Manual);
    assert_eq!(new.maturity_date, Some(d("2025-01-10")));
}

#[test]
fn withdrawal_is_recorded_as_inflow() {
    let new = record_investment_action(&input(InvestmentAction::Withdrawal, "49,13")).unwrap();
    assert_eq!(new.amount, dec!(49.13));
    assert_eq!(new.direction, Direction::Income);
    assert!(new.investment);
}

#[test]
fn bad_amounts_are_rejected() {
    for raw in ["-5", "abc", ""] {
        let err = record_investment_action(&input(InvestmentAction::Contribution, raw)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "{raw}: {err:?}");
    }
}

#[test]
fn blank_description_is_rejected() {
    let mut i = input(InvestmentAction::Contribution, "10");
    i.description = "   ".into();
    assert!(matches!(
        record_investment_action(&i),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn action_names_parse() {
    assert_eq!(
        "contribution".parse::<InvestmentAction>().unwrap(),
        InvestmentAction::Contribution
    );
    assert_eq!(
        "Resgate".parse::<InvestmentAction>().unwrap(),
        InvestmentAction::Withdrawal
    );
    assert!("transfer".parse::<InvestmentAction>().is_err());
}

#[test]
fn recorded_actions_round_trip_through_the_ledger() {
    let ledger = SqliteLedger::open_in_memory().unwrap();
    let mut add = input(InvestmentAction::Contribution, "500");
    ledger
        .create_transaction(&record_investment_action(&add).unwrap())
        .unwrap();
    add.action = InvestmentAction::Withdrawal;
    add.amount = "200".into();
    add.date = d("2024-02-10");
    ledger
        .create_transaction(&record_investment_action(&add).unwrap())
        .unwrap();

    let all = ledger.list_transactions().unwrap();
    assert_eq!(aggregate(&all).invested, dec!(300));
}

fn investment_row(date: &str, maturity: Option<&str>) -> NewTransaction {
    NewTransaction {
        date: d(date),
        description: format!("Tesouro {}", date),
        amount: dec!(-100),
        category: Some("Investments".into()),
        direction: Direction::Expense,
        investment: true,
        maturity_date: maturity.map(d),
        source: Source::Manual,
    }
}

#[test]
fn alerts_are_sorted_by_maturity_and_skip_plain_rows() {
    let ledger = SqliteLedger::open_in_memory().unwrap();
    ledger
        .create_transaction(&investment_row("2023-01-01", Some("2024-03-20")))
        .unwrap();
    ledger
        .create_transaction(&investment_row("2023-02-01", Some("2024-03-05")))
        .unwrap();
    ledger
        .create_transaction(&investment_row("2023-03-01", Some("2025-01-01")))
        .unwrap();
    ledger
        .create_transaction(&investment_row("2023-04-01", None))
        .unwrap();
    // a maturity on a non-investment row never alerts
    let mut plain = investment_row("2023-05-01", Some("2024-03-02"));
    plain.investment = false;
    ledger.create_transaction(&plain).unwrap();

    let all = ledger.list_transactions().unwrap();
    let due = maturity_alerts(&all, d("2024-03-01"), AlertWindow::default());
    let maturities: Vec<NaiveDate> = due.iter().filter_map(|t| t.maturity_date).collect();
    assert_eq!(maturities, vec![d("2024-03-05"), d("2024-03-20")]);
}

#[test]
fn invest_list_totals_the_selected_month() {
    let ledger = SqliteLedger::open_in_memory().unwrap();
    let cli = cli::build_cli();
    for args in [
        vec!["caixa", "invest", "add", "--action", "contribution", "--amount", "500", "--date", "2024-01-10", "--description", "CDB", "--maturity", "2024-03-20"],
        vec!["caixa", "invest", "add", "--action", "withdrawal", "--amount", "200", "--date", "2024-02-10", "--description", "CDB resgate"],
        vec!["caixa", "invest", "add", "--action", "contribution", "--amount", "50", "--date", "2024-02-15", "--description", "Tesouro"],
    ] {
        let matches = cli.clone().get_matches_from(args);
        if let Some(("invest", invest_m)) = matches.subcommand() {
            investments::handle(&ledger, invest_m).unwrap();
        } else {
            panic!("invest command not parsed");
        }
    }

    let matches = cli.clone().get_matches_from([
        "caixa", "invest", "list", "--month", "2024-02", "--today", "2024-03-01",
    ]);
    let Some(("invest", invest_m)) = matches.subcommand() else {
        panic!("invest command not parsed");
    };
    let Some(("list", list_m)) = invest_m.subcommand() else {
        panic!("no list subcommand");
    };
    let listing = investments::query_investments(&ledger, list_m, &Settings::default()).unwrap();
    assert_eq!(listing.rows.len(), 2);
    assert_eq!(listing.invested, dec!(-150));
    assert_eq!(listing.months, vec!["2024-02".to_string(), "2024-01".to_string()]);

    let matches = cli.get_matches_from(["caixa", "invest", "list", "--today", "2024-03-01"]);
    let Some(("invest", invest_m)) = matches.subcommand() else {
        panic!("invest command not parsed");
    };
    let Some(("list", list_m)) = invest_m.subcommand() else {
        panic!("no list subcommand");
    };
    let listing = investments::query_investments(&ledger, list_m, &Settings::default()).unwrap();
    assert_eq!(listing.invested, dec!(350));
    let cdb = listing.rows.iter().find(|r| r.description == "CDB").unwrap();
    assert!(cdb.alert);
    assert_eq!(cdb.days_to_maturity, Some(19));
    assert_eq!(cdb.movement, dec!(500));
}

#[test]
fn invest_add_rejects_negative_amounts() {
    let ledger = SqliteLedger::open_in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "caixa", "invest", "add", "--action", "contribution", "--amount", "-10", "--date", "2024-01-10", "--description", "CDB",
    ]);
    let Some(("invest", invest_m)) = matches.subcommand() else {
        panic!("invest command not parsed");
    };
    assert!(investments::handle(&ledger, invest_m).is_err());
    assert!(ledger.list_transactions().unwrap().is_empty());
}
