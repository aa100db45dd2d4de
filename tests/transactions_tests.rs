// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caixa::aggregate::aggregate;
use caixa::models::{CategoryType, Direction, NewCategory, NewTransaction, Source};
use caixa::settings;
use caixa::store::{Ledger, SqliteLedger};
use caixa::{cli, commands::transactions};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn setup() -> SqliteLedger {
    let ledger = SqliteLedger::open_in_memory().unwrap();
    ledger
        .create_category(&NewCategory {
            name: "Food".into(),
            kind: CategoryType::Expense,
        })
        .unwrap();
    let rows = [
        ("2024-01-15", "Padaria", dec!(-100), Direction::Expense, Some("Food")),
        ("2024-01-20", "Salário", dec!(300), Direction::Income, None),
        ("2024-02-01", "Farmácia", dec!(-50), Direction::Expense, None),
    ];
    for (date, description, amount, direction, category) in rows {
        ledger
            .create_transaction(&NewTransaction {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                description: description.into(),
                amount,
                category: category.map(str::to_string),
                direction,
                investment: false,
                maturity_date: None,
                source: Source::Manual,
            })
            .unwrap();
    }
    ledger
}

fn run(ledger: &SqliteLedger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["caixa", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => transactions::handle(ledger, tx_m),
        _ => panic!("no tx subcommand"),
    }
}

fn listing(ledger: &SqliteLedger, args: &[&str]) -> transactions::TransactionListing {
    let mut argv = vec!["caixa", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let settings = settings::load(ledger.conn()).unwrap();
            return transactions::query_rows(ledger, list_m, &settings).unwrap();
        }
        panic!("no list subcommand");
    }
    panic!("no tx subcommand");
}

#[test]
fn list_groups_months_newest_first_with_totals() {
    let ledger = setup();
    let out = listing(&ledger, &[]);
    let months: Vec<&str> = out.groups.iter().map(|g| g.month.as_str()).collect();
    assert_eq!(months, vec!["2024-02", "2024-01"]);
    assert_eq!(out.groups[0].label, "Fevereiro 2024");
    assert_eq!(out.totals.income, dec!(300));
    assert_eq!(out.totals.expense, dec!(150));
    assert_eq!(out.totals.balance, dec!(150));
    assert_eq!(out.unparsed, 0);
}

#[test]
fn list_shows_uncategorized_for_missing_categories() {
    let ledger = setup();
    let out = listing(&ledger, &["--month", "2024-01"]);
    let cats: Vec<&str> = out.groups[0].rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(cats, vec!["Uncategorized", "Food"]);
}

#[test]
fn list_limit_respected() {
    let ledger = setup();
    let out = listing(&ledger, &["--limit", "2"]);
    assert_eq!(out.row_count(), 2);
    assert_eq!(out.groups[0].rows[0].date, "2024-02-01");
    // totals follow what is shown
    assert_eq!(out.totals.expense, dec!(50));
    assert_eq!(out.totals.income, dec!(300));
}

#[test]
fn list_month_and_search_narrow_the_totals() {
    let ledger = setup();
    let out = listing(&ledger, &["--month", "2024-01", "--search", "padaria"]);
    assert_eq!(out.row_count(), 1);
    assert_eq!(out.totals.expense, dec!(100));
    assert_eq!(out.totals.income, Decimal::ZERO);
    assert_eq!(out.totals.balance, dec!(-100));

    let out = listing(&ledger, &["--month", "2023-01"]);
    assert!(out.groups.is_empty());
    assert_eq!(out.totals.balance, Decimal::ZERO);
}

#[test]
fn list_rejects_a_malformed_month() {
    let ledger = setup();
    let matches = cli::build_cli().get_matches_from(["caixa", "tx", "list", "--month", "Jan"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let settings = settings::load(ledger.conn()).unwrap();
    assert!(transactions::query_rows(&ledger, list_m, &settings).is_err());
}

#[test]
fn add_applies_sign_and_keyword_category() {
    let ledger = SqliteLedger::open_in_memory().unwrap();
    run(
        &ledger,
        &[
            "add", "--date", "2024-03-05", "--description", "Uber centro", "--amount", "23,90",
            "--kind", "expense",
        ],
    )
    .unwrap();
    let rows = ledger.list_transactions().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(-23.90));
    assert_eq!(rows[0].direction, Direction::Expense);
    assert_eq!(rows[0].category.as_deref(), Some("Transport"));
    assert!(!rows[0].investment);
}

#[test]
fn add_into_investment_category_sets_the_flag() {
    let ledger = SqliteLedger::open_in_memory().unwrap();
    ledger
        .create_category(&NewCategory {
            name: "Tesouro".into(),
            kind: CategoryType::Investment,
        })
        .unwrap();
    run(
        &ledger,
        &[
            "add", "--date", "2024-03-05", "--description", "Aporte", "--amount", "100", "--kind",
            "expense", "--category", "Tesouro",
        ],
    )
    .unwrap();
    let rows = ledger.list_transactions().unwrap();
    assert!(rows[0].investment);
    assert_eq!(rows[0].amount, dec!(-100));
}

#[test]
fn set_category_and_clear() {
    let ledger = setup();
    let id = ledger.list_transactions().unwrap()[0].id;
    run(&ledger, &["set-category", "--id", &id.to_string(), "--category", "Food"]).unwrap();
    assert_eq!(ledger.transaction(id).unwrap().category.as_deref(), Some("Food"));

    run(&ledger, &["set-category", "--id", &id.to_string(), "--clear"]).unwrap();
    assert_eq!(ledger.transaction(id).unwrap().category, None);

    assert!(run(&ledger, &["set-category", "--id", &id.to_string()]).is_err());
    assert!(run(&ledger, &["set-category", "--id", "999", "--category", "Food"]).is_err());
}

#[test]
fn recategorize_command_fills_keywords() {
    let ledger = setup();
    run(&ledger, &["recategorize"]).unwrap();
    let rows = ledger.list_transactions().unwrap();
    let pharmacy = rows.iter().find(|t| t.description == "Farmácia").unwrap();
    let salary = rows.iter().find(|t| t.description == "Salário").unwrap();
    // "farmacia" has no accent in the keyword table
    assert_eq!(pharmacy.category, None);
    assert_eq!(salary.category.as_deref(), Some("Income"));
}

#[test]
fn clear_requires_double_confirmation() {
    let ledger = setup();
    assert!(run(&ledger, &["clear"]).is_err());
    assert!(run(&ledger, &["clear", "--yes"]).is_err());
    assert_eq!(ledger.list_transactions().unwrap().len(), 3);

    run(&ledger, &["clear", "--yes", "--really"]).unwrap();
    assert!(ledger.list_transactions().unwrap().is_empty());
}

#[test]
fn rm_deletes_one_row() {
    let ledger = setup();
    let id = ledger.list_transactions().unwrap()[0].id;
    run(&ledger, &["rm", "--id", &id.to_string()]).unwrap();
    assert_eq!(ledger.list_transactions().unwrap().len(), 2);
    assert!(run(&ledger, &["rm", "--id", &id.to_string()]).is_err());
}

#[test]
fn moving_out_of_investments_restores_the_expense() {
    let ledger = setup();
    let pharmacy = ledger
        .list_transactions()
        .unwrap()
        .into_iter()
        .find(|t| t.description == "Farmácia")
        .unwrap();
    let id = pharmacy.id.to_string();

    run(&ledger, &["set-category", "--id", &id, "--category", "Investments"]).unwrap();
    assert!(ledger.transaction(pharmacy.id).unwrap().investment);
    let totals = aggregate(&ledger.list_transactions().unwrap());
    assert_eq!(totals.expense, dec!(100));
    assert_eq!(totals.invested, dec!(50));

    run(&ledger, &["set-category", "--id", &id, "--category", "Food"]).unwrap();
    assert!(!ledger.transaction(pharmacy.id).unwrap().investment);
    let totals = aggregate(&ledger.list_transactions().unwrap());
    assert_eq!(totals.expense, dec!(150));
    assert_eq!(totals.invested, Decimal::ZERO);

    run(&ledger, &["set-category", "--id", &id, "--category", "Investments"]).unwrap();
    run(&ledger, &["set-category", "--id", &id, "--clear"]).unwrap();
    let t = ledger.transaction(pharmacy.id).unwrap();
    assert_eq!(t.category, None);
    assert!(!t.investment);
    assert_eq!(aggregate(&ledger.list_transactions().unwrap()).expense, dec!(150));
}

#[test]
fn list_limit_uses_calendar_order_for_statement_dates() {
    let ledger = setup();
    ledger
        .conn()
        .execute(
            "INSERT INTO transactions(date, description, amount, direction) VALUES ('10/02/2024', 'Posto', '-80', 'expense')",
            [],
        )
        .unwrap();
    let out = listing(&ledger, &["--limit", "1"]);
    assert_eq!(out.row_count(), 1);
    assert_eq!(out.groups[0].rows[0].description, "Posto");
}
