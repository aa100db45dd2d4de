// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caixa::filter::{available_months, filter, matches_search, Criteria};
use caixa::models::{Direction, MonthFilter, MonthKey, Source, Transaction};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn txn(id: i64, date: &str, description: &str, amount: Decimal, category: Option<&str>) -> Transaction {
    Transaction {
        id,
        date: date.to_string(),
        description: description.to_string(),
        amount,
        category: category.map(str::to_string),
        direction: if amount.is_sign_negative() {
            Direction::Expense
        } else {
            Direction::Income
        },
        investment: false,
        maturity_date: None,
        source: Source::Statement,
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        txn(1, "2024-08-12", "SUPERMERCADO EXTRA", dec!(-230.45), Some("Food")),
        txn(2, "2024-08-05", "Salário agosto", dec!(5000), Some("Income")),
        txn(3, "2024-04-20", "Uber *trip", dec!(-32.10), Some("Transport")),
        txn(4, "2024-04-02", "Aluguel", dec!(-1800.00), None),
    ]
}

fn month(s: &str) -> MonthFilter {
    s.parse().unwrap()
}

fn ids(rows: &[&Transaction]) -> Vec<i64> {
    rows.iter().map(|t| t.id).collect()
}

#[test]
fn empty_search_and_all_months_keeps_everything() {
    let rows = sample();
    let out = filter(&rows, &Criteria::default());
    assert_eq!(ids(&out), vec![1, 2, 3, 4]);
}

#[test]
fn search_is_case_insensitive_over_description() {
    let rows = sample();
    let out = filter(&rows, &Criteria::new("mercado", MonthFilter::All));
    assert_eq!(ids(&out), vec![1]);
    let out = filter(&rows, &Criteria::new("UBER", MonthFilter::All));
    assert_eq!(ids(&out), vec![3]);
}

#[test]
fn search_reaches_category_date_and_amount() {
    let rows = sample();
    assert_eq!(ids(&filter(&rows, &Criteria::new("transp", MonthFilter::All))), vec![3]);
    assert_eq!(ids(&filter(&rows, &Criteria::new("2024-04", MonthFilter::All))), vec![3, 4]);
    assert_eq!(ids(&filter(&rows, &Criteria::new("230.45", MonthFilter::All))), vec![1]);
    // trailing zeros are not part of the written amount
    assert_eq!(ids(&filter(&rows, &Criteria::new("1800", MonthFilter::All))), vec![4]);
}

#[test]
fn missing_category_does_not_match_anything() {
    let row = txn(1, "2024-04-02", "Aluguel", dec!(-1800), None);
    assert!(!matches_search(&row, "uncategorized"));
    assert!(matches_search(&row, ""));
}

#[test]
fn month_filter_selects_one_calendar_month() {
    let rows = sample();
    let out = filter(&rows, &Criteria::new("", month("2024-04")));
    assert_eq!(ids(&out), vec![3, 4]);
    let out = filter(&rows, &Criteria::new("", month("2023-04")));
    assert!(out.is_empty());
}

#[test]
fn search_and_month_combine() {
    let rows = sample();
    let out = filter(&rows, &Criteria::new("a", month("2024-08")));
    assert_eq!(ids(&out), vec![1, 2]);
    let out = filter(&rows, &Criteria::new("uber", month("2024-08")));
    assert!(out.is_empty());
}

#[test]
fn unreadable_dates_only_pass_the_all_filter() {
    let mut rows = sample();
    rows.push(txn(5, "garbage", "Mystery", dec!(-1), None));
    assert_eq!(ids(&filter(&rows, &Criteria::new("mystery", MonthFilter::All))), vec![5]);
    assert!(filter(&rows, &Criteria::new("mystery", month("2024-08"))).is_empty());
}

#[test]
fn filtering_does_not_touch_the_input() {
    let rows = sample();
    let before = rows.clone();
    let _ = filter(&rows, &Criteria::new("uber", month("2024-04")));
    assert_eq!(rows, before);
}

#[test]
fn available_months_are_chronological_not_alphabetical() {
    let rows = sample();
    let months = available_months(&rows);
    // "Abril" sorts before "Agosto" by name, but August is more recent
    assert_eq!(
        months,
        vec![MonthKey::new(2024, 8).unwrap(), MonthKey::new(2024, 4).unwrap()]
    );
}

#[test]
fn month_filter_parses_all_and_rejects_garbage() {
    assert_eq!(month("all"), MonthFilter::All);
    assert_eq!(month("ALL"), MonthFilter::All);
    assert_eq!(
        month("2024-3"),
        MonthFilter::Month(MonthKey::new(2024, 3).unwrap())
    );
    assert!("2024-13".parse::<MonthFilter>().is_err());
    assert!("March".parse::<MonthFilter>().is_err());
    assert_eq!(month("2024-03").to_string(), "2024-03");
}
