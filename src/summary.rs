// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, investment_delta, Totals};
use crate::models::{Kind, Transaction, UNCATEGORIZED};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub expenses_by_category: Vec<CategoryTotal>,
    pub investments_evolution: Vec<EvolutionPoint>,
    pub metrics: Totals,
}

pub fn expenses_by_category<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for txn in transactions {
        if txn.kind() != Kind::Expense {
            continue;
        }
        let name = txn.category.as_deref().unwrap_or(UNCATEGORIZED);
        *agg.entry(name).or_insert(Decimal::ZERO) += txn.amount.abs();
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(name, value)| CategoryTotal {
            name: name.to_string(),
            value,
        })
        .collect();
    items.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    items
}

pub fn investments_evolution<'a, I>(transactions: I) -> Vec<EvolutionPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows: Vec<(NaiveDate, &Transaction)> = transactions
        .into_iter()
        .filter(|t| t.investment)
        .filter_map(|t| t.parsed_date().map(|d| (d, t)))
        .collect();
    // stable: same-day rows keep their input order
    rows.sort_by_key(|(d, _)| *d);

    let mut accumulated = Decimal::ZERO;
    rows.into_iter()
        .map(|(date, txn)| {
            accumulated += investment_delta(txn);
            EvolutionPoint {
                date,
                value: accumulated,
            }
        })
        .collect()
}

pub fn dashboard_summary(transactions: &[Transaction]) -> DashboardSummary {
    DashboardSummary {
        expenses_by_category: expenses_by_category(transactions),
        investments_evolution: investments_evolution(transactions),
        metrics: aggregate(transactions),
    }
}
