// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use crate::models::{MonthFilter, MonthKey, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search: String,
    pub month: MonthFilter,
}

impl Criteria {
    pub fn new(search: impl Into<String>, month: MonthFilter) -> Self {
        Criteria {
            search: search.into(),
            month,
        }
    }
}

pub fn matches_search(txn: &Transaction, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    txn.description.to_lowercase().contains(&needle)
        || txn
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&needle))
        || txn.date.to_lowercase().contains(&needle)
        || txn.amount.normalize().to_string().contains(&needle)
}

pub fn filter<'a>(transactions: &'a [Transaction], criteria: &Criteria) -> Vec<&'a Transaction> {
    let selected: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| matches_search(t, &criteria.search) && criteria.month.matches(t.month_key()))
        .collect();
    tracing::debug!(
        total = transactions.len(),
        selected = selected.len(),
        month = %criteria.month,
        "filtered transactions"
    );
    selected
}

pub fn available_months<'a, I>(transactions: I) -> Vec<MonthKey>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let keys: BTreeSet<MonthKey> = transactions
        .into_iter()
        .filter_map(Transaction::month_key)
        .collect();
    keys.into_iter().rev().collect()
}
