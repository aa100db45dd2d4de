// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Locale, MonthKey, Transaction};

#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup<'a> {
    pub key: MonthKey,
    pub label: String,
    pub transactions: Vec<&'a Transaction>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Grouping<'a> {
    pub groups: Vec<MonthGroup<'a>>,
    pub unparsed: usize,
}

pub fn group_by_month<'a, I>(transactions: I, locale: Locale) -> Grouping<'a>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<MonthKey, Vec<&'a Transaction>> = BTreeMap::new();
    let mut unparsed = 0usize;
    for txn in transactions {
        match txn.month_key() {
            Some(key) => buckets.entry(key).or_default().push(txn),
            None => {
                tracing::warn!(id = txn.id, date = %txn.date, "skipping transaction with unreadable date");
                unparsed += 1;
            }
        }
    }

    let groups = buckets
        .into_iter()
        .rev()
        .map(|(key, transactions)| MonthGroup {
            key,
            label: key.label(locale),
            transactions,
        })
        .collect();
    Grouping { groups, unparsed }
}
