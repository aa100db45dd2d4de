// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorize::resolve_category;
use crate::store::{Ledger, SqliteLedger};
use crate::utils::pretty_table;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub code: &'static str,
    pub detail: String,
}

pub fn find_issues(ledger: &SqliteLedger) -> Result<Vec<Issue>> {
    let transactions = ledger.list_transactions()?;
    let categories = ledger.list_categories()?;
    let mut issues = Vec::new();

    for t in &transactions {
        // 1) Dates grouping and month filters cannot place
        if t.parsed_date().is_none() {
            issues.push(Issue {
                code: "unreadable_date",
                detail: format!("#{} '{}'", t.id, t.date),
            });
        }
        // 2) Sign and direction pointing different ways
        if !t.sign_agrees() {
            issues.push(Issue {
                code: "sign_mismatch",
                detail: format!("#{} {} recorded as {}", t.id, t.amount, t.direction.as_str()),
            });
        }
        // 3) Category names that no longer exist
        if let Some(name) = t.category.as_deref() {
            if resolve_category(t, &categories).is_none() {
                issues.push(Issue {
                    code: "dangling_category",
                    detail: format!("#{} '{}'", t.id, name),
                });
            }
        }
    }
    Ok(issues)
}

pub fn handle(ledger: &SqliteLedger) -> Result<()> {
    let issues = find_issues(ledger)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.code.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
