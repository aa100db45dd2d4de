// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Direction, Kind, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub invested: Decimal,
}

// the stored sign is ignored in favour of `direction`
pub fn investment_delta(txn: &Transaction) -> Decimal {
    match txn.direction {
        Direction::Expense => txn.amount.abs(),
        Direction::Income => -txn.amount.abs(),
    }
}

pub fn aggregate<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    let mut count = 0usize;
    for txn in transactions {
        count += 1;
        if !txn.sign_agrees() {
            tracing::warn!(
                id = txn.id,
                amount = %txn.amount,
                direction = txn.direction.as_str(),
                "amount sign disagrees with direction; using direction and |amount|"
            );
        }
        match txn.kind() {
            Kind::Income => totals.income += txn.amount.abs(),
            Kind::Expense => totals.expense += txn.amount.abs(),
            Kind::Investment => totals.invested += investment_delta(txn),
        }
    }
    totals.balance = totals.income - totals.expense;
    tracing::debug!(count, income = %totals.income, expense = %totals.expense, invested = %totals.invested, "aggregated transactions");
    totals
}
