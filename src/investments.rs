// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Direction, NewTransaction, Source, Transaction, INVESTMENTS_CATEGORY};
use crate::utils::{days_until, parse_decimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentAction {
    Contribution,
    Withdrawal,
}

impl InvestmentAction {
    pub fn direction(&self) -> Direction {
        match self {
            InvestmentAction::Contribution => Direction::Expense,
            InvestmentAction::Withdrawal => Direction::Income,
        }
    }
}

impl FromStr for InvestmentAction {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contribution" | "aporte" => Ok(InvestmentAction::Contribution),
            "withdrawal" | "resgate" => Ok(InvestmentAction::Withdrawal),
            other => Err(Error::InvalidInput(format!(
                "unknown investment action '{}', expected contribution|withdrawal",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentInput {
    pub action: InvestmentAction,
    pub amount: String,
    pub date: NaiveDate,
    pub description: String,
    pub maturity_date: Option<NaiveDate>,
}

pub fn record_investment_action(input: &InvestmentInput) -> Result<NewTransaction> {
    let magnitude: Decimal = parse_decimal(&input.amount).map_err(|_| {
        Error::InvalidInput(format!(
            "investment amount '{}' is not a number",
            input.amount.trim()
        ))
    })?;
    if magnitude.is_sign_negative() && !magnitude.is_zero() {
        return Err(Error::InvalidInput(format!(
            "investment amount must not be negative, got {}",
            input.amount.trim()
        )));
    }
    let description = input.description.trim();
    if description.is_empty() {
        return Err(Error::InvalidInput("description must not be empty".into()));
    }

    let direction = input.action.direction();
    Ok(NewTransaction {
        date: input.date,
        description: description.to_string(),
        amount: direction.signed(magnitude),
        category: Some(INVESTMENTS_CATEGORY.to_string()),
        direction,
        investment: true,
        maturity_date: input.maturity_date,
        source: Source::Manual,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertWindow {
    pub days_past: i64,
    pub days_ahead: i64,
}

impl Default for AlertWindow {
    fn default() -> Self {
        AlertWindow {
            days_past: 1,
            days_ahead: 30,
        }
    }
}

impl AlertWindow {
    pub fn contains(&self, days: i64) -> bool {
        (-self.days_past..=self.days_ahead).contains(&days)
    }
}

pub fn is_approaching_maturity(maturity: NaiveDate, today: NaiveDate) -> bool {
    is_within_window(maturity, today, AlertWindow::default())
}

pub fn is_within_window(maturity: NaiveDate, today: NaiveDate, window: AlertWindow) -> bool {
    window.contains(days_until(maturity, today.and_time(NaiveTime::default())))
}

pub fn maturity_alerts<'a, I>(
    transactions: I,
    today: NaiveDate,
    window: AlertWindow,
) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut due: Vec<(NaiveDate, &Transaction)> = transactions
        .into_iter()
        .filter(|t| t.investment)
        .filter_map(|t| t.maturity_date.map(|m| (m, t)))
        .filter(|(m, _)| is_within_window(*m, today, window))
        .collect();
    due.sort_by_key(|(m, _)| *m);
    due.into_iter().map(|(_, t)| t).collect()
}
