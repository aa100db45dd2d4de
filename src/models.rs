// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::utils::parse_flexible_date;

pub const INVESTMENTS_CATEGORY: &str = "Investments";

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }

    pub fn signed(&self, magnitude: Decimal) -> Decimal {
        match self {
            Direction::Income => magnitude.abs(),
            Direction::Expense => -magnitude.abs(),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Direction::Income),
            "expense" => Ok(Direction::Expense),
            other => Err(Error::InvalidInput(format!(
                "unknown direction '{}', expected income|expense",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
    Investment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Manual,
    Statement,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Manual => "manual",
            Source::Statement => "statement",
        }
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Source::Manual),
            "statement" => Ok(Source::Statement),
            other => Err(Error::InvalidInput(format!("unknown source '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: String,
    pub description: String,
    // negative = money leaving the household
    pub amount: Decimal,
    pub category: Option<String>,
    pub direction: Direction,
    pub investment: bool,
    pub maturity_date: Option<NaiveDate>,
    pub source: Source,
}

impl Transaction {
    pub fn kind(&self) -> Kind {
        if self.investment {
            return Kind::Investment;
        }
        match self.direction {
            Direction::Income => Kind::Income,
            Direction::Expense => Kind::Expense,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_flexible_date(&self.date)
    }

    pub fn month_key(&self) -> Option<MonthKey> {
        self.parsed_date().map(MonthKey::from_date)
    }

    pub fn sign_agrees(&self) -> bool {
        if self.amount.is_zero() {
            return true;
        }
        match self.direction {
            Direction::Income => self.amount > Decimal::ZERO,
            Direction::Expense => self.amount < Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub direction: Direction,
    pub investment: bool,
    pub maturity_date: Option<NaiveDate>,
    pub source: Source,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    /// `Some(None)` clears the category.
    pub category: Option<Option<String>>,
    pub direction: Option<Direction>,
    pub investment: Option<bool>,
    pub maturity_date: Option<Option<NaiveDate>>,
}

impl TransactionPatch {
    pub fn category(category: Option<String>) -> Self {
        TransactionPatch {
            category: Some(category),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Expense,
    Income,
    Investment,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Expense => "expense",
            CategoryType::Income => "income",
            CategoryType::Investment => "investment",
        }
    }
}

impl FromStr for CategoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(CategoryType::Expense),
            "income" => Ok(CategoryType::Income),
            "investment" => Ok(CategoryType::Investment),
            other => Err(Error::InvalidInput(format!(
                "unknown category type '{}', expected expense|income|investment",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Ok(Locale::PtBr),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(Error::InvalidInput(format!(
                "unknown locale '{}', expected pt-BR|en",
                other
            ))),
        }
    }
}

const MONTHS_PT_BR: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(MonthKey { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn label(&self, locale: Locale) -> String {
        let names = match locale {
            Locale::PtBr => &MONTHS_PT_BR,
            Locale::En => &MONTHS_EN,
        };
        let idx = (self.month.clamp(1, 12) - 1) as usize;
        format!("{} {}", names[idx], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (y, m) = raw
            .split_once('-')
            .ok_or_else(|| Error::InvalidMonth(raw.to_string()))?;
        if y.len() != 4 || m.is_empty() || m.len() > 2 {
            return Err(Error::InvalidMonth(raw.to_string()));
        }
        let year: i32 = y.parse().map_err(|_| Error::InvalidMonth(raw.to_string()))?;
        let month: u32 = m.parse().map_err(|_| Error::InvalidMonth(raw.to_string()))?;
        MonthKey::new(year, month).ok_or_else(|| Error::InvalidMonth(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(MonthKey),
}

impl MonthFilter {
    pub fn matches(&self, key: Option<MonthKey>) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(wanted) => key == Some(*wanted),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        s.parse::<MonthKey>().map(MonthFilter::Month)
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Month(key) => key.fmt(f),
        }
    }
}
