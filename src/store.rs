// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Reverse;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::categorize::{category_patch, resolve_category, Categorizer};
use crate::db::init_schema;
use crate::error::{Error, Result};
use crate::models::{
    Category, CategoryType, Direction, NewCategory, NewTransaction, Source, Transaction,
    TransactionPatch,
};
use crate::summary::{dashboard_summary, DashboardSummary};
use crate::utils::parse_flexible_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub created_count: usize,
    pub message: String,
}

pub trait StatementParser {
    fn accepts(&self, mime_type: &str) -> bool;
    fn parse(&self, bytes: &[u8]) -> Result<Vec<NewTransaction>>;
}

pub trait Ledger {
    /// Newest first.
    fn list_transactions(&self) -> Result<Vec<Transaction>>;
    fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction>;
    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction>;
    fn delete_transaction(&self, id: i64) -> Result<()>;
    /// Irreversible. Confirmation is the caller's job. Returns rows removed.
    fn delete_all_transactions(&self) -> Result<usize>;

    fn list_categories(&self) -> Result<Vec<Category>>;
    fn create_category(&self, new: &NewCategory) -> Result<Category>;
    fn update_category(&self, id: i64, changes: &NewCategory) -> Result<Category>;
    fn delete_category(&self, id: i64) -> Result<()>;

    fn ingest_statement(&self, bytes: &[u8], mime_type: &str) -> Result<IngestReport>;
    fn dashboard_summary(&self) -> Result<DashboardSummary>;
}

pub struct SqliteLedger {
    conn: Connection,
    parsers: Vec<Box<dyn StatementParser>>,
}

const TXN_COLUMNS: &str =
    "id, date, description, amount, category, direction, investment, maturity_date, source";

struct RawTransaction {
    id: i64,
    date: String,
    description: String,
    amount: String,
    category: Option<String>,
    direction: String,
    investment: bool,
    maturity_date: Option<String>,
    source: String,
}

impl RawTransaction {
    fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawTransaction {
            id: r.get(0)?,
            date: r.get(1)?,
            description: r.get(2)?,
            amount: r.get(3)?,
            category: r.get(4)?,
            direction: r.get(5)?,
            investment: r.get(6)?,
            maturity_date: r.get(7)?,
            source: r.get(8)?,
        })
    }

    fn into_transaction(self) -> Result<Transaction> {
        let amount = self.amount.parse::<Decimal>().map_err(|_| {
            Error::Corrupt(format!(
                "transaction {} has amount '{}'",
                self.id, self.amount
            ))
        })?;
        let direction = self.direction.parse::<Direction>().map_err(|_| {
            Error::Corrupt(format!(
                "transaction {} has direction '{}'",
                self.id, self.direction
            ))
        })?;
        let maturity_date = match self.maturity_date.as_deref() {
            None | Some("") => None,
            Some(raw) => {
                let parsed = parse_flexible_date(raw);
                if parsed.is_none() {
                    tracing::warn!(id = self.id, maturity = raw, "unreadable maturity date ignored");
                }
                parsed
            }
        };
        let source = self.source.parse::<Source>().unwrap_or_else(|_| {
            tracing::warn!(id = self.id, source = %self.source, "unknown source, treating as statement");
            Source::Statement
        });
        Ok(Transaction {
            id: self.id,
            date: self.date,
            description: self.description,
            amount,
            category: self.category.filter(|c| !c.trim().is_empty()),
            direction,
            investment: self.investment,
            maturity_date,
            source,
        })
    }
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::InvalidInput("description must not be empty".into()));
    }
    Ok(())
}

fn duplicate_or(err: rusqlite::Error, what: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            Error::Duplicate(what.to_string())
        }
        _ => Error::Storage(err),
    }
}

fn insert_transaction(conn: &Connection, new: &NewTransaction) -> Result<i64> {
    validate_description(&new.description)?;
    conn.execute(
        "INSERT INTO transactions(date, description, amount, category, direction, investment, maturity_date, source)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            new.date.to_string(),
            new.description.trim(),
            new.amount.to_string(),
            new.category.as_deref(),
            new.direction.as_str(),
            new.investment,
            new.maturity_date.map(|d| d.to_string()),
            new.source.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl SqliteLedger {
    pub fn new(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteLedger {
            conn,
            parsers: Vec::new(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        SqliteLedger::new(Connection::open_in_memory()?)
    }

    pub fn with_parser(mut self, parser: Box<dyn StatementParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn transaction(&self, id: i64) -> Result<Transaction> {
        let sql = format!("SELECT {} FROM transactions WHERE id=?1", TXN_COLUMNS);
        let raw = self
            .conn
            .query_row(&sql, params![id], RawTransaction::from_row)
            .optional()?
            .ok_or(Error::NotFound {
                entity: "transaction",
                id,
            })?;
        raw.into_transaction()
    }

    pub fn category(&self, id: i64) -> Result<Category> {
        let row: Option<(i64, String, String)> = self
            .conn
            .query_row(
                "SELECT id, name, type FROM categories WHERE id=?1",
                params![id],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .optional()?;
        let (id, name, kind) = row.ok_or(Error::NotFound {
            entity: "category",
            id,
        })?;
        Ok(Category {
            id,
            name,
            kind: parse_category_type(id, &kind)?,
        })
    }
}

fn parse_category_type(id: i64, raw: &str) -> Result<CategoryType> {
    raw.parse::<CategoryType>()
        .map_err(|_| Error::Corrupt(format!("category {} has type '{}'", id, raw)))
}

impl Ledger for SqliteLedger {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let sql = format!("SELECT {} FROM transactions", TXN_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], RawTransaction::from_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.into_transaction()?);
        }
        // by parsed date, unreadable dates last
        data.sort_by_cached_key(|t| Reverse((t.parsed_date(), t.id)));
        Ok(data)
    }

    fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        let id = insert_transaction(&self.conn, new)?;
        tracing::info!(id, date = %new.date, amount = %new.amount, "transaction created");
        self.transaction(id)
    }

    fn update_transaction(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        let current = self.transaction(id)?;
        let date = patch
            .date
            .map(|d| d.to_string())
            .unwrap_or(current.date);
        let description = patch
            .description
            .clone()
            .unwrap_or(current.description);
        validate_description(&description)?;
        let amount = patch.amount.unwrap_or(current.amount);
        let category = patch.category.clone().unwrap_or(current.category);
        let direction = patch.direction.unwrap_or(current.direction);
        let investment = patch.investment.unwrap_or(current.investment);
        let maturity_date = patch.maturity_date.unwrap_or(current.maturity_date);

        self.conn.execute(
            "UPDATE transactions SET date=?1, description=?2, amount=?3, category=?4, direction=?5,
             investment=?6, maturity_date=?7 WHERE id=?8",
            params![
                date,
                description.trim(),
                amount.to_string(),
                category.as_deref(),
                direction.as_str(),
                investment,
                maturity_date.map(|d| d.to_string()),
                id,
            ],
        )?;
        tracing::info!(id, "transaction updated");
        self.transaction(id)
    }

    fn delete_transaction(&self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound {
                entity: "transaction",
                id,
            });
        }
        tracing::info!(id, "transaction deleted");
        Ok(())
    }

    fn delete_all_transactions(&self) -> Result<usize> {
        let n = self.conn.execute("DELETE FROM transactions", [])?;
        tracing::warn!(removed = n, "all transactions deleted");
        Ok(n)
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, type FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
            ))
        })?;
        let mut data = Vec::new();
        for row in rows {
            let (id, name, kind) = row?;
            data.push(Category {
                id,
                name,
                kind: parse_category_type(id, &kind)?,
            });
        }
        Ok(data)
    }

    fn create_category(&self, new: &NewCategory) -> Result<Category> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("category name must not be empty".into()));
        }
        self.conn
            .execute(
                "INSERT INTO categories(name, type) VALUES (?1, ?2)",
                params![name, new.kind.as_str()],
            )
            .map_err(|e| duplicate_or(e, &format!("category '{}'", name)))?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, name, "category created");
        self.category(id)
    }

    fn update_category(&self, id: i64, changes: &NewCategory) -> Result<Category> {
        let name = changes.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("category name must not be empty".into()));
        }
        let n = self
            .conn
            .execute(
                "UPDATE categories SET name=?1, type=?2 WHERE id=?3",
                params![name, changes.kind.as_str(), id],
            )
            .map_err(|e| duplicate_or(e, &format!("category '{}'", name)))?;
        if n == 0 {
            return Err(Error::NotFound {
                entity: "category",
                id,
            });
        }
        tracing::info!(id, name, "category updated");
        self.category(id)
    }

    fn delete_category(&self, id: i64) -> Result<()> {
        let n = self
            .conn
            .execute("DELETE FROM categories WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(Error::NotFound {
                entity: "category",
                id,
            });
        }
        tracing::info!(id, "category deleted");
        Ok(())
    }

    fn ingest_statement(&self, bytes: &[u8], mime_type: &str) -> Result<IngestReport> {
        let parser = self
            .parsers
            .iter()
            .find(|p| p.accepts(mime_type))
            .ok_or_else(|| Error::UnsupportedStatement(mime_type.to_string()))?;
        let parsed = parser.parse(bytes)?;

        let categorizer = Categorizer::load(&self.conn)?;
        let categories = self.list_categories()?;
        let tx = self.conn.unchecked_transaction()?;
        for mut new in parsed.iter().cloned() {
            if new.category.is_none() {
                if let Some(found) = categorizer.categorize(&new.description) {
                    let patch = category_patch(Some(found.to_string()), &categories);
                    new.investment |= patch.investment.unwrap_or(false);
                    new.category = Some(found.to_string());
                }
            }
            insert_transaction(&tx, &new)?;
        }
        tx.commit()?;

        let created_count = parsed.len();
        tracing::info!(created_count, mime_type, "statement ingested");
        Ok(IngestReport {
            created_count,
            message: format!(
                "Processed {} transactions from {} statement",
                created_count, mime_type
            ),
        })
    }

    fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let categories = self.list_categories()?;
        let mut transactions = self.list_transactions()?;
        // dangling names are reported like missing ones
        for t in transactions.iter_mut() {
            if resolve_category(t, &categories).is_none() {
                t.category = None;
            }
        }
        Ok(dashboard_summary(&transactions))
    }
}
