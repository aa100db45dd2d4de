// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid month '{0}', expected YYYY-MM or 'all'")]
    InvalidMonth(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0} already exists")]
    Duplicate(String),

    #[error("no statement parser accepts '{0}'")]
    UnsupportedStatement(String),

    #[error("stored data is corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}
