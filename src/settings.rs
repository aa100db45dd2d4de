// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::investments::AlertWindow;
use crate::models::Locale;

pub const KEYS: [&str; 4] = ["currency", "locale", "alert_days_ahead", "alert_days_past"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub currency: String,
    pub locale: Locale,
    pub alert_window: AlertWindow,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "BRL".to_string(),
            locale: Locale::PtBr,
            alert_window: AlertWindow::default(),
        }
    }
}

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    let normalized = match key {
        "currency" => {
            if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::InvalidInput(format!(
                    "currency must be a 3-letter code, got '{}'",
                    value
                )));
            }
            value.to_ascii_uppercase()
        }
        "locale" => value.parse::<Locale>()?.as_str().to_string(),
        "alert_days_ahead" | "alert_days_past" => parse_days(key, value)?.to_string(),
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown setting '{}', expected one of {}",
                other,
                KEYS.join(", ")
            )))
        }
    };
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, normalized],
    )?;
    tracing::info!(key, value = %normalized, "setting updated");
    Ok(())
}

fn parse_days(key: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .ok()
        .filter(|d| *d >= 0)
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "{} must be a non-negative number of days, got '{}'",
                key, value
            ))
        })
}

pub fn load(conn: &Connection) -> Result<Settings> {
    let mut s = Settings::default();
    if let Some(ccy) = get(conn, "currency")? {
        s.currency = ccy;
    }
    if let Some(raw) = get(conn, "locale")? {
        match raw.parse::<Locale>() {
            Ok(locale) => s.locale = locale,
            Err(err) => tracing::warn!(%err, "ignoring stored locale"),
        }
    }
    for (key, slot) in [
        ("alert_days_ahead", &mut s.alert_window.days_ahead),
        ("alert_days_past", &mut s.alert_window.days_past),
    ] {
        if let Some(raw) = get(conn, key)? {
            match parse_days(key, &raw) {
                Ok(days) => *slot = days,
                Err(err) => tracing::warn!(%err, "ignoring stored setting"),
            }
        }
    }
    Ok(s)
}

pub fn list(conn: &Connection) -> Result<Vec<(String, String)>> {
    let s = load(conn)?;
    Ok(vec![
        ("currency".into(), s.currency),
        ("locale".into(), s.locale.as_str().to_string()),
        (
            "alert_days_ahead".into(),
            s.alert_window.days_ahead.to_string(),
        ),
        (
            "alert_days_past".into(),
            s.alert_window.days_past.to_string(),
        ),
    ])
}
