// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};
use crate::models::Locale;

const SECONDS_PER_DAY: i64 = 86_400;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let raw = s.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| Error::InvalidDate(raw.to_string()))
}

// YYYY-MM-DD, an ISO datetime starting with one, or DD/MM/YYYY
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let raw = s.trim();
    if let Some(head) = raw.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
            let rest = &raw[10..];
            if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
                return Some(d);
            }
        }
    }
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let raw = s.trim();
    let normalized = if raw.contains(',') && !raw.contains('.') {
        raw.replace(',', ".")
    } else {
        raw.to_string()
    };
    normalized
        .parse::<Decimal>()
        .map_err(|_| Error::InvalidAmount(raw.to_string()))
}

/// Whole days from `now` until the start of `due`, rounding a partial day
/// up. Any moment of a calendar day gives the same answer as its midnight.
pub fn days_until(due: NaiveDate, now: NaiveDateTime) -> i64 {
    let start = due.and_time(NaiveTime::default());
    let secs = (start - now).num_seconds();
    let days = secs.div_euclid(SECONDS_PER_DAY);
    if secs.rem_euclid(SECONDS_PER_DAY) != 0 {
        days + 1
    } else {
        days
    }
}

fn currency_symbol(ccy: &str) -> &str {
    match ccy {
        "BRL" => "R$",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str, locale: Locale) -> String {
    let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let (group_sep, dec_sep) = match locale {
        Locale::PtBr => ('.', ','),
        Locale::En => (',', '.'),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let symbol = currency_symbol(ccy);
    match locale {
        Locale::PtBr => format!("{}{} {}{}{}", sign, symbol, grouped, dec_sep, frac_part),
        Locale::En => format!("{}{}{}{}{}", sign, symbol, grouped, dec_sep, frac_part),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
