// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::api::ApiError;
use crate::models::ReportQuery;

const UA: &str = concat!("agencydesk/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Monetary input from the command line: a decimal that is not negative.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(anyhow!("Amount '{}' must not be negative", s));
    }
    Ok(d)
}

/// Amounts on the wire may be missing, `null`, a number or a numeric string.
/// Anything absent counts as zero.
pub fn de_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or(Decimal::ZERO))
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
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
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

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Turn a backend error into a command error. A 401 means the stored token is
/// dead, so the session is wiped before reporting.
pub fn api_call<T>(conn: &Connection, r: std::result::Result<T, ApiError>) -> Result<T> {
    match r {
        Ok(v) => Ok(v),
        Err(ApiError::Unauthorized) => {
            tracing::warn!("backend rejected the session token; logging out");
            crate::session::clear(conn)?;
            Err(anyhow!(
                "Session rejected by the backend (401); you have been logged out"
            ))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn opt_date(sub: &clap::ArgMatches, id: &str) -> Result<Option<NaiveDate>> {
    match sub.get_one::<String>(id).map(|s| s.trim()) {
        Some(s) if !s.is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}

pub fn report_query(sub: &clap::ArgMatches) -> Result<ReportQuery> {
    let from = opt_date(sub, "from")?;
    let to = opt_date(sub, "to")?;
    if let (Some(f), Some(t)) = (from, to) {
        if f > t {
            return Err(anyhow!("--from {} is after --to {}", f, t));
        }
    }
    Ok(ReportQuery {
        search: sub.get_one::<String>("search").cloned().unwrap_or_default(),
        from,
        to,
    })
}
