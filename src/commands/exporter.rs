// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

use crate::api::backend_for;
use crate::commands::revenues::query_reports;
use crate::config::Config;
use crate::models::MonthlyReport;
use crate::render::fmt_amount;
use crate::session;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("revenues", sub)) => export(conn, cfg, sub, Kind::Revenues),
        Some(("expenses", sub)) => export(conn, cfg, sub, Kind::Expenses),
        _ => Ok(()),
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Revenues,
    Expenses,
}

fn export(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches, kind: Kind) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let s = session::require(conn)?;
    s.require_admin()?;
    let backend = backend_for(cfg, Some(&s))?;
    let reports = query_reports(conn, backend.as_ref(), &s, sub)?;
    let (headers, rows) = match kind {
        Kind::Revenues => revenue_rows(&reports),
        Kind::Expenses => expense_rows(&reports),
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(headers)?;
            for row in &rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let obj: serde_json::Map<String, serde_json::Value> = headers
                        .iter()
                        .zip(row)
                        .map(|(h, v)| (h.to_string(), json!(v)))
                        .collect();
                    serde_json::Value::Object(obj)
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    println!("Exported {} rows to {}", rows.len(), out);
    Ok(())
}

const REVENUE_HEADERS: &[&str] = &[
    "month", "id", "client", "type", "contract", "offer", "paid", "remaining", "revenue", "rest",
];

const EXPENSE_HEADERS: &[&str] = &["month", "id", "type", "amount", "notes"];

fn revenue_rows(reports: &[MonthlyReport]) -> (&'static [&'static str], Vec<Vec<String>>) {
    let mut rows = Vec::new();
    for m in reports {
        for r in &m.revenues {
            rows.push(vec![
                m.month_name.clone(),
                r.id.map(|i| i.to_string()).unwrap_or_default(),
                r.client_name.clone(),
                r.operation_type.to_string(),
                fmt_amount(r.contract_price),
                fmt_amount(r.offer_price),
                fmt_amount(r.paid_amount),
                fmt_amount(r.remaining()),
                fmt_amount(r.revenue()),
                fmt_amount(r.rest()),
            ]);
        }
    }
    (REVENUE_HEADERS, rows)
}

fn expense_rows(reports: &[MonthlyReport]) -> (&'static [&'static str], Vec<Vec<String>>) {
    let mut rows = Vec::new();
    for m in reports {
        for e in &m.expenses {
            rows.push(vec![
                m.month_name.clone(),
                e.id.map(|i| i.to_string()).unwrap_or_default(),
                e.category.clone(),
                fmt_amount(e.amount),
                e.note.clone().unwrap_or_default(),
            ]);
        }
    }
    (EXPENSE_HEADERS, rows)
}
