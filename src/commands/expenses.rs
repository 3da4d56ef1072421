// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::Connection;

use crate::api::backend_for;
use crate::commands::revenues::query_reports;
use crate::config::Config;
use crate::models::{ExpensePayload, ExpenseRecord};
use crate::render::{fmt_amount, table};
use crate::session;
use crate::utils::{api_call, maybe_print_json, parse_amount};

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, cfg, sub)?,
        Some(("list", sub)) => list(conn, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn payload_from_args(sub: &clap::ArgMatches) -> Result<ExpensePayload> {
    let expense_type = sub.get_one::<String>("type").unwrap().trim().to_string();
    if expense_type.is_empty() {
        return Err(anyhow!("Expense type must not be empty"));
    }
    Ok(ExpensePayload {
        expense_type,
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        notes: sub
            .get_one::<String>("note")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    })
}

fn add(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    let payload = payload_from_args(sub)?;
    let backend = backend_for(cfg, Some(&s))?;
    let ack = api_call(conn, backend.create_expense(&s, &payload))?;
    println!(
        "Recorded {} expense of {}{}",
        payload.expense_type,
        fmt_amount(payload.amount),
        ack.message.map(|m| format!(" ({})", m)).unwrap_or_default()
    );
    Ok(())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseMonth<'a> {
    month_name: &'a str,
    expenses: &'a [ExpenseRecord],
}

fn list(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let backend = backend_for(cfg, Some(&s))?;
    let reports = query_reports(conn, backend.as_ref(), &s, sub)?;
    let data: Vec<ExpenseMonth> = reports
        .iter()
        .map(|m| ExpenseMonth {
            month_name: &m.month_name,
            expenses: &m.expenses,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        print!("{}", table::expenses(&cfg.catalog()?, &reports));
    }
    Ok(())
}
