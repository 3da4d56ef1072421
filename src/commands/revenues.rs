// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::DerivedRevenue;
use crate::api::{Backend, backend_for};
use crate::config::Config;
use crate::models::{MonthlyReport, OperationType, RevenuePatch, RevenueRecord, Session};
use crate::render::{fmt_amount, table};
use crate::session;
use crate::utils::{api_call, maybe_print_json, parse_amount, pretty_table, report_query};

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, cfg, sub)?,
        Some(("edit", sub)) => edit(conn, cfg, sub)?,
        Some(("show", sub)) => show(conn, cfg, sub)?,
        Some(("rm", sub)) => remove(conn, cfg, sub)?,
        Some(("list", sub)) => list(conn, cfg, sub)?,
        Some(("calc", sub)) => calc(sub)?,
        _ => {}
    }
    Ok(())
}

fn opt_amount(sub: &clap::ArgMatches, id: &str) -> Result<Option<Decimal>> {
    sub.get_one::<String>(id).map(|s| parse_amount(s)).transpose()
}

pub fn record_from_args(sub: &clap::ArgMatches) -> Result<RevenueRecord> {
    let patch = patch_from_args(sub)?;
    Ok(RevenueRecord {
        id: None,
        client_name: patch
            .client_name
            .ok_or_else(|| anyhow!("--client is required"))?,
        operation_type: patch
            .operation_type
            .ok_or_else(|| anyhow!("--type is required"))?,
        contract_price: patch.contract_price.unwrap_or_default(),
        offer_price: patch.offer_price.unwrap_or_default(),
        paid_amount: patch.paid_amount.unwrap_or_default(),
    })
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<RevenuePatch> {
    let client_name = match sub.get_one::<String>("client").map(|s| s.trim()) {
        Some("") => return Err(anyhow!("Client name must not be empty")),
        other => other.map(str::to_string),
    };
    Ok(RevenuePatch {
        client_name,
        operation_type: sub
            .get_one::<String>("type")
            .map(|t| t.parse::<OperationType>())
            .transpose()?,
        contract_price: opt_amount(sub, "contract")?,
        offer_price: opt_amount(sub, "offer")?,
        paid_amount: opt_amount(sub, "paid")?,
    })
}

fn print_derived(r: &RevenueRecord) {
    println!(
        "  revenue {}  remaining {}  rest {}",
        fmt_amount(r.revenue()),
        fmt_amount(r.remaining()),
        fmt_amount(r.rest())
    );
}

fn add(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    let record = record_from_args(sub)?;
    let backend = backend_for(cfg, Some(&s))?;
    let ack = api_call(conn, backend.create_revenue(&s, &record.to_payload()))?;
    println!(
        "Recorded {} for '{}'{}",
        record.operation_type,
        record.client_name,
        ack.message.map(|m| format!(" ({})", m)).unwrap_or_default()
    );
    print_derived(&record);
    Ok(())
}

/// Fetch the stored record, merge the patch and send the merged record back.
pub fn apply_edit(
    conn: &Connection,
    backend: &dyn Backend,
    s: &Session,
    id: i64,
    patch: &RevenuePatch,
) -> Result<RevenueRecord> {
    let current = api_call(conn, backend.get_revenue(s, id))?;
    let updated = current.apply(patch);
    api_call(conn, backend.update_revenue(s, id, &updated.to_payload()))?;
    Ok(updated)
}

fn edit(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = patch_from_args(sub)?;
    if patch == RevenuePatch::default() {
        return Err(anyhow!("Nothing to change; pass at least one field"));
    }
    let backend = backend_for(cfg, Some(&s))?;
    let updated = apply_edit(conn, backend.as_ref(), &s, id, &patch)?;
    println!("Updated revenue {} for '{}'", id, updated.client_name);
    print_derived(&updated);
    Ok(())
}

fn show(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let backend = backend_for(cfg, Some(&s))?;
    let r = api_call(conn, backend.get_revenue(&s, id))?;
    let report = [MonthlyReport {
        month_name: format!("#{}", id),
        revenues: vec![r],
        expenses: Vec::new(),
    }];
    print!("{}", table::revenues(&cfg.catalog()?, &report));
    Ok(())
}

fn remove(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let backend = backend_for(cfg, Some(&s))?;
    api_call(conn, backend.delete_revenue(&s, id))?;
    println!("Removed revenue {}", id);
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMonth {
    pub month_name: String,
    pub revenues: Vec<DerivedRevenue>,
}

pub fn query_reports(
    conn: &Connection,
    backend: &dyn Backend,
    s: &Session,
    sub: &clap::ArgMatches,
) -> Result<Vec<MonthlyReport>> {
    let query = report_query(sub)?;
    api_call(conn, backend.fetch_reports(s, &query))
}

fn list(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let backend = backend_for(cfg, Some(&s))?;
    let reports = query_reports(conn, backend.as_ref(), &s, sub)?;
    let data: Vec<RevenueMonth> = reports
        .iter()
        .map(|m| RevenueMonth {
            month_name: m.month_name.clone(),
            revenues: m.revenues.iter().map(DerivedRevenue::from).collect(),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        print!("{}", table::revenues(&cfg.catalog()?, &reports));
    }
    Ok(())
}

/// Live preview of the derived amounts; missing inputs count as zero.
pub fn calc(sub: &clap::ArgMatches) -> Result<()> {
    let record = RevenueRecord {
        id: None,
        client_name: String::new(),
        operation_type: OperationType::Visa,
        contract_price: opt_amount(sub, "contract")?.unwrap_or_default(),
        offer_price: opt_amount(sub, "offer")?.unwrap_or_default(),
        paid_amount: opt_amount(sub, "paid")?.unwrap_or_default(),
    };
    println!(
        "{}",
        pretty_table(
            &["Revenue", "Rest"],
            vec![vec![fmt_amount(record.revenue()), fmt_amount(record.rest())]],
        )
    );
    Ok(())
}
