// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::aggregate::{CustomerLedger, customer_ledger, customer_pivot};
use crate::api::{Backend, backend_for};
use crate::config::Config;
use crate::models::{ReportQuery, Session};
use crate::render::{html, table};
use crate::session;
use crate::utils::{api_call, maybe_print_json};

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("search", sub)) => search(conn, cfg, sub)?,
        Some(("show", sub)) => show(conn, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

/// Customers whose records match `query`, in first-seen order.
pub fn find_customers(
    conn: &Connection,
    backend: &dyn Backend,
    s: &Session,
    query: &str,
) -> Result<Vec<CustomerLedger>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    let q = ReportQuery {
        search: query.to_string(),
        ..ReportQuery::default()
    };
    let reports = api_call(conn, backend.fetch_reports(s, &q))?;
    Ok(customer_pivot(&reports))
}

pub fn load_customer(
    conn: &Connection,
    backend: &dyn Backend,
    s: &Session,
    name: &str,
) -> Result<CustomerLedger> {
    let q = ReportQuery {
        search: name.to_string(),
        ..ReportQuery::default()
    };
    let reports = api_call(conn, backend.fetch_reports(s, &q))?;
    Ok(customer_ledger(&reports, name))
}

fn search(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let backend = backend_for(cfg, Some(&s))?;
    let query = sub.get_one::<String>("query").unwrap();
    let customers = find_customers(conn, backend.as_ref(), &s, query)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &customers)? {
        let cat = cfg.catalog()?;
        println!("{}", table::customer_results(&cat, &customers));
    }
    Ok(())
}

fn show(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let name = sub.get_one::<String>("name").unwrap();
    let backend = backend_for(cfg, Some(&s))?;
    let ledger = load_customer(conn, backend.as_ref(), &s, name)?;
    let cat = cfg.catalog()?;
    if let Some(out) = sub.get_one::<String>("html") {
        std::fs::write(out, html::customer(&cat, &ledger)?)
            .with_context(|| format!("Write {}", out))?;
        println!("Wrote customer profile to {}", out);
        return Ok(());
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &ledger)? {
        println!("{}", table::customer_detail(&cat, &ledger));
    }
    Ok(())
}
