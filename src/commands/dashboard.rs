// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::api::backend_for;
use crate::commands::revenues::query_reports;
use crate::config::Config;
use crate::render::html;
use crate::session;
use crate::utils::api_call;

pub fn handle(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    s.require_admin()?;
    let out = sub.get_one::<String>("out").unwrap().trim();
    let backend = backend_for(cfg, Some(&s))?;
    let summary = api_call(conn, backend.fetch_summary(&s))?;
    let reports = query_reports(conn, backend.as_ref(), &s, sub)?;
    let page = html::page(&cfg.catalog()?, &s, &summary, &reports)?;
    std::fs::write(out, page).with_context(|| format!("Write {}", out))?;
    println!("Dashboard written to {}", out);
    Ok(())
}
