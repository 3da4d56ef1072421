// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::api::backend_for;
use crate::config::Config;
use crate::render::{html, table};
use crate::session;
use crate::utils::{api_call, maybe_print_json};

pub fn handle(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = session::require(conn)?;
    let backend = backend_for(cfg, Some(&s))?;
    let summary = api_call(conn, backend.fetch_summary(&s))?;
    let cat = cfg.catalog()?;
    if let Some(out) = sub.get_one::<String>("html") {
        std::fs::write(out, html::summary(&cat, &summary)?)
            .with_context(|| format!("Write {}", out))?;
        println!("Wrote summary to {}", out);
        return Ok(());
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        println!("{}", table::summary(&cat, &summary));
    }
    Ok(())
}
