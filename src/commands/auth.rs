// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use tracing::info;

use crate::api::{ApiError, backend_for};
use crate::config::Config;
use crate::fixtures;
use crate::models::{Credentials, Role, Session};
use crate::render::table;
use crate::session;

pub fn login(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let role = sub
        .get_one::<String>("role")
        .map(|r| r.parse::<Role>())
        .transpose()?;
    let s = if sub.get_flag("demo") {
        fixtures::demo_session(role.unwrap_or(Role::Admin), None)
    } else {
        let username = sub.get_one::<String>("username").unwrap().trim().to_string();
        let password = sub.get_one::<String>("password").unwrap().to_string();
        if username.is_empty() || password.is_empty() {
            return Err(anyhow!("Username and password must not be empty"));
        }
        let creds = Credentials {
            username,
            password,
            role,
        };
        authenticate(cfg, &creds)?
    };
    session::save(conn, &s)?;
    info!(username = %s.username, role = %s.role, demo = s.is_demo(), "logged in");
    println!(
        "Logged in as {} ({}){}",
        s.username,
        s.role,
        if s.is_demo() { " [demo data]" } else { "" }
    );
    Ok(())
}

fn authenticate(cfg: &Config, creds: &Credentials) -> Result<Session> {
    let backend = backend_for(cfg, None)?;
    match backend.login(creds) {
        Ok(s) => Ok(s),
        Err(ApiError::Unauthorized) => Err(anyhow!("Invalid username or password")),
        Err(e) => Err(e).with_context(|| format!("Login against {} failed", cfg.api_url)),
    }
}

pub fn logout(conn: &Connection) -> Result<()> {
    session::clear(conn)?;
    info!("logged out");
    println!("Logged out");
    Ok(())
}

pub fn whoami(conn: &Connection, cfg: &Config) -> Result<()> {
    let s = session::require(conn)?;
    let cat = cfg.catalog()?;
    println!("{}", table::profile(&cat, &s));
    Ok(())
}
