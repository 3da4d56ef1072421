// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use rusqlite::Connection;

use crate::api::backend_for;
use crate::config::Config;
use crate::models::{NewUser, Role};
use crate::session;
use crate::utils::api_call;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => {
            let s = session::require(conn)?;
            s.require_admin()?;
            let username = sub.get_one::<String>("username").unwrap().trim().to_string();
            let password = sub.get_one::<String>("password").unwrap().to_string();
            if username.is_empty() || password.is_empty() {
                return Err(anyhow!("Username and password must not be empty"));
            }
            let role = sub.get_one::<String>("role").unwrap().parse::<Role>()?;
            let backend = backend_for(cfg, Some(&s))?;
            api_call(
                conn,
                backend.register(
                    &s,
                    &NewUser {
                        username: username.clone(),
                        password,
                        role,
                    },
                ),
            )?;
            println!("Created {} user '{}'", role, username);
        }
        _ => {}
    }
    Ok(())
}
