// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::config::{Config, parse_switch};
use crate::i18n::Lang;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["api_url".to_string(), cfg.api_url.clone()],
                vec!["lang".to_string(), cfg.lang.to_string()],
                vec![
                    "offline_fallback".to_string(),
                    if cfg.offline_fallback { "on" } else { "off" }.to_string(),
                ],
                vec![
                    "catalog_dir".to_string(),
                    cfg.catalog_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(bundled)".to_string()),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-api-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            Config::set_api_url(conn, url)?;
            println!("API URL set to {}", url.trim());
        }
        Some(("set-lang", sub)) => {
            let lang = sub.get_one::<String>("code").unwrap().parse::<Lang>()?;
            Config::set_lang(conn, lang)?;
            println!("Language set to {}", lang);
        }
        Some(("set-fallback", sub)) => {
            let on = parse_switch(sub.get_one::<String>("state").unwrap())?;
            Config::set_offline_fallback(conn, on)?;
            println!("Offline fallback {}", if on { "enabled" } else { "disabled" });
        }
        _ => {}
    }
    Ok(())
}
