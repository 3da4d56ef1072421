// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use agencydesk::config::{Config, Overrides};
use agencydesk::i18n::Lang;
use agencydesk::{cli, commands, db};

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("AGENCYDESK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let flags = Overrides {
        api_url: matches.get_one::<String>("api_url").cloned(),
        lang: matches
            .get_one::<String>("lang")
            .map(|l| l.parse::<Lang>())
            .transpose()?,
        offline_fallback: matches.get_flag("offline_fallback").then_some(true),
        catalog_dir: None,
    };
    let cfg = Config::load(&conn, flags.or(Overrides::from_env()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("login", sub)) => commands::auth::login(&conn, &cfg, sub)?,
        Some(("logout", _)) => commands::auth::logout(&conn)?,
        Some(("whoami", _)) => commands::auth::whoami(&conn, &cfg)?,
        Some(("revenue", sub)) => commands::revenues::handle(&conn, &cfg, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, &cfg, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, &cfg, sub)?,
        Some(("customer", sub)) => commands::customers::handle(&conn, &cfg, sub)?,
        Some(("user", sub)) => commands::users::handle(&conn, &cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &cfg, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, &cfg, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
