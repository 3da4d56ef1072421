// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::i18n::{Catalog, Lang};
use crate::utils::{get_setting, set_setting};

pub const DEFAULT_API_URL: &str = "http://localhost:5239/api";

pub const KEY_API_URL: &str = "api_url";
pub const KEY_LANG: &str = "lang";
pub const KEY_OFFLINE_FALLBACK: &str = "offline_fallback";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub api_url: String,
    pub lang: Lang,
    /// Serve fixture data when the backend fails for any reason other than 401.
    pub offline_fallback: bool,
    /// Directory holding `en.json` / `ar.json` overrides for the bundled labels.
    pub catalog_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            lang: Lang::default(),
            offline_fallback: false,
            catalog_dir: None,
        }
    }
}

/// Values that take precedence over the settings table, highest first:
/// command-line flags, then environment variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub lang: Option<Lang>,
    pub offline_fallback: Option<bool>,
    pub catalog_dir: Option<PathBuf>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Overrides::from_vars(|k| std::env::var(k).ok())
    }

    /// Environment overrides read through `var`. Values that do not parse are
    /// logged and skipped, so a bad variable never blocks a command.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let lang = var("AGENCYDESK_LANG").and_then(|v| match v.parse::<Lang>() {
            Ok(l) => Some(l),
            Err(e) => {
                warn!(value = %v, error = %e, "ignoring AGENCYDESK_LANG");
                None
            }
        });
        let offline_fallback =
            var("AGENCYDESK_OFFLINE_FALLBACK").and_then(|v| match parse_switch(&v) {
                Ok(on) => Some(on),
                Err(e) => {
                    warn!(value = %v, error = %e, "ignoring AGENCYDESK_OFFLINE_FALLBACK");
                    None
                }
            });
        Overrides {
            api_url: var("AGENCYDESK_API_URL"),
            lang,
            offline_fallback,
            catalog_dir: var("AGENCYDESK_LANG_DIR").map(PathBuf::from),
        }
    }

    /// `self` wins over `lower` field by field.
    pub fn or(self, lower: Overrides) -> Overrides {
        Overrides {
            api_url: self.api_url.or(lower.api_url),
            lang: self.lang.or(lower.lang),
            offline_fallback: self.offline_fallback.or(lower.offline_fallback),
            catalog_dir: self.catalog_dir.or(lower.catalog_dir),
        }
    }
}

impl Config {
    pub fn load(conn: &Connection, overrides: Overrides) -> Result<Config> {
        let mut cfg = Config::default();
        if let Some(url) = get_setting(conn, KEY_API_URL)? {
            cfg.api_url = url;
        }
        if let Some(lang) = get_setting(conn, KEY_LANG)? {
            cfg.lang = lang.parse()?;
        }
        if let Some(v) = get_setting(conn, KEY_OFFLINE_FALLBACK)? {
            cfg.offline_fallback = parse_switch(&v)?;
        }

        if let Some(url) = overrides.api_url {
            cfg.api_url = url;
        }
        if let Some(lang) = overrides.lang {
            cfg.lang = lang;
        }
        if let Some(v) = overrides.offline_fallback {
            cfg.offline_fallback = v;
        }
        cfg.catalog_dir = overrides.catalog_dir;
        cfg.api_url = cfg.api_url.trim_end_matches('/').to_string();
        Ok(cfg)
    }

    /// Labels for the configured language.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_dir {
            Some(dir) => Catalog::with_overrides(self.lang, dir),
            None => Ok(Catalog::bundled(self.lang)),
        }
    }

    pub fn set_api_url(conn: &Connection, url: &str) -> Result<()> {
        let url = url.trim();
        reqwest::Url::parse(url).with_context(|| format!("Invalid API URL '{}'", url))?;
        set_setting(conn, KEY_API_URL, url.trim_end_matches('/'))
    }

    pub fn set_lang(conn: &Connection, lang: Lang) -> Result<()> {
        set_setting(conn, KEY_LANG, lang.code())
    }

    pub fn set_offline_fallback(conn: &Connection, on: bool) -> Result<()> {
        set_setting(conn, KEY_OFFLINE_FALLBACK, if on { "on" } else { "off" })
    }
}

pub fn parse_switch(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "off" | "false" | "0" | "no" => Ok(false),
        other => Err(anyhow::anyhow!("Expected on|off, got '{}'", other)),
    }
}
