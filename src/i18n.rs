// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Translation catalogs. Labels the renderer knows about are a closed `Key`
//! enum; labels that come from data (operation types, expense categories)
//! are looked up by their normalized key and fall back to the raw value.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::models::OperationType;

static EN: Lazy<HashMap<String, String>> =
    Lazy::new(|| serde_json::from_str(include_str!("../lang/en.json")).unwrap_or_default());
static AR: Lazy<HashMap<String, String>> =
    Lazy::new(|| serde_json::from_str(include_str!("../lang/ar.json")).unwrap_or_default());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    #[default]
    Ar,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Lang::Ar)
    }

    pub fn dir(&self) -> &'static str {
        if self.is_rtl() { "rtl" } else { "ltr" }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "ar" => Ok(Lang::Ar),
            other => Err(anyhow::anyhow!("Unsupported language '{}' (use en|ar)", other)),
        }
    }
}

macro_rules! keys {
    ($($variant:ident => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Key {
            $($variant,)*
        }

        impl Key {
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Key::$variant => $name,)*
                }
            }
        }
    };
}

keys! {
    ClientName => "client_name",
    OperationType => "operation_type",
    ContractPrice => "contract_price",
    OfferPrice => "offer_price",
    PaidAmount => "paid_amount",
    Remaining => "remaining",
    Revenue => "revenue",
    Rest => "rest",
    ExpenseType => "expense_type",
    Amount => "amount",
    Notes => "notes",
    Month => "month",
    RevenueList => "revenue_list",
    ExpenseList => "expense_list",
    Summary => "summary",
    Profile => "profile",
    Dashboard => "dashboard",
    TotalRevenue => "total_revenue",
    TotalPaid => "total_paid",
    TotalRemaining => "total_remaining",
    TotalExpenses => "total_expenses",
    NetProfit => "net_profit",
    Customer => "customer",
    Records => "records",
    Username => "username",
    Role => "role",
    Expires => "expires",
    NoRevenueRecords => "no_revenue_records",
    NoExpenseRecords => "no_expense_records",
    NoCustomers => "no_customers",
    NoRecords => "no_records",
}

pub struct Catalog {
    lang: Lang,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn bundled(lang: Lang) -> Catalog {
        let entries = match lang {
            Lang::En => EN.clone(),
            Lang::Ar => AR.clone(),
        };
        Catalog { lang, entries }
    }

    /// A catalog from a flat `{"key": "text"}` JSON object.
    pub fn from_json(lang: Lang, raw: &str) -> Result<Catalog> {
        let entries: HashMap<String, String> = serde_json::from_str(raw).with_context(|| {
            format!("Translation catalog for '{}' is not a flat JSON object", lang)
        })?;
        Ok(Catalog { lang, entries })
    }

    /// Bundled catalog with `<dir>/<code>.json` layered on top when that file exists.
    pub fn with_overrides(lang: Lang, dir: &Path) -> Result<Catalog> {
        let mut cat = Catalog::bundled(lang);
        let path = dir.join(format!("{}.json", lang.code()));
        if path.is_file() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Read {}", path.display()))?;
            cat.entries.extend(Catalog::from_json(lang, &raw)?.entries);
            tracing::debug!(path = %path.display(), "loaded translation overrides");
        }
        Ok(cat)
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Text for a known label; English, then the key name, when missing.
    pub fn t(&self, key: Key) -> &str {
        self.entries
            .get(key.as_str())
            .or_else(|| EN.get(key.as_str()))
            .map(String::as_str)
            .unwrap_or(key.as_str())
    }

    fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Label for an operation type; the raw type when the catalog has none.
    pub fn operation_label<'a>(&'a self, op: &'a OperationType) -> &'a str {
        self.entry(&label_key(op.as_str())).unwrap_or(op.as_str())
    }

    /// Label for an expense category, keyed by its lowercase name.
    pub fn expense_label<'a>(&'a self, category: &'a str) -> &'a str {
        self.entry(&category.to_lowercase()).unwrap_or(category)
    }
}

/// Data labels are keyed lowercase with the first space turned into `_`,
/// so "Work Contract" looks up `work_contract`.
pub fn label_key(raw: &str) -> String {
    raw.to_lowercase().replacen(' ', "_", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalogs_cover_every_key() {
        for lang in [Lang::En, Lang::Ar] {
            let cat = Catalog::bundled(lang);
            for key in Key::ALL {
                assert!(
                    cat.entries.contains_key(key.as_str()),
                    "{} missing {}",
                    lang,
                    key.as_str()
                );
            }
        }
    }

    #[test]
    fn label_key_only_replaces_first_space() {
        assert_eq!(label_key("Work Contract"), "work_contract");
        assert_eq!(label_key("Long Term Visa"), "long_term visa");
    }
}
