// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Presentation of aggregated data. Amounts arrive already derived; this
//! layer only formats and labels them.

pub mod html;
pub mod table;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::LedgerLine;
use crate::i18n::{Catalog, Key};
use crate::models::{ExpenseRecord, MonthlyReport, RevenueRecord};

/// Two decimals, halves rounded away from zero (0.125 -> "0.13").
pub fn fmt_amount(d: Decimal) -> String {
    format!("{:.2}", round_cents(d))
}

fn round_cents(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$` amount with thousands separators, e.g. `$50,000.00`.
pub fn fmt_currency(d: Decimal) -> String {
    let rounded = round_cents(d);
    let plain = fmt_amount(rounded.abs());
    let (int, frac) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac)
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueRow {
    pub client: String,
    pub kind: String,
    pub contract: String,
    pub offer: String,
    pub paid: String,
    pub remaining: String,
    pub revenue: String,
    pub rest: String,
    pub rest_class: &'static str,
}

impl RevenueRow {
    pub fn new(cat: &Catalog, r: &RevenueRecord) -> Self {
        let rest = r.rest();
        RevenueRow {
            client: r.client_name.clone(),
            kind: cat.operation_label(&r.operation_type).to_string(),
            contract: fmt_amount(r.contract_price),
            offer: fmt_amount(r.offer_price),
            paid: fmt_amount(r.paid_amount),
            remaining: fmt_amount(r.remaining()),
            revenue: fmt_amount(r.revenue()),
            rest: fmt_amount(rest),
            rest_class: if rest > Decimal::ZERO {
                "text-danger"
            } else {
                "text-success"
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    pub kind: String,
    pub amount: String,
    pub note: String,
}

impl ExpenseRow {
    pub fn new(cat: &Catalog, e: &ExpenseRecord) -> Self {
        ExpenseRow {
            kind: cat.expense_label(&e.category).to_string(),
            amount: fmt_amount(e.amount),
            note: e
                .note
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or("—")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup<R> {
    pub month: String,
    pub rows: Vec<R>,
}

/// Months that have at least one revenue, as display rows.
pub fn revenue_groups(cat: &Catalog, reports: &[MonthlyReport]) -> Vec<MonthGroup<RevenueRow>> {
    reports
        .iter()
        .filter(|m| !m.revenues.is_empty())
        .map(|m| MonthGroup {
            month: m.month_name.clone(),
            rows: m.revenues.iter().map(|r| RevenueRow::new(cat, r)).collect(),
        })
        .collect()
}

/// Months that have at least one expense, as display rows.
pub fn expense_groups(cat: &Catalog, reports: &[MonthlyReport]) -> Vec<MonthGroup<ExpenseRow>> {
    reports
        .iter()
        .filter(|m| !m.expenses.is_empty())
        .map(|m| MonthGroup {
            month: m.month_name.clone(),
            rows: m.expenses.iter().map(|e| ExpenseRow::new(cat, e)).collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    pub month: String,
    #[serde(flatten)]
    pub row: RevenueRow,
}

pub fn ledger_rows(cat: &Catalog, lines: &[LedgerLine]) -> Vec<LedgerRow> {
    lines
        .iter()
        .map(|l| LedgerRow {
            month: l.month_name.clone(),
            row: RevenueRow::new(cat, &l.revenue.record),
        })
        .collect()
}

/// Every known label in the catalog's language, keyed by its catalog key.
pub fn labels(cat: &Catalog) -> BTreeMap<&'static str, String> {
    Key::ALL
        .iter()
        .map(|k| (k.as_str(), cat.t(*k).to_string()))
        .collect()
}
