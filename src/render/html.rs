// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use super::{
    LedgerRow, expense_groups, fmt_amount, fmt_currency, labels, ledger_rows, revenue_groups,
};
use crate::aggregate::CustomerLedger;
use crate::i18n::Catalog;
use crate::models::{MonthlyReport, Session, Summary};

const PAGE: &str = include_str!("../../templates/page.html");
const SUMMARY: &str = include_str!("../../templates/summary.html");
const REVENUES: &str = include_str!("../../templates/revenues.html");
const EXPENSES: &str = include_str!("../../templates/expenses.html");
const CUSTOMER: &str = include_str!("../../templates/customer.html");

fn engine() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("summary.html", SUMMARY),
        ("revenues.html", REVENUES),
        ("expenses.html", EXPENSES),
        ("customer.html", CUSTOMER),
        ("page.html", PAGE),
    ])?;
    Ok(tera)
}

fn base_context(cat: &Catalog) -> Context {
    let mut ctx = Context::new();
    ctx.insert("labels", &labels(cat));
    ctx.insert("lang", cat.lang().code());
    ctx.insert("dir", cat.lang().dir());
    ctx
}

#[derive(Serialize)]
struct SummaryView {
    total_revenue: String,
    total_paid: String,
    total_remaining: String,
    total_expenses: String,
    net_profit: String,
}

impl From<&Summary> for SummaryView {
    fn from(s: &Summary) -> Self {
        SummaryView {
            total_revenue: fmt_currency(s.total_revenue),
            total_paid: fmt_currency(s.total_paid),
            total_remaining: fmt_currency(s.total_remaining),
            total_expenses: fmt_currency(s.total_expenses),
            net_profit: fmt_currency(s.net_profit),
        }
    }
}

#[derive(Serialize)]
struct CustomerView {
    name: String,
    count: usize,
    total_paid: String,
    total_rest: String,
    total_revenue: String,
    rows: Vec<LedgerRow>,
}

pub fn revenues(cat: &Catalog, reports: &[MonthlyReport]) -> Result<String> {
    let mut ctx = base_context(cat);
    ctx.insert("revenue_groups", &revenue_groups(cat, reports));
    Ok(engine()?.render("revenues.html", &ctx)?)
}

pub fn expenses(cat: &Catalog, reports: &[MonthlyReport]) -> Result<String> {
    let mut ctx = base_context(cat);
    ctx.insert("expense_groups", &expense_groups(cat, reports));
    Ok(engine()?.render("expenses.html", &ctx)?)
}

pub fn summary(cat: &Catalog, s: &Summary) -> Result<String> {
    let mut ctx = base_context(cat);
    ctx.insert("summary", &SummaryView::from(s));
    Ok(engine()?.render("summary.html", &ctx)?)
}

pub fn customer(cat: &Catalog, ledger: &CustomerLedger) -> Result<String> {
    let mut ctx = base_context(cat);
    ctx.insert(
        "customer",
        &CustomerView {
            name: ledger.name.clone(),
            count: ledger.records.len(),
            total_paid: fmt_amount(ledger.total_paid),
            total_rest: fmt_amount(ledger.total_rest),
            total_revenue: fmt_amount(ledger.total_revenue),
            rows: ledger_rows(cat, &ledger.records),
        },
    );
    Ok(engine()?.render("customer.html", &ctx)?)
}

/// Standalone dashboard page: summary, revenue list and expense list.
pub fn page(
    cat: &Catalog,
    session: &Session,
    s: &Summary,
    reports: &[MonthlyReport],
) -> Result<String> {
    let mut ctx = base_context(cat);
    ctx.insert("user", &format!("{} ({})", session.username, session.role));
    ctx.insert("summary", &SummaryView::from(s));
    ctx.insert("revenue_groups", &revenue_groups(cat, reports));
    ctx.insert("expense_groups", &expense_groups(cat, reports));
    Ok(engine()?.render("page.html", &ctx)?)
}
