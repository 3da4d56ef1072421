// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{expense_groups, fmt_amount, fmt_currency, ledger_rows, revenue_groups};
use crate::aggregate::CustomerLedger;
use crate::i18n::{Catalog, Key};
use crate::models::{MonthlyReport, Session, Summary};
use crate::utils::pretty_table;

pub fn revenues(cat: &Catalog, reports: &[MonthlyReport]) -> String {
    let groups = revenue_groups(cat, reports);
    if groups.is_empty() {
        return cat.t(Key::NoRevenueRecords).to_string();
    }
    let headers = [
        cat.t(Key::ClientName),
        cat.t(Key::OperationType),
        cat.t(Key::ContractPrice),
        cat.t(Key::OfferPrice),
        cat.t(Key::PaidAmount),
        cat.t(Key::Remaining),
        cat.t(Key::Revenue),
        cat.t(Key::Rest),
    ];
    let mut out = String::new();
    for g in groups {
        let rows = g
            .rows
            .into_iter()
            .map(|r| {
                vec![
                    r.client,
                    r.kind,
                    r.contract,
                    r.offer,
                    r.paid,
                    r.remaining,
                    r.revenue,
                    r.rest,
                ]
            })
            .collect();
        out.push_str(&format!("{}\n{}\n", g.month, pretty_table(&headers, rows)));
    }
    out
}

pub fn expenses(cat: &Catalog, reports: &[MonthlyReport]) -> String {
    let groups = expense_groups(cat, reports);
    if groups.is_empty() {
        return cat.t(Key::NoExpenseRecords).to_string();
    }
    let headers = [cat.t(Key::ExpenseType), cat.t(Key::Amount), cat.t(Key::Notes)];
    let mut out = String::new();
    for g in groups {
        let rows = g
            .rows
            .into_iter()
            .map(|e| vec![e.kind, e.amount, e.note])
            .collect();
        out.push_str(&format!("{}\n{}\n", g.month, pretty_table(&headers, rows)));
    }
    out
}

pub fn customer_results(cat: &Catalog, customers: &[CustomerLedger]) -> String {
    if customers.is_empty() {
        return cat.t(Key::NoCustomers).to_string();
    }
    let rows = customers
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.records.len().to_string(),
                fmt_amount(c.total_paid),
                fmt_amount(c.total_rest),
            ]
        })
        .collect();
    pretty_table(
        &[
            cat.t(Key::Customer),
            cat.t(Key::Records),
            cat.t(Key::TotalPaid),
            cat.t(Key::Rest),
        ],
        rows,
    )
    .to_string()
}

pub fn customer_detail(cat: &Catalog, ledger: &CustomerLedger) -> String {
    let mut out = format!(
        "{}\n{} {}  •  {}: {}  •  {}: {}  •  {}: {}\n",
        ledger.name,
        ledger.records.len(),
        cat.t(Key::Records),
        cat.t(Key::TotalPaid),
        fmt_currency(ledger.total_paid),
        cat.t(Key::Rest),
        fmt_currency(ledger.total_rest),
        cat.t(Key::TotalRevenue),
        fmt_currency(ledger.total_revenue),
    );
    if ledger.records.is_empty() {
        out.push_str(cat.t(Key::NoRecords));
        return out;
    }
    let rows = ledger_rows(cat, &ledger.records)
        .into_iter()
        .map(|l| {
            vec![
                l.month,
                l.row.kind,
                l.row.contract,
                l.row.offer,
                l.row.paid,
                l.row.remaining,
                l.row.revenue,
                l.row.rest,
            ]
        })
        .collect();
    let table = pretty_table(
        &[
            cat.t(Key::Month),
            cat.t(Key::OperationType),
            cat.t(Key::ContractPrice),
            cat.t(Key::OfferPrice),
            cat.t(Key::PaidAmount),
            cat.t(Key::Remaining),
            cat.t(Key::Revenue),
            cat.t(Key::Rest),
        ],
        rows,
    );
    out.push_str(&table.to_string());
    out
}

pub fn summary(cat: &Catalog, s: &Summary) -> String {
    let rows = vec![
        vec![cat.t(Key::TotalRevenue).to_string(), fmt_currency(s.total_revenue)],
        vec![cat.t(Key::TotalPaid).to_string(), fmt_currency(s.total_paid)],
        vec![cat.t(Key::TotalRemaining).to_string(), fmt_currency(s.total_remaining)],
        vec![cat.t(Key::TotalExpenses).to_string(), fmt_currency(s.total_expenses)],
        vec![cat.t(Key::NetProfit).to_string(), fmt_currency(s.net_profit)],
    ];
    pretty_table(&[cat.t(Key::Summary), ""], rows).to_string()
}

pub fn profile(cat: &Catalog, s: &Session) -> String {
    let rows = vec![
        vec![cat.t(Key::Username).to_string(), s.username.clone()],
        vec![cat.t(Key::Role).to_string(), s.role.to_string()],
        vec![
            cat.t(Key::Expires).to_string(),
            s.expiration.format("%Y-%m-%d %H:%M UTC").to_string(),
        ],
    ];
    pretty_table(&[cat.t(Key::Profile), ""], rows).to_string()
}
