// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{MonthlyReport, RevenueRecord};

/// Revenue record plus its derived amounts, the shape list views and exports emit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRevenue {
    #[serde(flatten)]
    pub record: RevenueRecord,
    pub remaining: Decimal,
    pub revenue: Decimal,
    pub rest: Decimal,
}

impl From<&RevenueRecord> for DerivedRevenue {
    fn from(r: &RevenueRecord) -> Self {
        DerivedRevenue {
            record: r.clone(),
            remaining: r.remaining(),
            revenue: r.revenue(),
            rest: r.rest(),
        }
    }
}

/// Keep records containing `search`, ignoring case. Revenues are matched on client
/// name and operation type, expenses on category and note. Every month is returned,
/// including those left empty. A blank term passes everything; otherwise the term is
/// matched as given, surrounding spaces included.
pub fn filter_reports(reports: &[MonthlyReport], search: &str) -> Vec<MonthlyReport> {
    if search.trim().is_empty() {
        return reports.to_vec();
    }
    let needle = search.to_lowercase();
    reports
        .iter()
        .map(|m| MonthlyReport {
            month_name: m.month_name.clone(),
            revenues: m
                .revenues
                .iter()
                .filter(|r| r.matches(&needle))
                .cloned()
                .collect(),
            expenses: m
                .expenses
                .iter()
                .filter(|e| e.matches(&needle))
                .cloned()
                .collect(),
        })
        .collect()
}

/// First day of the month a label like "January 2026" names.
pub fn month_start(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("1 {}", label.trim()), "%d %B %Y").ok()
}

fn month_end(start: NaiveDate) -> NaiveDate {
    let (y, m) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(start)
}

/// Keep months overlapping `[from, to]`. Months whose label does not parse are kept.
pub fn filter_by_range(
    reports: &[MonthlyReport],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<MonthlyReport> {
    reports
        .iter()
        .filter(|m| match month_start(&m.month_name) {
            Some(start) => {
                from.is_none_or(|f| month_end(start) >= f) && to.is_none_or(|t| start <= t)
            }
            None => true,
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerLine {
    pub month_name: String,
    #[serde(flatten)]
    pub revenue: DerivedRevenue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLedger {
    pub name: String,
    pub records: Vec<LedgerLine>,
    pub total_rest: Decimal,
    pub total_paid: Decimal,
    pub total_revenue: Decimal,
}

impl CustomerLedger {
    fn new(name: &str) -> Self {
        CustomerLedger {
            name: name.to_string(),
            records: Vec::new(),
            total_rest: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
        }
    }

    fn push(&mut self, month_name: &str, r: &RevenueRecord) {
        let line = LedgerLine {
            month_name: month_name.to_string(),
            revenue: DerivedRevenue::from(r),
        };
        self.total_rest += line.revenue.rest;
        self.total_paid += r.paid_amount;
        self.total_revenue += line.revenue.revenue;
        self.records.push(line);
    }
}

/// Group revenue records by exact client name. Customers come out in the order
/// they are first seen; each customer's records keep source order.
pub fn customer_pivot(reports: &[MonthlyReport]) -> Vec<CustomerLedger> {
    let mut out: Vec<CustomerLedger> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for m in reports {
        for r in &m.revenues {
            let idx = *index.entry(r.client_name.as_str()).or_insert_with(|| {
                out.push(CustomerLedger::new(&r.client_name));
                out.len() - 1
            });
            out[idx].push(&m.month_name, r);
        }
    }
    out
}

/// Every record for exactly `name`, across all months. Empty when there are none.
pub fn customer_ledger(reports: &[MonthlyReport], name: &str) -> CustomerLedger {
    let mut ledger = CustomerLedger::new(name);
    for m in reports {
        for r in m.revenues.iter().filter(|r| r.client_name == name) {
            ledger.push(&m.month_name, r);
        }
    }
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_end_handles_december_and_leap_years() {
        let dec = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(month_end(dec), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        let feb = NaiveDate::from_ymd_opt(2028, 2, 1).unwrap();
        assert_eq!(month_end(feb), NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn month_labels_parse() {
        assert_eq!(
            month_start("January 2026"),
            NaiveDate::from_ymd_opt(2026, 1, 1)
        );
        assert_eq!(month_start("Q1 2026"), None);
    }
}
