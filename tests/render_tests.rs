// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use agencydesk::aggregate::customer_ledger;
use agencydesk::fixtures;
use agencydesk::i18n::{Catalog, Key, Lang};
use agencydesk::models::{ExpenseRecord, MonthlyReport, OperationType, RevenueRecord, Role};
use agencydesk::render::{RevenueRow, fmt_amount, fmt_currency, html, revenue_groups, table};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn en() -> Catalog {
    Catalog::bundled(Lang::En)
}

fn hostile() -> Vec<MonthlyReport> {
    vec![MonthlyReport {
        month_name: "January 2026".into(),
        revenues: vec![RevenueRecord {
            id: Some(1),
            client_name: "<script>alert(1)</script>".into(),
            operation_type: OperationType::Visa,
            contract_price: Decimal::from(100),
            offer_price: Decimal::from(150),
            paid_amount: Decimal::from(150),
        }],
        expenses: vec![ExpenseRecord {
            id: Some(2),
            category: "Rent".into(),
            amount: Decimal::from(90),
            note: Some("<b>bold</b>".into()),
        }],
    }]
}

#[test]
fn amounts_format_with_two_decimals() {
    assert_eq!(fmt_amount(Decimal::new(15005, 1)), "1500.50");
    assert_eq!(fmt_amount(Decimal::ZERO), "0.00");
    assert_eq!(fmt_currency(Decimal::from(50000)), "$50,000.00");
    assert_eq!(fmt_currency(Decimal::new(-123456789, 2)), "-$1,234,567.89");
    assert_eq!(fmt_currency(Decimal::new(999, 1)), "$99.90");
}

#[test]
fn exact_halves_round_away_from_zero() {
    assert_eq!(fmt_amount(Decimal::new(125, 3)), "0.13");
    assert_eq!(fmt_amount(Decimal::new(-125, 3)), "-0.13");
    assert_eq!(fmt_amount(Decimal::new(1005, 3)), "1.01");
    assert_eq!(fmt_currency(Decimal::new(125, 3)), "$0.13");
    assert_eq!(fmt_currency(Decimal::new(-2500005, 3)), "-$2,500.01");
}

#[test]
fn rest_colour_depends_on_outstanding_balance() {
    let months = fixtures::reports();
    let rows: Vec<RevenueRow> = months[0]
        .revenues
        .iter()
        .map(|r| RevenueRow::new(&en(), r))
        .collect();
    assert_eq!(rows[0].rest, "500.00");
    assert_eq!(rows[0].rest_class, "text-danger");
    assert_eq!(rows[1].rest_class, "text-success");
}

#[test]
fn months_without_rows_are_not_shown() {
    let reports = vec![
        MonthlyReport {
            month_name: "December 2025".into(),
            revenues: vec![],
            expenses: vec![],
        },
        fixtures::reports().remove(0),
    ];
    let groups = revenue_groups(&en(), &reports);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].month, "January 2026");

    let text = table::revenues(&en(), &reports);
    assert!(!text.contains("December 2025"));
    assert!(text.contains("January 2026"));
}

#[test]
fn empty_lists_show_empty_state() {
    let empty = vec![MonthlyReport {
        month_name: "December 2025".into(),
        revenues: vec![],
        expenses: vec![],
    }];
    assert_eq!(table::revenues(&en(), &empty), "No revenue records found");
    assert_eq!(table::expenses(&en(), &[]), "No expense records found");

    let page = html::revenues(&en(), &empty).unwrap();
    assert!(page.contains("empty-state"));
    assert!(!page.contains("December 2025"));
}

#[test]
fn html_escapes_record_text() {
    let reports = hostile();
    let revenues = html::revenues(&en(), &reports).unwrap();
    assert!(!revenues.contains("<script>"));
    assert!(revenues.contains("&lt;script&gt;"));

    let expenses = html::expenses(&en(), &reports).unwrap();
    assert!(!expenses.contains("<b>"));
    assert!(expenses.contains("&lt;b&gt;"));
}

#[test]
fn missing_notes_render_as_dash() {
    let mut reports = hostile();
    reports[0].expenses[0].note = None;
    let text = table::expenses(&en(), &reports);
    assert!(text.contains('—'));
}

#[test]
fn operation_labels_are_translated_with_raw_fallback() {
    let ar = Catalog::bundled(Lang::Ar);
    assert_ne!(ar.operation_label(&OperationType::WorkContract), "Work Contract");
    assert_eq!(en().operation_label(&OperationType::WorkContract), "Work Contract");
    let custom = OperationType::Other("Flight Booking".into());
    assert_eq!(ar.operation_label(&custom), "Flight Booking");
    assert_eq!(ar.expense_label("Travel Insurance"), "Travel Insurance");
    assert_ne!(ar.expense_label("Salaries"), "Salaries");
    assert_eq!(en().expense_label("ELECTRICITY"), "Electricity");
}

#[test]
fn missing_translation_falls_back_to_english() {
    let partial = Catalog::from_json(Lang::Ar, r#"{"rest":"الباقي"}"#).unwrap();
    assert_eq!(partial.t(Key::Rest), "الباقي");
    assert_eq!(partial.t(Key::NetProfit), "Net Profit");
    assert!(Catalog::from_json(Lang::Ar, "[1,2]").is_err());
}

#[test]
fn arabic_page_is_right_to_left() {
    let cat = Catalog::bundled(Lang::Ar);
    let s = fixtures::demo_session(Role::Admin, None);
    let page = html::page(&cat, &s, &fixtures::summary(), &fixtures::reports()).unwrap();
    assert!(page.contains(r#"<html lang="ar" dir="rtl">"#));
    assert!(page.contains("$50,000.00"));
    assert!(page.contains("DemoAdmin"));

    let page = html::page(&en(), &s, &fixtures::summary(), &[]).unwrap();
    assert!(page.contains(r#"dir="ltr""#));
    assert!(page.contains("No revenue records found"));
}

#[test]
fn customer_view_lists_each_month() {
    let ledger = customer_ledger(&fixtures::reports(), "Mock Client A (Visa)");
    let text = table::customer_detail(&en(), &ledger);
    assert!(text.contains("January 2026"));
    assert!(text.contains("$1,000.00"));

    let page = html::customer(&en(), &ledger).unwrap();
    assert!(page.contains("text-danger"));

    let nobody = customer_ledger(&fixtures::reports(), "Nobody");
    assert!(table::customer_detail(&en(), &nobody).ends_with("No records found"));
}

#[test]
fn summary_table_shows_currency_totals() {
    let text = table::summary(&en(), &fixtures::summary());
    for needle in ["$50,000.00", "$35,000.00", "$15,000.00", "$12,000.00", "$23,000.00"] {
        assert!(text.contains(needle), "missing {}", needle);
    }
}

#[test]
fn catalog_files_on_disk_override_bundled_labels() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("en.json"), r#"{"rest":"Balance due"}"#).unwrap();
    let cat = Catalog::with_overrides(Lang::En, dir.path()).unwrap();
    assert_eq!(cat.t(Key::Rest), "Balance due");
    assert_eq!(cat.t(Key::Revenue), "Revenue");

    let untouched = Catalog::with_overrides(Lang::Ar, dir.path()).unwrap();
    assert_eq!(untouched.t(Key::Rest), "الباقي");

    std::fs::write(dir.path().join("ar.json"), "not json").unwrap();
    assert!(Catalog::with_overrides(Lang::Ar, dir.path()).is_err());
}
