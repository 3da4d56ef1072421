// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static data served by the demo backend.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::models::{
    ExpenseRecord, MonthlyReport, OperationType, RevenueRecord, Role, Session, Summary, DEMO_TOKEN,
};

pub const MOCK_SUCCESS: &str = "Mock Success";

pub fn demo_session(role: Role, username: Option<&str>) -> Session {
    let default_name = match role {
        Role::Admin => "DemoAdmin",
        Role::User => "DemoUser",
    };
    Session {
        token: DEMO_TOKEN.to_string(),
        username: username
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(default_name)
            .to_string(),
        role,
        expiration: Utc::now() + Duration::hours(24),
    }
}

pub fn summary() -> Summary {
    Summary {
        total_revenue: Decimal::from(50_000),
        total_paid: Decimal::from(35_000),
        total_remaining: Decimal::from(15_000),
        total_expenses: Decimal::from(12_000),
        net_profit: Decimal::from(23_000),
    }
}

pub fn reports() -> Vec<MonthlyReport> {
    vec![MonthlyReport {
        month_name: "January 2026".to_string(),
        revenues: vec![
            RevenueRecord {
                id: Some(1),
                client_name: "Mock Client A (Visa)".to_string(),
                operation_type: OperationType::Visa,
                contract_price: Decimal::from(1500),
                offer_price: Decimal::from(1500),
                paid_amount: Decimal::from(1000),
            },
            RevenueRecord {
                id: Some(2),
                client_name: "Mock Client B (Umrah)".to_string(),
                operation_type: OperationType::Umrah,
                contract_price: Decimal::from(2000),
                offer_price: Decimal::from(2200),
                paid_amount: Decimal::from(2200),
            },
        ],
        expenses: vec![
            ExpenseRecord {
                id: Some(1),
                category: "Salaries".to_string(),
                amount: Decimal::from(5000),
                note: Some("Staff Salaries".to_string()),
            },
            ExpenseRecord {
                id: Some(2),
                category: "Electricity".to_string(),
                amount: Decimal::from(200),
                note: Some("Office Light".to_string()),
            },
        ],
    }]
}
