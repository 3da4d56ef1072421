// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::de_amount;

/// Token the demo login hands out; sessions carrying it never touch the network.
pub const DEMO_TOKEN: &str = "mock-token";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationType {
    Visa,
    Umrah,
    WorkContract,
    Hajj,
    Other(String),
}

impl OperationType {
    pub const KNOWN: [OperationType; 4] = [
        OperationType::Visa,
        OperationType::Umrah,
        OperationType::WorkContract,
        OperationType::Hajj,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OperationType::Visa => "Visa",
            OperationType::Umrah => "Umrah",
            OperationType::WorkContract => "Work Contract",
            OperationType::Hajj => "Hajj",
            OperationType::Other(s) => s,
        }
    }
}

impl From<String> for OperationType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Visa" => OperationType::Visa,
            "Umrah" => OperationType::Umrah,
            "Work Contract" => OperationType::WorkContract,
            "Hajj" => OperationType::Hajj,
            _ => OperationType::Other(s),
        }
    }
}

impl From<OperationType> for String {
    fn from(t: OperationType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = anyhow::Error;

    /// Strict parse for user input: only the four known types, matched loosely.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(['_', '-'], " ");
        OperationType::KNOWN
            .into_iter()
            .find(|t| t.as_str().to_lowercase() == norm)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown operation type '{}' (use Visa|Umrah|Work Contract|Hajj)",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(anyhow::anyhow!("Unknown role '{}' (use Admin|User)", s)),
        }
    }
}

/// One client contract. Only the three base amounts are carried; `remaining`,
/// `revenue` and `rest` are computed on demand and never read from the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub client_name: String,
    pub operation_type: OperationType,
    #[serde(default, deserialize_with = "de_amount")]
    pub contract_price: Decimal,
    #[serde(default, deserialize_with = "de_amount")]
    pub offer_price: Decimal,
    #[serde(default, deserialize_with = "de_amount")]
    pub paid_amount: Decimal,
}

impl RevenueRecord {
    pub fn remaining(&self) -> Decimal {
        self.balance()
    }

    pub fn revenue(&self) -> Decimal {
        self.offer_price - self.contract_price
    }

    pub fn rest(&self) -> Decimal {
        self.balance()
    }

    fn balance(&self) -> Decimal {
        self.offer_price - self.paid_amount
    }

    pub fn matches(&self, needle_lower: &str) -> bool {
        self.client_name.to_lowercase().contains(needle_lower)
            || self
                .operation_type
                .as_str()
                .to_lowercase()
                .contains(needle_lower)
    }

    /// Merge a patch onto this record. The result is a fresh record, so every
    /// derived amount follows from the merged base fields.
    pub fn apply(&self, patch: &RevenuePatch) -> RevenueRecord {
        RevenueRecord {
            id: self.id,
            client_name: patch
                .client_name
                .clone()
                .unwrap_or_else(|| self.client_name.clone()),
            operation_type: patch
                .operation_type
                .clone()
                .unwrap_or_else(|| self.operation_type.clone()),
            contract_price: patch.contract_price.unwrap_or(self.contract_price),
            offer_price: patch.offer_price.unwrap_or(self.offer_price),
            paid_amount: patch.paid_amount.unwrap_or(self.paid_amount),
        }
    }

    pub fn to_payload(&self) -> RevenuePayload {
        RevenuePayload {
            client_name: self.client_name.clone(),
            operation_type: self.operation_type.clone(),
            contract_price: self.contract_price,
            offer_price: self.offer_price,
            paid_amount: self.paid_amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenuePatch {
    pub client_name: Option<String>,
    pub operation_type: Option<OperationType>,
    pub contract_price: Option<Decimal>,
    pub offer_price: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "expenseType")]
    pub category: String,
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: Decimal,
    #[serde(rename = "notes", default)]
    pub note: Option<String>,
}

impl ExpenseRecord {
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.category.to_lowercase().contains(needle_lower)
            || self
                .note
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle_lower))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month_name: String,
    #[serde(default)]
    pub revenues: Vec<RevenueRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default, deserialize_with = "de_amount")]
    pub total_revenue: Decimal,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_paid: Decimal,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_remaining: Decimal,
    #[serde(default, deserialize_with = "de_amount")]
    pub total_expenses: Decimal,
    #[serde(default, deserialize_with = "de_amount")]
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub expiration: DateTime<Utc>,
}

impl Session {
    pub fn is_demo(&self) -> bool {
        self.token == DEMO_TOKEN
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }

    pub fn require_admin(&self) -> anyhow::Result<()> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "'{}' is a {} account; this action needs an Admin session",
                self.username,
                self.role
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePayload {
    pub client_name: String,
    pub operation_type: OperationType,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub contract_price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub offer_price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub paid_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    pub expense_type: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Acknowledgement for write endpoints. A 204 or empty body is an empty ack.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    pub search: String,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}
