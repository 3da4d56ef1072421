// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::debug;

use super::{ApiError, ApiResult, Backend};
use crate::aggregate::{filter_by_range, filter_reports};
use crate::fixtures;
use crate::models::{
    Ack, Credentials, ExpensePayload, MonthlyReport, NewUser, ReportQuery, RevenuePayload,
    RevenueRecord, Role, Session, Summary,
};

/// Serves the bundled fixtures. Writes are acknowledged and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoBackend;

fn mock_ack() -> Ack {
    Ack {
        message: Some(fixtures::MOCK_SUCCESS.to_string()),
    }
}

impl Backend for DemoBackend {
    fn login(&self, creds: &Credentials) -> ApiResult<Session> {
        debug!(username = %creds.username, "demo login");
        Ok(fixtures::demo_session(
            creds.role.unwrap_or(Role::Admin),
            Some(creds.username.as_str()),
        ))
    }

    fn register(&self, _session: &Session, user: &NewUser) -> ApiResult<Ack> {
        debug!(username = %user.username, "demo register");
        Ok(mock_ack())
    }

    fn fetch_summary(&self, _session: &Session) -> ApiResult<Summary> {
        Ok(fixtures::summary())
    }

    fn fetch_reports(
        &self,
        _session: &Session,
        query: &ReportQuery,
    ) -> ApiResult<Vec<MonthlyReport>> {
        let ranged = filter_by_range(&fixtures::reports(), query.from, query.to);
        Ok(filter_reports(&ranged, &query.search))
    }

    fn get_revenue(&self, _session: &Session, id: i64) -> ApiResult<RevenueRecord> {
        fixtures::reports()
            .into_iter()
            .flat_map(|m| m.revenues)
            .find(|r| r.id == Some(id))
            .ok_or_else(|| ApiError::NotFound(format!("revenue {}", id)))
    }

    fn create_revenue(&self, _session: &Session, payload: &RevenuePayload) -> ApiResult<Ack> {
        debug!(client = %payload.client_name, "demo create revenue");
        Ok(mock_ack())
    }

    fn update_revenue(
        &self,
        _session: &Session,
        id: i64,
        _payload: &RevenuePayload,
    ) -> ApiResult<Ack> {
        debug!(id, "demo update revenue");
        Ok(Ack::default())
    }

    fn delete_revenue(&self, _session: &Session, id: i64) -> ApiResult<Ack> {
        debug!(id, "demo delete revenue");
        Ok(Ack::default())
    }

    fn create_expense(&self, _session: &Session, payload: &ExpensePayload) -> ApiResult<Ack> {
        debug!(category = %payload.expense_type, "demo create expense");
        Ok(mock_ack())
    }
}
