// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::warn;

use super::{ApiResult, Backend, DemoBackend};
use crate::models::{
    Ack, Credentials, ExpensePayload, MonthlyReport, NewUser, ReportQuery, RevenuePayload,
    RevenueRecord, Session, Summary,
};

/// Offline mode: failures of `inner` other than 401 are answered from fixtures.
pub struct FallbackBackend<B> {
    inner: B,
    demo: DemoBackend,
}

impl<B: Backend> FallbackBackend<B> {
    pub fn new(inner: B) -> Self {
        FallbackBackend {
            inner,
            demo: DemoBackend,
        }
    }

    fn or_fixture<T>(
        &self,
        op: &str,
        r: ApiResult<T>,
        fixture: impl FnOnce(&DemoBackend) -> ApiResult<T>,
    ) -> ApiResult<T> {
        match r {
            Err(e) if e.allows_fallback() => {
                warn!(op, error = %e, "backend unavailable; serving fixture data");
                fixture(&self.demo)
            }
            other => other,
        }
    }
}

impl<B: Backend> Backend for FallbackBackend<B> {
    fn login(&self, creds: &Credentials) -> ApiResult<Session> {
        self.or_fixture("login", self.inner.login(creds), |d| d.login(creds))
    }

    fn register(&self, session: &Session, user: &NewUser) -> ApiResult<Ack> {
        self.or_fixture("register", self.inner.register(session, user), |d| {
            d.register(session, user)
        })
    }

    fn fetch_summary(&self, session: &Session) -> ApiResult<Summary> {
        self.or_fixture("summary", self.inner.fetch_summary(session), |d| {
            d.fetch_summary(session)
        })
    }

    fn fetch_reports(
        &self,
        session: &Session,
        query: &ReportQuery,
    ) -> ApiResult<Vec<MonthlyReport>> {
        self.or_fixture("reports", self.inner.fetch_reports(session, query), |d| {
            d.fetch_reports(session, query)
        })
    }

    fn get_revenue(&self, session: &Session, id: i64) -> ApiResult<RevenueRecord> {
        self.or_fixture("get revenue", self.inner.get_revenue(session, id), |d| {
            d.get_revenue(session, id)
        })
    }

    fn create_revenue(&self, session: &Session, payload: &RevenuePayload) -> ApiResult<Ack> {
        self.or_fixture(
            "create revenue",
            self.inner.create_revenue(session, payload),
            |d| d.create_revenue(session, payload),
        )
    }

    fn update_revenue(
        &self,
        session: &Session,
        id: i64,
        payload: &RevenuePayload,
    ) -> ApiResult<Ack> {
        self.or_fixture(
            "update revenue",
            self.inner.update_revenue(session, id, payload),
            |d| d.update_revenue(session, id, payload),
        )
    }

    fn delete_revenue(&self, session: &Session, id: i64) -> ApiResult<Ack> {
        self.or_fixture(
            "delete revenue",
            self.inner.delete_revenue(session, id),
            |d| d.delete_revenue(session, id),
        )
    }

    fn create_expense(&self, session: &Session, payload: &ExpensePayload) -> ApiResult<Ack> {
        self.or_fixture(
            "create expense",
            self.inner.create_expense(session, payload),
            |d| d.create_expense(session, payload),
        )
    }
}
