// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Access to the agency backend. Every call takes the session explicitly;
//! nothing here reads ambient login state.

pub mod demo;
pub mod fallback;
pub mod http;

use thiserror::Error;

use crate::config::Config;
use crate::models::{
    Ack, Credentials, ExpensePayload, MonthlyReport, NewUser, ReportQuery, RevenuePayload,
    RevenueRecord, Session, Summary,
};

pub use demo::DemoBackend;
pub use fallback::FallbackBackend;
pub use http::HttpBackend;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unauthorized")]
    Unauthorized,
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend sent an empty body where data was expected")]
    EmptyBody,
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Whether an offline fallback may stand in for this failure. A rejected
    /// token must always surface so the session gets cleared.
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, ApiError::Unauthorized)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub trait Backend {
    fn login(&self, creds: &Credentials) -> ApiResult<Session>;
    fn register(&self, session: &Session, user: &NewUser) -> ApiResult<Ack>;
    fn fetch_summary(&self, session: &Session) -> ApiResult<Summary>;
    fn fetch_reports(&self, session: &Session, query: &ReportQuery)
    -> ApiResult<Vec<MonthlyReport>>;
    fn get_revenue(&self, session: &Session, id: i64) -> ApiResult<RevenueRecord>;
    fn create_revenue(&self, session: &Session, payload: &RevenuePayload) -> ApiResult<Ack>;
    fn update_revenue(
        &self,
        session: &Session,
        id: i64,
        payload: &RevenuePayload,
    ) -> ApiResult<Ack>;
    fn delete_revenue(&self, session: &Session, id: i64) -> ApiResult<Ack>;
    fn create_expense(&self, session: &Session, payload: &ExpensePayload) -> ApiResult<Ack>;
}

/// The backend a command should talk to: fixtures for a demo session, otherwise
/// HTTP, wrapped in the fixture fallback when the config asks for it.
pub fn backend_for(cfg: &Config, session: Option<&Session>) -> anyhow::Result<Box<dyn Backend>> {
    if session.is_some_and(Session::is_demo) {
        return Ok(Box::new(DemoBackend));
    }
    let http = HttpBackend::new(&cfg.api_url)?;
    if cfg.offline_fallback {
        Ok(Box::new(FallbackBackend::new(http)))
    } else {
        Ok(Box::new(http))
    }
}
