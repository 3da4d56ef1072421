// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, ApiResult, Backend};
use crate::models::{
    Ack, Credentials, ExpensePayload, MonthlyReport, NewUser, ReportQuery, RevenuePayload,
    RevenueRecord, Session, Summary,
};
use crate::utils::http_client;

pub struct HttpBackend {
    base: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> anyhow::Result<HttpBackend> {
        Ok(HttpBackend {
            base: base_url.trim_end_matches('/').to_string(),
            client: http_client()?,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> ApiResult<(StatusCode, String)> {
        let mut req = self.client.request(method.clone(), self.url(path));
        if let Some(s) = session {
            req = req.bearer_auth(&s.token);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        debug!(%method, path, "api request");
        let resp = req.send()?;
        let status = resp.status();
        let text = resp.text()?;
        debug!(%method, path, status = status.as_u16(), "api response");
        Ok((status, text))
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let (status, text) = self.send::<()>(Method::GET, path, Some(session), query, None)?;
        decode_body(status, &text)?.ok_or(ApiError::EmptyBody)
    }

    fn write<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        session: &Session,
        body: Option<&B>,
    ) -> ApiResult<Ack> {
        let (status, text) = self.send(method, path, Some(session), &[], body)?;
        decode_ack(status, &text)
    }
}

/// Map a response to a value. 401 is `Unauthorized`; other failures carry the
/// body's `message` when there is one. 204 and blank bodies decode to `None`.
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> ApiResult<Option<T>> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| "API Error".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(body)?))
}

/// Write endpoints answer with anything from nothing to the stored entity;
/// only an optional `message` is kept.
pub fn decode_ack(status: StatusCode, body: &str) -> ApiResult<Ack> {
    let v: Option<serde_json::Value> = decode_body(status, body)?;
    Ok(Ack {
        message: v
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string),
    })
}

fn date_param(d: Option<chrono::NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl Backend for HttpBackend {
    fn login(&self, creds: &Credentials) -> ApiResult<Session> {
        let (status, text) = self.send(Method::POST, "/Auth/login", None, &[], Some(creds))?;
        decode_body(status, &text)?.ok_or(ApiError::EmptyBody)
    }

    fn register(&self, session: &Session, user: &NewUser) -> ApiResult<Ack> {
        self.write(Method::POST, "/Auth/register", session, Some(user))
    }

    fn fetch_summary(&self, session: &Session) -> ApiResult<Summary> {
        self.get("/Dashboard/summary", session, &[])
    }

    fn fetch_reports(
        &self,
        session: &Session,
        query: &ReportQuery,
    ) -> ApiResult<Vec<MonthlyReport>> {
        let params = [
            ("search", query.search.clone()),
            ("from", date_param(query.from)),
            ("to", date_param(query.to)),
        ];
        // a 204 here means no months, not a protocol error
        let (status, text) =
            self.send::<()>(Method::GET, "/Dashboard/reports", Some(session), &params, None)?;
        Ok(decode_body(status, &text)?.unwrap_or_default())
    }

    fn get_revenue(&self, session: &Session, id: i64) -> ApiResult<RevenueRecord> {
        self.get(&format!("/Revenues/{}", id), session, &[])
    }

    fn create_revenue(&self, session: &Session, payload: &RevenuePayload) -> ApiResult<Ack> {
        self.write(Method::POST, "/Revenues", session, Some(payload))
    }

    fn update_revenue(
        &self,
        session: &Session,
        id: i64,
        payload: &RevenuePayload,
    ) -> ApiResult<Ack> {
        self.write(Method::PUT, &format!("/Revenues/{}", id), session, Some(payload))
    }

    fn delete_revenue(&self, session: &Session, id: i64) -> ApiResult<Ack> {
        self.write::<()>(Method::DELETE, &format!("/Revenues/{}", id), session, None)
    }

    fn create_expense(&self, session: &Session, payload: &ExpensePayload) -> ApiResult<Ack> {
        self.write(Method::POST, "/Expenses", session, Some(payload))
    }
}
