// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use agencydesk::api::http::{decode_ack, decode_body};
use agencydesk::api::{
    ApiError, ApiResult, Backend, DemoBackend, FallbackBackend, HttpBackend, backend_for,
};
use agencydesk::config::Config;
use agencydesk::fixtures;
use agencydesk::models::{
    Ack, Credentials, ExpensePayload, MonthlyReport, NewUser, OperationType, ReportQuery,
    RevenuePayload, RevenueRecord, Role, Session, Summary,
};
use chrono::NaiveDate;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

fn demo() -> Session {
    fixtures::demo_session(Role::Admin, None)
}

#[test]
fn unauthorized_status_is_its_own_error() {
    let r = decode_body::<Summary>(StatusCode::UNAUTHORIZED, r#"{"message":"expired"}"#);
    assert!(matches!(r, Err(ApiError::Unauthorized)));
    assert!(!ApiError::Unauthorized.allows_fallback());
}

#[test]
fn failure_status_carries_server_message_or_generic_text() {
    match decode_body::<Summary>(StatusCode::BAD_REQUEST, r#"{"message":"Client name required"}"#) {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Client name required");
        }
        other => panic!("unexpected {:?}", other),
    }
    match decode_body::<Summary>(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>") {
        Err(e @ ApiError::Status { .. }) => {
            assert!(e.to_string().contains("API Error"));
            assert!(e.allows_fallback());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn empty_success_bodies_decode_to_none() {
    let r: Option<Summary> = decode_body(StatusCode::NO_CONTENT, "").unwrap();
    assert!(r.is_none());
    let r: Option<Summary> = decode_body(StatusCode::OK, "  \n").unwrap();
    assert!(r.is_none());
    assert_eq!(decode_ack(StatusCode::NO_CONTENT, "").unwrap(), Ack::default());
}

#[test]
fn malformed_json_is_a_decode_error() {
    let r = decode_body::<Summary>(StatusCode::OK, "{not json");
    assert!(matches!(r, Err(ApiError::Decode(_))));
}

#[test]
fn ack_keeps_only_the_message() {
    let ack = decode_ack(StatusCode::OK, r#"{"message":"Saved","id":12}"#).unwrap();
    assert_eq!(ack.message.as_deref(), Some("Saved"));
    let ack = decode_ack(StatusCode::CREATED, r#"{"id":12,"clientName":"X"}"#).unwrap();
    assert_eq!(ack.message, None);
}

#[test]
fn reports_decode_from_wire_shape() {
    let body = json!([{
        "monthName": "January 2026",
        "revenues": [{
            "id": 4, "clientName": "Ahmed Ali", "operationType": "Work Contract",
            "contractPrice": 1200, "offerPrice": 1500.5, "paidAmount": 1000
        }],
        "expenses": [{"id": 9, "expenseType": "Rent", "amount": 800, "notes": null}]
    }])
    .to_string();
    let reports: Vec<MonthlyReport> = decode_body(StatusCode::OK, &body).unwrap().unwrap();
    let r = &reports[0].revenues[0];
    assert_eq!(r.operation_type, OperationType::WorkContract);
    assert_eq!(r.rest(), Decimal::new(5005, 1));
    assert_eq!(reports[0].expenses[0].note, None);
}

#[test]
fn payload_amounts_go_out_as_json_numbers() {
    let record = RevenueRecord {
        id: Some(3),
        client_name: "Sara".into(),
        operation_type: OperationType::Other("Flight".into()),
        contract_price: Decimal::new(12050, 2),
        offer_price: Decimal::from(150),
        paid_amount: Decimal::ZERO,
    };
    let v = serde_json::to_value(record.to_payload()).unwrap();
    assert_eq!(v["clientName"], "Sara");
    assert_eq!(v["operationType"], "Flight");
    assert!(v["contractPrice"].is_number());
    assert_eq!(v["contractPrice"].as_f64(), Some(120.5));
    assert!(v.get("rest").is_none());

    let e = ExpensePayload {
        expense_type: "Rent".into(),
        amount: Decimal::from(800),
        notes: String::new(),
    };
    let v = serde_json::to_value(e).unwrap();
    assert_eq!(v["expenseType"], "Rent");
    assert_eq!(v["amount"].as_f64(), Some(800.0));
}

#[test]
fn demo_backend_filters_fixture_reports() {
    let b = DemoBackend;
    let s = demo();
    let all = b.fetch_reports(&s, &ReportQuery::default()).unwrap();
    assert_eq!(all, fixtures::reports());

    let q = ReportQuery {
        search: "umrah".into(),
        ..ReportQuery::default()
    };
    let hits = b.fetch_reports(&s, &q).unwrap();
    assert_eq!(hits[0].revenues.len(), 1);
    assert_eq!(hits[0].revenues[0].client_name, "Mock Client B (Umrah)");
    assert!(hits[0].expenses.is_empty());

    let q = ReportQuery {
        from: NaiveDate::from_ymd_opt(2026, 3, 1),
        ..ReportQuery::default()
    };
    assert!(b.fetch_reports(&s, &q).unwrap().is_empty());
}

#[test]
fn demo_backend_acknowledges_writes() {
    let b = DemoBackend;
    let s = demo();
    let ack = b
        .register(
            &s,
            &NewUser {
                username: "clerk".into(),
                password: "pw".into(),
                role: Role::User,
            },
        )
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some(fixtures::MOCK_SUCCESS));
    assert!(b.get_revenue(&s, 1).is_ok());
    assert!(matches!(b.get_revenue(&s, 99), Err(ApiError::NotFound(_))));
}

#[test]
fn demo_login_keeps_requested_role_and_name() {
    let s = DemoBackend
        .login(&Credentials {
            username: "mona".into(),
            password: "x".into(),
            role: Some(Role::User),
        })
        .unwrap();
    assert!(s.is_demo());
    assert_eq!(s.role, Role::User);
    assert_eq!(s.username, "mona");
    assert!(s.require_admin().is_err());
}

#[test]
fn unreachable_backend_falls_back_to_fixtures() {
    let http = HttpBackend::new("http://127.0.0.1:1/api").unwrap();
    let b = FallbackBackend::new(http);
    let s = Session {
        token: "real-token".into(),
        ..demo()
    };
    assert_eq!(b.fetch_summary(&s).unwrap(), fixtures::summary());
    let reports = b.fetch_reports(&s, &ReportQuery::default()).unwrap();
    assert_eq!(reports.len(), 1);
}

struct Rejecting;

impl Backend for Rejecting {
    fn login(&self, _: &Credentials) -> ApiResult<Session> {
        Err(ApiError::Unauthorized)
    }
    fn register(&self, _: &Session, _: &NewUser) -> ApiResult<Ack> {
        Err(ApiError::Unauthorized)
    }
    fn fetch_summary(&self, _: &Session) -> ApiResult<Summary> {
        Err(ApiError::Unauthorized)
    }
    fn fetch_reports(&self, _: &Session, _: &ReportQuery) -> ApiResult<Vec<MonthlyReport>> {
        Err(ApiError::Unauthorized)
    }
    fn get_revenue(&self, _: &Session, _: i64) -> ApiResult<RevenueRecord> {
        Err(ApiError::Unauthorized)
    }
    fn create_revenue(&self, _: &Session, _: &RevenuePayload) -> ApiResult<Ack> {
        Err(ApiError::Unauthorized)
    }
    fn update_revenue(&self, _: &Session, _: i64, _: &RevenuePayload) -> ApiResult<Ack> {
        Err(ApiError::Unauthorized)
    }
    fn delete_revenue(&self, _: &Session, _: i64) -> ApiResult<Ack> {
        Err(ApiError::Unauthorized)
    }
    fn create_expense(&self, _: &Session, _: &ExpensePayload) -> ApiResult<Ack> {
        Err(ApiError::Unauthorized)
    }
}

#[test]
fn unauthorized_is_never_masked_by_fixtures() {
    let b = FallbackBackend::new(Rejecting);
    let s = demo();
    assert!(matches!(b.fetch_summary(&s), Err(ApiError::Unauthorized)));
    assert!(matches!(
        b.fetch_reports(&s, &ReportQuery::default()),
        Err(ApiError::Unauthorized)
    ));
    assert!(matches!(b.delete_revenue(&s, 1), Err(ApiError::Unauthorized)));
}

#[test]
fn demo_session_never_touches_the_network() {
    let cfg = Config {
        api_url: "http://127.0.0.1:1/api".into(),
        ..Config::default()
    };
    let b = backend_for(&cfg, Some(&demo())).unwrap();
    assert_eq!(b.fetch_summary(&demo()).unwrap(), fixtures::summary());
}

#[test]
fn http_backend_joins_paths_without_double_slash() {
    let b = HttpBackend::new("http://localhost:5239/api/").unwrap();
    assert_eq!(b.url("/Revenues/7"), "http://localhost:5239/api/Revenues/7");
}
