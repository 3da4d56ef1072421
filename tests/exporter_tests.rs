// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use agencydesk::config::Config;
use agencydesk::models::Role;
use agencydesk::{cli, commands::exporter, db, fixtures, session};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn demo_conn(role: Role) -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    session::save(&conn, &fixtures::demo_session(role, None)).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    let (_, sub) = matches.subcommand().unwrap();
    exporter::handle(conn, &Config::default(), sub)
}

#[test]
fn export_revenues_writes_csv_with_derived_columns() {
    let conn = demo_conn(Role::Admin);
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("revenues.csv");
    let out_str = out_path.to_string_lossy().to_string();

    run(&conn, &["agencydesk", "export", "revenues", "--out", &out_str]).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        [
            "month", "id", "client", "type", "contract", "offer", "paid", "remaining", "revenue",
            "rest"
        ]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][2], "Mock Client A (Visa)");
    assert_eq!(&rows[0][7], "500.00");
    assert_eq!(&rows[0][8], "0.00");
    assert_eq!(&rows[1][8], "200.00");
}

#[test]
fn export_expenses_streams_pretty_json() {
    let conn = demo_conn(Role::Admin);
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.json");
    let out_str = out_path.to_string_lossy().to_string();

    run(
        &conn,
        &[
            "agencydesk",
            "export",
            "expenses",
            "--format",
            "json",
            "--search",
            "light",
            "--out",
            &out_str,
        ],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        value,
        json!([{
            "month": "January 2026",
            "id": "2",
            "type": "Electricity",
            "amount": "200.00",
            "notes": "Office Light"
        }])
    );
    assert!(contents.contains("\n  {"));
}

#[test]
fn unknown_format_fails_before_writing() {
    let conn = demo_conn(Role::Admin);
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run(
        &conn,
        &["agencydesk", "export", "revenues", "--format", "xml", "--out", &out_str],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out_path.exists());
}

#[test]
fn export_needs_an_admin_session() {
    let conn = demo_conn(Role::User);
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("revenues.csv");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(run(&conn, &["agencydesk", "export", "revenues", "--out", &out_str]).is_err());
    assert!(!out_path.exists());

    session::clear(&conn).unwrap();
    let err = run(&conn, &["agencydesk", "export", "revenues", "--out", &out_str]).unwrap_err();
    assert!(err.to_string().contains("Not logged in"));
}
