// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Login state kept in the `session` table as two entries, `token` and the
//! serialized `user`. Logging out removes every entry.

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::models::{Role, Session};

#[derive(Serialize, Deserialize)]
struct StoredUser {
    username: String,
    role: Role,
    expiration: chrono::DateTime<Utc>,
}

pub fn save(conn: &Connection, s: &Session) -> Result<()> {
    let user = serde_json::to_string(&StoredUser {
        username: s.username.clone(),
        role: s.role,
        expiration: s.expiration,
    })?;
    let tx = conn.unchecked_transaction()?;
    for (k, v) in [("token", s.token.as_str()), ("user", user.as_str())] {
        tx.execute(
            "INSERT INTO session(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![k, v],
        )?;
    }
    tx.commit()?;
    Ok(())
}

fn entry(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row(
            "SELECT value FROM session WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

/// The stored session, if any. An expired session is cleared and reported as absent.
pub fn load(conn: &Connection) -> Result<Option<Session>> {
    let (Some(token), Some(user)) = (entry(conn, "token")?, entry(conn, "user")?) else {
        return Ok(None);
    };
    let user: StoredUser =
        serde_json::from_str(&user).context("Stored user entry is not valid JSON")?;
    let s = Session {
        token,
        username: user.username,
        role: user.role,
        expiration: user.expiration,
    };
    if s.is_expired(Utc::now()) {
        tracing::info!(username = %s.username, "stored session expired");
        clear(conn)?;
        return Ok(None);
    }
    Ok(Some(s))
}

pub fn require(conn: &Connection) -> Result<Session> {
    load(conn)?.ok_or_else(|| anyhow!("Not logged in; run `agencydesk login` first"))
}

pub fn clear(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM session", [])?;
    Ok(())
}
