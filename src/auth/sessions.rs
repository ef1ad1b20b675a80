// src/auth/sessions.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::token::SessionToken;
use crate::errors::ServerError;
use crate::labeling::{Annotator, SessionContext};

pub const SESSION_COOKIE: &str = "label_session";
const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// Starts a labeling session for `annotator`; returns the raw cookie token.
pub fn start_session(
    conn: &Connection,
    annotator: &Annotator,
    now: i64,
) -> Result<SessionToken, ServerError> {
    let token = SessionToken::generate();

    conn.execute(
        r#"
        insert into label_sessions (token_hash, annotator, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![token.hash().as_slice(), annotator.name, now, now + SESSION_TTL_SECS],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(token)
}

/// Rebuilds the session context for a live token. Sessions whose annotator
/// is no longer configured are treated as logged out.
pub fn load_session(
    conn: &Connection,
    token: &SessionToken,
    annotators: &[String; 3],
    now: i64,
) -> Result<Option<SessionContext>, ServerError> {
    let found: Option<(i64, String)> = conn
        .query_row(
            r#"
            select id, annotator
            from label_sessions
            where token_hash = ?
              and expires_at > ?
              and revoked_at is null
            "#,
            params![token.hash().as_slice(), now],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))?;

    let Some((session_id, name)) = found else {
        return Ok(None);
    };
    let Some(annotator) = Annotator::from_config(annotators, &name) else {
        return Ok(None);
    };

    let mut stmt = conn
        .prepare("select property_id from session_labels where session_id = ? order by seq")
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let rows = stmt
        .query_map(params![session_id], |row| row.get::<_, String>(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut labeled_ids = Vec::new();
    for r in rows {
        labeled_ids.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }

    Ok(Some(SessionContext {
        session_id,
        annotator,
        labeled_ids,
    }))
}

/// Appends a labeled property id to the session, after the sheet write.
pub fn record_session_label(
    conn: &Connection,
    session_id: i64,
    property_id: &str,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into session_labels (session_id, seq, property_id, labeled_at)
        values (
            ?1,
            (select coalesce(max(seq), 0) + 1 from session_labels where session_id = ?1),
            ?2,
            ?3
        )
        "#,
        params![session_id, property_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("record session label failed: {e}")))?;
    Ok(())
}

pub fn end_session(conn: &Connection, token: &SessionToken, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update label_sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, token.hash().as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("end session failed: {e}")))?;
    Ok(())
}

/// Pulls the session token out of a `Cookie` header value.
pub fn token_from_cookie_header(header: &str) -> Option<SessionToken> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE)
            .then(|| SessionToken::from_raw(value))
            .flatten()
    })
}

pub fn session_cookie(token: &SessionToken) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}",
        token.as_str()
    )
}

pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
