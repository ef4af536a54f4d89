// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers: submission page, submission pipeline, health.
//!
//! The submission pipeline is a single pass with no retries:
//! token check -> validate -> encrypt -> persist -> respond. Every failure
//! is terminal for that request and mapped to the fixed JSON contract.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use postbox_core::{NewContact, PostboxError};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::csrf::SESSION_COOKIE;
use crate::validate::validate_submission;
use crate::AppState;

/// Submission page template. `{{csrf_token}}` is replaced at render time.
const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Contact us</title>
</head>
<body>
  <h1>Contact us</h1>
  <form method="post" action="/submit">
    <input type="hidden" name="csrf_token" value="{{csrf_token}}">
    <label>Name <input type="text" name="name" maxlength="100" required></label>
    <label>Email <input type="email" name="email" required></label>
    <label>Message <textarea name="message" maxlength="500" required></textarea></label>
    <button type="submit">Send</button>
  </form>
</body>
</html>
"#;

/// Form fields for POST /submit.
///
/// All fields default to empty so that an absent field flows through the
/// validator (and reports "all fields required") instead of failing
/// deserialization with an unstructured 422.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub csrf_token: String,
}

/// Fixed response contract for POST /submit (success and failure alike).
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// GET /
///
/// Renders the submission page. Creates a session cookie on first visit and
/// reuses the session's CSRF token on subsequent renders.
pub async fn get_index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let existing = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());

    let (jar, token) = match existing {
        Some(session_id) => match state.sessions.token_or_issue(&session_id) {
            Ok(token) => (jar, token),
            Err(e) => return internal_error(&e, "token issuance failed"),
        },
        None => match state.sessions.issue() {
            Ok((session_id, token)) => {
                let cookie = Cookie::build((SESSION_COOKIE, session_id))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Strict)
                    .build();
                (jar.add(cookie), token)
            }
            Err(e) => return internal_error(&e, "token issuance failed"),
        },
    };

    let page = FORM_PAGE.replace("{{csrf_token}}", &token);
    (jar, Html(page)).into_response()
}

/// POST /submit
///
/// Runs the submission pipeline and returns the JSON contract:
/// 200 on success, 400 for CSRF or validation rejection, 500 for anything
/// else (generic message; detail goes to the log only).
pub async fn post_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SubmitForm>,
) -> Response {
    // Token check: the submitted token must match the session's stored one.
    let token_ok = jar
        .get(SESSION_COOKIE)
        .map(|c| state.sessions.verify(c.value(), &form.csrf_token))
        .unwrap_or(false);
    if !token_ok {
        return reject(StatusCode::BAD_REQUEST, "invalid csrf token");
    }

    // Validate: first failure wins, reason is echoed to the client.
    if let Err(e) = validate_submission(&form.name, &form.email, &form.message) {
        return reject(StatusCode::BAD_REQUEST, &e.to_string());
    }

    // Encrypt: failure here is unexpected given a valid key.
    let ciphertext = match state.cipher.encrypt(form.message.as_bytes()) {
        Ok(ct) => ct,
        Err(e) => return internal_error(&e, "message encryption failed"),
    };

    // Persist: storage detail never reaches the client.
    let contact = NewContact {
        name: form.name,
        email: form.email,
        message: ciphertext,
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    match postbox_storage::queries::contacts::insert_contact(&state.db, &contact).await {
        Ok(id) => {
            info!(id, "contact submission stored");
            (
                StatusCode::OK,
                Json(SubmitResponse {
                    success: true,
                    message: "submitted".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => internal_error(&e, "contact insert failed"),
    }
}

/// GET /health
///
/// Unauthenticated status endpoint for process supervision.
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

fn reject(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(SubmitResponse {
            success: false,
            message: message.to_string(),
        }),
    )
        .into_response()
}

fn internal_error(err: &PostboxError, context: &str) -> Response {
    error!(error = %err, "{context}");
    reject(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_page_embeds_token() {
        let page = FORM_PAGE.replace("{{csrf_token}}", "tok123");
        assert!(page.contains(r#"name="csrf_token" value="tok123""#));
        assert!(!page.contains("{{csrf_token}}"));
    }

    #[test]
    fn submit_form_defaults_missing_fields_to_empty() {
        let form: SubmitForm = serde_urlencoded::from_str("name=Ada").unwrap();
        assert_eq!(form.name, "Ada");
        assert!(form.email.is_empty());
        assert!(form.message.is_empty());
        assert!(form.csrf_token.is_empty());
    }
}
