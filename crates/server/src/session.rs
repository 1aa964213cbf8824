// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Operators authenticate with the `stepline_session` cookie set at login.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use stepline_api::{AuthenticatedActor, AuthenticationService};
use stepline_persistence::OperatorData;
use tracing::{debug, warn};

use crate::AppState;
use crate::cookies::cookie_value;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "stepline_session";

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/login";

/// Extractor for authenticated operators.
///
/// ```ignore
/// async fn my_handler(
///     SessionOperator { actor, operator, .. }: SessionOperator,
/// ) -> Result<Json<Response>, HttpError> {
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Redirects to [`LOGIN_PATH`] with `303 See Other` if the session cookie
/// is missing, unknown, or expired, or if its operator is disabled.
pub struct SessionOperator {
    pub actor: AuthenticatedActor,
    pub operator: OperatorData,
    pub session_token: String,
}

impl FromRequestParts<AppState> for SessionOperator {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session_token: String = cookie_value(&parts.headers, SESSION_COOKIE).ok_or_else(|| {
            debug!(path = %parts.uri.path(), "Missing session cookie");
            SessionError::MissingSession
        })?;

        let mut persistence = state.persistence.lock().await;
        let (actor, operator) =
            AuthenticationService::validate_session(&mut persistence, &session_token).map_err(
                |e| {
                    warn!(error = %e, "Session validation failed");
                    SessionError::InvalidSession(e.to_string())
                },
            )?;

        debug!(
            login_name = %operator.login_name,
            role = ?actor.role,
            "Session validated successfully"
        );

        Ok(Self {
            actor,
            operator,
            session_token,
        })
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// No session cookie was sent.
    MissingSession,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingSession => debug!("Redirecting anonymous request to login"),
            Self::InvalidSession(reason) => debug!(%reason, "Redirecting to login"),
        }
        Redirect::to(LOGIN_PATH).into_response()
    }
}
