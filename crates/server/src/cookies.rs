// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cookie handling for the per-client simulation override.
//!
//! The override lives only in an `HttpOnly` cookie, so each browser
//! carries its own simulated date and client scripts cannot read or
//! change it. Expiry is enforced by the browser through `Max-Age`.

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
};
use cookie::{Cookie, SameSite};
use std::convert::Infallible;
use std::sync::Mutex;
use stepline::{ContextError, OverrideStore};
use time::Duration;
use tracing::{debug, error};

use crate::AppState;

/// Largest `Set-Cookie` value browsers are required to accept.
const MAX_COOKIE_BYTES: usize = 4096;

/// `(name, value)` of every well-formed request cookie, with quotes
/// around values removed. Values are still percent-encoded.
fn cookie_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(|parsed| match parsed {
            Ok(cookie) => Some((
                cookie.name().to_string(),
                cookie.value_trimmed().to_string(),
            )),
            Err(e) => {
                debug!(error = %e, "Skipping malformed cookie");
                None
            }
        })
        .collect()
}

/// Reads a cookie from the request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    cookie_pairs(headers)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Attributes shared by every cookie the server sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    /// Add the `Secure` attribute.
    pub secure: bool,
}

impl CookieSettings {
    /// Builds a path-wide, `HttpOnly`, `SameSite=Lax` `Set-Cookie` value.
    #[must_use]
    pub fn build(&self, name: &str, value: &str, max_age_seconds: i64) -> String {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(cookie::time::Duration::seconds(max_age_seconds))
            .build()
            .to_string()
    }
}

#[derive(Debug)]
struct CookieState {
    values: Vec<(String, String)>,
    set_cookies: Vec<String>,
}

/// An [`OverrideStore`] over the cookies of one request.
///
/// Reads see the request's cookies plus any writes made while handling it.
/// Writes are collected as `Set-Cookie` headers for the response.
#[derive(Debug)]
pub struct CookieOverrideStore {
    settings: CookieSettings,
    state: Mutex<CookieState>,
}

impl CookieOverrideStore {
    /// Creates a store over the cookies in `headers`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, settings: CookieSettings) -> Self {
        let values: Vec<(String, String)> = cookie_pairs(headers);

        Self {
            settings,
            state: Mutex::new(CookieState {
                values,
                set_cookies: Vec::new(),
            }),
        }
    }

    /// Response headers carrying every cookie change made so far.
    #[must_use]
    pub fn response_headers(&self) -> HeaderMap {
        let mut headers: HeaderMap = HeaderMap::new();
        let Ok(state) = self.state.lock() else {
            error!("Cookie state lock poisoned");
            return headers;
        };
        for cookie in &state.set_cookies {
            match HeaderValue::from_str(cookie) {
                Ok(value) => {
                    headers.append(SET_COOKIE, value);
                }
                Err(e) => error!(error = %e, "Dropping unrepresentable cookie"),
            }
        }
        headers
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, CookieState>, ContextError> {
        self.state
            .lock()
            .map_err(|_| ContextError::new("cookie state lock poisoned"))
    }
}

impl OverrideStore for CookieOverrideStore {
    fn read(&self, key: &str) -> Result<Option<String>, ContextError> {
        let state = self.lock()?;
        let Some((_, raw)) = state.values.iter().rev().find(|(name, _)| name == key) else {
            return Ok(None);
        };
        let decoded = urlencoding::decode(raw)
            .map_err(|e| ContextError::new(format!("cookie {key} is not valid UTF-8: {e}")))?;
        Ok(Some(decoded.into_owned()))
    }

    fn write(&self, key: &str, value: &str, lifetime: Duration) -> Result<(), ContextError> {
        let encoded: String = urlencoding::encode(value).into_owned();
        let cookie: String = self
            .settings
            .build(key, &encoded, lifetime.whole_seconds());
        if cookie.len() > MAX_COOKIE_BYTES {
            return Err(ContextError::new(format!(
                "cookie {key} would be {} bytes",
                cookie.len()
            )));
        }

        let mut state = self.lock()?;
        state.values.retain(|(name, _)| name != key);
        state.values.push((key.to_string(), encoded));
        state.set_cookies.push(cookie);
        debug!(key, "Queued override cookie");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ContextError> {
        let cookie: String = self.settings.build(key, "", 0);
        let mut state = self.lock()?;
        state.values.retain(|(name, _)| name != key);
        state.set_cookies.push(cookie);
        debug!(key, "Queued override cookie removal");
        Ok(())
    }
}

/// Extractor for the calling client's override store.
pub struct ClientOverrides(pub CookieOverrideStore);

impl FromRequestParts<AppState> for ClientOverrides {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(CookieOverrideStore::from_headers(
            &parts.headers,
            state.cookies,
        )))
    }
}
