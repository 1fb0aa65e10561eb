//! Cookie helpers for the session token and the language preference.

use axum::http::{HeaderMap, header};
use folio_model::Lang;

use crate::infra::config::Config;

/// Thirty days.
pub const LANG_COOKIE_MAX_AGE: u64 = 2_592_000;

pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Access token from the session cookie, falling back to a bearer header.
pub fn session_token(headers: &HeaderMap, config: &Config) -> Option<String> {
    cookie_value(headers, &config.auth.session_cookie).or_else(|| bearer_token(headers))
}

/// Language from `?lang=`, then the cookie, then the configured default.
pub fn request_lang(headers: &HeaderMap, query: Option<&str>, config: &Config) -> Lang {
    query
        .and_then(|tag| tag.parse().ok())
        .or_else(|| cookie_value(headers, &config.i18n.cookie_name).and_then(|tag| tag.parse().ok()))
        .unwrap_or(config.i18n.default_lang)
}

fn secure_suffix(config: &Config) -> &'static str {
    if config.auth.secure_cookies { "; Secure" } else { "" }
}

pub fn session_cookie(config: &Config, token: &str, max_age: i64) -> String {
    format!(
        "{}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
        config.auth.session_cookie,
        max_age.max(0),
        secure_suffix(config)
    )
}

pub fn cleared_session_cookie(config: &Config) -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{}",
        config.auth.session_cookie,
        secure_suffix(config)
    )
}

pub fn lang_cookie(config: &Config, lang: Lang) -> String {
    format!(
        "{}={lang}; Path=/; Max-Age={LANG_COOKIE_MAX_AGE}; SameSite=Lax",
        config.i18n.cookie_name
    )
}
