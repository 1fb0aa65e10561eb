use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use folio_core::api::{ApiResponse, LoginRequest, v1};
use folio_core::providers::AuthUser;
use folio_model::{ContentKind, error::require};
use serde::Serialize;
use tracing::{info, warn};

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppJson, AppResult};
use crate::infra::session::{cleared_session_cookie, session_cookie, session_token};

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="es">
<head><meta charset="utf-8"><title>Iniciar sesión</title></head>
<body>
<h1>Iniciar sesión</h1>
<p>POST /api/v1/auth/login con {"email", "password"}.</p>
</body>
</html>"#;

/// Sends signed-in visitors straight to the admin panel.
pub async fn login_page_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = session_token(&headers, state.config());
    if state.gate.current_user(token.as_deref()).await.is_some() {
        return Redirect::to(v1::pages::ADMIN).into_response();
    }
    Html(LOGIN_PAGE).into_response()
}

fn cookie_header(value: String) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|e| AppError::internal(e.to_string()))
}

pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Response> {
    require("email", &request.email)?;
    require("password", &request.password)?;

    let session = state
        .gate
        .auth()
        .sign_in(request.email.trim(), &request.password)
        .await?;
    info!(user_id = %session.user.id, "admin sign-in");

    let cookie = cookie_header(session_cookie(
        state.config(),
        &session.access_token,
        session.expires_in,
    ))?;
    let body = Json(ApiResponse::success(session.user));
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = session_token(&headers, state.config())
        && let Err(err) = state.gate.auth().sign_out(&token).await
    {
        warn!(error = %err, "backend sign-out failed; clearing cookie anyway");
    }

    let cookie = cookie_header(cleared_session_cookie(state.config()))?;
    let body = Json(ApiResponse::success(()).with_message("signed out"));
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

#[derive(Debug, Serialize)]
pub struct AdminSection {
    pub key: &'static str,
    pub title: &'static str,
    pub ordered: bool,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct AdminIndex {
    pub user: AuthUser,
    pub sections: Vec<AdminSection>,
}

/// Section list for the admin sidebar.
pub async fn admin_index_handler(
    Extension(user): Extension<AuthUser>,
) -> Json<ApiResponse<AdminIndex>> {
    let sections = ContentKind::ALL
        .into_iter()
        .map(|kind| AdminSection {
            key: kind.table(),
            title: kind.title(),
            ordered: kind.is_ordered(),
            href: v1::admin::collection(kind),
        })
        .collect();
    Json(ApiResponse::success(AdminIndex { user, sections }))
}
