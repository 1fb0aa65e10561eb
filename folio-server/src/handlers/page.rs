use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use folio_core::api::{ApiResponse, LangRequest};
use folio_core::content::PageContent;
use serde::Deserialize;
use tracing::debug;

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppJson, AppResult};
use crate::infra::session::{lang_cookie, request_lang};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub lang: Option<String>,
}

/// Public page content in the visitor's language.
pub async fn page_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Json<ApiResponse<PageContent>> {
    let lang = request_lang(&headers, query.lang.as_deref(), state.config());
    Json(ApiResponse::success(state.page.load(lang).await))
}

/// Stores the language preference in a cookie. Content is never touched.
pub async fn set_lang_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<LangRequest>,
) -> AppResult<Response> {
    let lang = request.parse()?;
    debug!(%lang, "language preference changed");

    let cookie = HeaderValue::from_str(&lang_cookie(state.config(), lang))
        .map_err(|e| AppError::internal(e.to_string()))?;
    let body = Json(ApiResponse::success(serde_json::json!({ "lang": lang })));
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}
