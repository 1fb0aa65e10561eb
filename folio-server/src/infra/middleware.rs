use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use folio_core::api::v1;
use folio_core::content::AccessDecision;
use tracing::debug;

use crate::infra::app_state::AppState;
use crate::infra::session::session_token;

const NOT_AUTHORIZED_PAGE: &str = r#"<!doctype html>
<html lang="es">
<head><meta charset="utf-8"><title>No autorizado</title></head>
<body><h1>No estás autorizado.</h1></body>
</html>"#;

/// Lets admins through with their [`folio_core::providers::AuthUser`] in
/// the request extensions. Signed-out visitors go to the login page;
/// signed-in non-admins get a static denial page.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers(), state.config());

    match state.gate.check(token.as_deref()).await {
        AccessDecision::Admin(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        AccessDecision::Unauthenticated => {
            debug!(path = %request.uri().path(), "redirecting signed-out visitor to login");
            Redirect::to(v1::pages::LOGIN).into_response()
        }
        AccessDecision::Forbidden(_) => {
            (StatusCode::FORBIDDEN, Html(NOT_AUTHORIZED_PAGE)).into_response()
        }
    }
}
