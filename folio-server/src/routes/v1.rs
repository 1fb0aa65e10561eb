use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};
use folio_core::api::v1::{self, admin};
use folio_core::database::Section;
use folio_model::{
    Experience, GeneralText, Hero, ListFields, OrderedEntity, Project, SocialLink, Technology,
};

use crate::handlers::{
    admin::{
        create_handler, delete_handler, list_edit_handler, list_handler, move_handler,
        update_handler,
    },
    auth::{admin_index_handler, login_handler, login_page_handler, logout_handler},
    notices::notices_sse_handler,
    page::{page_handler, set_lang_handler},
    uploads::{
        hero_cv_handler, project_gallery_handler, project_image_handler,
        technology_logo_handler, upload_handler,
    },
};
use crate::infra::app_state::AppState;
use crate::infra::middleware::require_admin;

/// Routes open to every visitor
pub fn create_public_routes() -> Router<AppState> {
    Router::new()
        .route(v1::PAGE, get(page_handler))
        .route(v1::LANG, put(set_lang_handler))
        .route(v1::pages::LOGIN, get(login_page_handler))
        .route(v1::auth::LOGIN, post(login_handler))
        .route(v1::auth::LOGOUT, post(logout_handler))
}

/// Admin panel routes, all behind [`require_admin`]
pub fn create_admin_routes(state: AppState) -> Router<AppState> {
    let upload_limit = DefaultBodyLimit::max(state.config().upload.max_bytes);

    Router::new()
        .route(v1::pages::ADMIN, get(admin_index_handler))
        .route(admin::ROOT, get(admin_index_handler))
        .route(admin::NOTICES, get(notices_sse_handler))
        .merge(section_routes::<GeneralText>())
        .merge(section_routes::<Hero>())
        .merge(section_routes::<SocialLink>())
        .merge(ordered_section_routes::<Project>())
        .merge(ordered_section_routes::<Experience>())
        .merge(ordered_section_routes::<Technology>())
        .merge(list_routes::<Project>())
        .merge(list_routes::<Experience>())
        .merge(create_upload_routes().layer(upload_limit))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

fn section_routes<E: Section>() -> Router<AppState> {
    Router::new()
        .route(
            &admin::collection(E::KIND),
            get(list_handler::<E>).post(create_handler::<E>),
        )
        .route(
            &admin::item(E::KIND),
            put(update_handler::<E>).delete(delete_handler::<E>),
        )
}

fn ordered_section_routes<E: Section + OrderedEntity>() -> Router<AppState> {
    section_routes::<E>().route(&admin::move_item(E::KIND), post(move_handler::<E>))
}

fn list_routes<E: Section + ListFields>() -> Router<AppState> {
    Router::new().route(&admin::list_field(E::KIND), post(list_edit_handler::<E>))
}

fn create_upload_routes() -> Router<AppState> {
    Router::new()
        .route(admin::UPLOAD, post(upload_handler))
        .route(admin::HERO_CV, post(hero_cv_handler))
        .route(admin::PROJECT_IMAGE, post(project_image_handler))
        .route(admin::PROJECT_GALLERY, post(project_gallery_handler))
        .route(admin::TECHNOLOGY_LOGO, post(technology_logo_handler))
}
