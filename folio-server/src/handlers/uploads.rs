use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use folio_core::api::{ApiResponse, UploadedAsset};
use folio_core::content::FileUpload;
use folio_core::database::Section;
use folio_model::{Bucket, Hero, Project, Technology, UploadSlot};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::infra::app_state::AppState;
use crate::infra::errors::{AppError, AppResult};

const FILE_FIELD: &str = "file";

/// Pulls the `file` part out of a multipart body. A part with neither a
/// file name nor content counts as no file at all.
async fn read_file(mut multipart: Multipart) -> AppResult<Option<FileUpload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::new(e.status(), e.body_text()))?;

        if file_name.is_empty() && bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(FileUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

async fn store(
    state: &AppState,
    bucket: Bucket,
    multipart: Multipart,
    slot: UploadSlot,
) -> AppResult<String> {
    let file = read_file(multipart).await?;
    Ok(state.uploader().upload(bucket, file, slot).await?)
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub slot: Option<UploadSlot>,
}

/// Uploads into `bucket` and returns the public URL without touching any
/// row; the caller decides where it goes.
pub async fn upload_handler(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Query(query): Query<UploadQuery>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<UploadedAsset>>> {
    let bucket: Bucket = bucket.parse()?;
    let slot = query.slot.unwrap_or(UploadSlot::Replace);
    let url = store(&state, bucket, multipart, slot).await?;
    Ok(Json(ApiResponse::success(UploadedAsset { url })))
}

/// Uploads, then writes the URL into one field of row `id`. The row is
/// looked up first so a bad id never leaves an orphaned object behind.
async fn upload_into<E, F>(
    state: &AppState,
    id: Uuid,
    bucket: Bucket,
    slot: UploadSlot,
    multipart: Multipart,
    apply: F,
) -> AppResult<Json<ApiResponse<E>>>
where
    E: Section,
    F: FnOnce(&mut E, String) + Send,
{
    let facade = state.facade::<E>();
    facade.get(id).await?;

    let url = store(state, bucket, multipart, slot).await?;
    debug!(section = %E::KIND, %id, %url, "applying uploaded asset");
    let updated = facade.edit(id, move |row| apply(row, url)).await?;
    Ok(Json(ApiResponse::success(updated)))
}

pub async fn hero_cv_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Hero>>> {
    upload_into(&state, id, Bucket::Cvs, UploadSlot::Replace, multipart, Hero::apply_upload).await
}

pub async fn project_image_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Project>>> {
    upload_into(
        &state,
        id,
        Bucket::Projects,
        UploadSlot::Replace,
        multipart,
        |project: &mut Project, url| project.apply_upload(UploadSlot::Replace, url),
    )
    .await
}

pub async fn project_gallery_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Project>>> {
    upload_into(
        &state,
        id,
        Bucket::Projects,
        UploadSlot::Append,
        multipart,
        |project: &mut Project, url| project.apply_upload(UploadSlot::Append, url),
    )
    .await
}

pub async fn technology_logo_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Technology>>> {
    upload_into(
        &state,
        id,
        Bucket::Technologies,
        UploadSlot::Replace,
        multipart,
        Technology::apply_upload,
    )
    .await
}
