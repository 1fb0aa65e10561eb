use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use folio_model::{Bucket, UploadSlot, ValidationError};
use tracing::{debug, info};
use uuid::Uuid;

use crate::content::notify::{self, Notifier};
use crate::error::{ContentError, Result};
use crate::providers::ObjectStorage;

/// A file picked in the admin panel.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Object name for an upload: a random uuid keeping the original
/// extension, e.g. `cv.final.pdf` -> `<uuid>.pdf`.
pub fn object_name(original: &str) -> String {
    let id = Uuid::new_v4();
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);
    match base.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{id}.{ext}"),
        _ => id.to_string(),
    }
}

/// Pushes files to object storage and hands back their public URL.
///
/// One upload at a time per instance.
pub struct AssetUploader {
    storage: Arc<dyn ObjectStorage>,
    notifier: Arc<Notifier>,
    in_flight: AtomicBool,
}

impl fmt::Debug for AssetUploader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetUploader")
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AssetUploader {
    pub fn new(storage: Arc<dyn ObjectStorage>, notifier: Arc<Notifier>) -> Self {
        Self {
            storage,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Uploads `file` into `bucket` and returns its public URL.
    ///
    /// `slot` only selects the success notice; the caller applies the URL
    /// to its field.
    pub async fn upload(
        &self,
        bucket: Bucket,
        file: Option<FileUpload>,
        slot: UploadSlot,
    ) -> Result<String> {
        let Some(file) = file else {
            self.notifier.error(None, notify::NO_FILE, None);
            return Err(ValidationError::Required("file").into());
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ContentError::Busy("an upload is already in progress".into()));
        }
        let _guard = InFlight(&self.in_flight);

        let name = object_name(&file.file_name);
        debug!(bucket = bucket.name(), %name, original = %file.file_name, "uploading asset");

        if let Err(err) = self
            .storage
            .upload(bucket, &name, file.content_type.as_deref(), file.bytes)
            .await
        {
            self.notifier
                .error(None, notify::UPLOAD_FAILED, err.to_string());
            return Err(err);
        }

        let url = self.storage.public_url(bucket, &name);
        if url.is_empty() {
            self.notifier.error(None, notify::NO_PUBLIC_URL, None);
            return Err(ContentError::Storage(notify::NO_PUBLIC_URL.into()));
        }

        info!(bucket = bucket.name(), %url, "asset uploaded");
        let title = match slot {
            UploadSlot::Append => notify::GALLERY_UPLOADED,
            UploadSlot::Replace => notify::UPLOADED,
        };
        self.notifier.success(None, title);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::notify::NoticeLevel;
    use crate::testing::MemoryStorage;

    fn pdf(name: &str) -> Option<FileUpload> {
        Some(FileUpload {
            file_name: name.into(),
            content_type: Some("application/pdf".into()),
            bytes: b"%PDF-1.7".to_vec(),
        })
    }

    #[test]
    fn object_names_keep_the_last_extension() {
        let name = object_name("cv.final.pdf");
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), 36 + 4);
        assert_ne!(object_name("a.png"), object_name("a.png"));
    }

    #[test]
    fn names_without_extension_get_a_bare_uuid() {
        let name = object_name("README");
        assert!(Uuid::parse_str(&name).is_ok());
        let dotted_dir = object_name("v1.2/photo");
        assert!(Uuid::parse_str(&dotted_dir).is_ok());
    }

    #[tokio::test]
    async fn missing_file_fails_without_network() {
        let storage = Arc::new(MemoryStorage::default());
        let notifier = Arc::new(Notifier::new(8));
        let mut rx = notifier.subscribe();
        let uploader = AssetUploader::new(storage.clone(), notifier);

        let err = uploader
            .upload(Bucket::Projects, None, UploadSlot::Replace)
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Validation(_)));
        assert_eq!(storage.upload_count(), 0);
        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.title, "Por favor, selecciona un archivo primero.");
        assert_eq!(notice.level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn successful_upload_returns_public_url() {
        let storage = Arc::new(MemoryStorage::default());
        let notifier = Arc::new(Notifier::new(8));
        let mut rx = notifier.subscribe();
        let uploader = AssetUploader::new(storage.clone(), notifier);

        let url = uploader
            .upload(Bucket::Cvs, pdf("cv.pdf"), UploadSlot::Replace)
            .await
            .unwrap();

        assert!(url.starts_with("memory://cvs/"));
        assert!(url.ends_with(".pdf"));
        assert_eq!(storage.upload_count(), 1);
        assert!(!uploader.is_uploading());
        assert_eq!(rx.recv().await.unwrap().title, "Archivo subido exitosamente.");
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let storage = Arc::new(MemoryStorage::default());
        storage.fail_uploads("Bucket not found");
        let notifier = Arc::new(Notifier::new(8));
        let mut rx = notifier.subscribe();
        let uploader = AssetUploader::new(storage, notifier);

        let err = uploader
            .upload(Bucket::Projects, pdf("shot.png"), UploadSlot::Append)
            .await
            .unwrap_err();

        assert_eq!(err, ContentError::Storage("Bucket not found".into()));
        assert!(!uploader.is_uploading());
        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.title, "Error al subir el archivo.");
        assert_eq!(notice.description.as_deref(), Some("Bucket not found"));
    }

    #[tokio::test]
    async fn empty_public_url_is_an_error() {
        let storage = Arc::new(MemoryStorage::without_public_urls());
        let notifier = Arc::new(Notifier::new(8));
        let uploader = AssetUploader::new(storage, notifier);

        let err = uploader
            .upload(Bucket::Technologies, pdf("logo.svg"), UploadSlot::Replace)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ContentError::Storage("Error al obtener la URL pública del archivo.".into())
        );
    }

    #[tokio::test]
    async fn second_upload_on_a_busy_instance_is_rejected() {
        let storage = Arc::new(MemoryStorage::default());
        let gate = storage.hold_uploads();
        let uploader = Arc::new(AssetUploader::new(storage.clone(), Arc::new(Notifier::new(8))));

        let first = {
            let uploader = Arc::clone(&uploader);
            tokio::spawn(async move {
                uploader
                    .upload(Bucket::Projects, pdf("a.png"), UploadSlot::Replace)
                    .await
            })
        };
        while !uploader.is_uploading() {
            tokio::task::yield_now().await;
        }

        let second = uploader
            .upload(Bucket::Projects, pdf("b.png"), UploadSlot::Replace)
            .await;
        assert!(matches!(second, Err(ContentError::Busy(_))));

        let other = AssetUploader::new(storage.clone(), Arc::new(Notifier::new(8)));
        assert!(!other.is_uploading());

        gate.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(!uploader.is_uploading());
    }
}
