use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use folio_model::ContentKind;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, trace, warn};

pub const REORDERED: &str = "Orden actualizado";
pub const REORDER_FAILED: &str = "Error al reordenar";
pub const UPLOADED: &str = "Archivo subido exitosamente.";
pub const GALLERY_UPLOADED: &str = "Imagen de galería subida.";
pub const UPLOAD_FAILED: &str = "Error al subir el archivo.";
pub const NO_FILE: &str = "Por favor, selecciona un archivo primero.";
pub const NO_PUBLIC_URL: &str = "Error al obtener la URL pública del archivo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// User-facing result of one admin operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub sequence: u64,
    pub level: NoticeLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<ContentKind>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub at: DateTime<Utc>,
}

/// Fixed notice titles of one admin section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMessages {
    pub load_failed: &'static str,
    pub delete_failed: &'static str,
    pub deleted: &'static str,
    pub saved: &'static str,
}

pub fn messages(kind: ContentKind) -> SectionMessages {
    match kind {
        ContentKind::GeneralText => SectionMessages {
            load_failed: "Error al cargar textos",
            delete_failed: "Error al borrar texto",
            deleted: "Texto borrado exitosamente",
            saved: "Texto guardado exitosamente",
        },
        ContentKind::Hero => SectionMessages {
            load_failed: "Error al cargar sección Hero",
            delete_failed: "Error al borrar sección Hero",
            deleted: "Sección Hero borrada",
            saved: "Sección Hero actualizada",
        },
        ContentKind::Projects => SectionMessages {
            load_failed: "Error al cargar proyectos",
            delete_failed: "Error al borrar proyecto",
            deleted: "Proyecto borrado exitosamente",
            saved: "Proyecto guardado exitosamente",
        },
        ContentKind::Experience => SectionMessages {
            load_failed: "Error al cargar experiencia",
            delete_failed: "Error al borrar experiencia",
            deleted: "Experiencia borrada exitosamente",
            saved: "Experiencia guardada exitosamente",
        },
        ContentKind::Technologies => SectionMessages {
            load_failed: "Error al cargar tecnologías",
            delete_failed: "Error al borrar tecnología",
            deleted: "Tecnología borrada exitosamente",
            saved: "Tecnología guardada exitosamente",
        },
        ContentKind::SocialLinks => SectionMessages {
            load_failed: "Error al cargar enlaces",
            delete_failed: "Error al borrar enlace",
            deleted: "Enlace borrado exitosamente",
            saved: "Enlace guardado exitosamente",
        },
    }
}

pub fn save_failed(message: &str) -> String {
    format!("Error al guardar: {message}")
}

/// Broadcast channel of [`Notice`]s. Publishing never blocks and never
/// fails; notices sent while nobody listens are dropped.
#[derive(Debug)]
pub struct Notifier {
    tx: broadcast::Sender<Notice>,
    sequence: AtomicU64,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn publish(
        &self,
        level: NoticeLevel,
        section: Option<ContentKind>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Notice {
        let notice = Notice {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            level,
            section,
            title: title.into(),
            description,
            at: Utc::now(),
        };

        match notice.level {
            NoticeLevel::Success => info!(
                section = ?notice.section,
                "{}",
                notice.title
            ),
            NoticeLevel::Error => warn!(
                section = ?notice.section,
                description = notice.description.as_deref().unwrap_or_default(),
                "{}",
                notice.title
            ),
        }

        if self.tx.send(notice.clone()).is_err() {
            trace!("no notice subscribers");
        }
        notice
    }

    pub fn success(&self, section: Option<ContentKind>, title: impl Into<String>) -> Notice {
        self.publish(NoticeLevel::Success, section, title, None)
    }

    pub fn error(
        &self,
        section: Option<ContentKind>,
        title: impl Into<String>,
        description: impl Into<Option<String>>,
    ) -> Notice {
        self.publish(NoticeLevel::Error, section, title, description.into())
    }
}
