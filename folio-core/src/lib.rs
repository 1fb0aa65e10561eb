//! # Folio Core
//!
//! Content services behind the Folio portfolio site: per-table admin
//! façades with up/down reordering, the asset uploader, the public page
//! assembler and the admin access check.
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL repositories and the embedded [`MIGRATOR`]
//! - `testing`: in-memory adapters for every port
//!
//! Store, storage and auth are reached through the async traits in
//! [`database::ports`] and [`providers`]; everything in [`content`] depends
//! only on those traits.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Route table and response envelope shared with HTTP clients
pub mod api;

/// Store ports and their PostgreSQL implementations
pub mod database;

/// Error types shared by every service
pub mod error;

/// Hosted storage and auth clients
pub mod providers;

/// Façades, ordering, uploads, notices and page assembly
pub mod content;

/// In-memory adapters for tests
#[cfg(any(test, feature = "testing"))]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use error::{ContentError, Result};
