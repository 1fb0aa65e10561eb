pub use folio_config::*;
