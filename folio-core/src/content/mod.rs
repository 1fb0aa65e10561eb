pub mod access;
pub mod facade;
pub mod notify;
pub mod ordering;
pub mod page;
pub mod upload;

pub use access::{AccessDecision, AccessGate};
pub use facade::{ContentFacade, MoveOutcome, Reordered};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use page::{PageContent, PageService};
pub use upload::{AssetUploader, FileUpload};
