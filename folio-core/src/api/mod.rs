mod routes;
mod responses;

pub use responses::{
    ApiResponse, LangRequest, ListEditRequest, LoginRequest, MoveRequest, UploadedAsset,
};
pub use routes::v1;
