pub mod frontend;
pub mod manifest;
pub mod upload;

pub use frontend::{handle_index, handle_static};
pub use manifest::{handle_manifest, __path_handle_manifest};
pub use upload::{handle_upload, UploadForm, UploadResponse, __path_handle_upload};
