pub mod body;
pub mod client;
pub mod format;
pub mod response;

pub use body::{FileUpload, FormValue, MultipartForm, RequestBody};
pub use client::{ApiClient, RequestOptions};
pub use format::format_validation_errors;
pub use response::Payload;
