mod dialog;
mod selection;

pub use dialog::UploadDialog;
pub use selection::{SelectedFile, MAX_UPLOAD_BYTES};
