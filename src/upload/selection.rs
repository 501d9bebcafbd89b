use std::fmt;
use std::io;
use std::path::Path;

use tokio::fs;

use crate::models::ValidationError;

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// The file currently held by the upload dialog.
///
/// Dialog-scoped and transient: replaced wholesale when a newer file is
/// chosen, destroyed when the dialog closes. The bytes are an opaque
/// payload — the client never parses CSV content.
#[derive(Clone, Eq, PartialEq)]
pub struct SelectedFile {
    name: String,
    bytes: Vec<u8>
}

// The payload can be 10MB; keep debug output to name and size.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes
        }
    }

    /// Picker adapter: reads the file at `path` into memory.
    pub async fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path).await?;
        let name = path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.name, self.bytes)
    }

    /// Synchronous validation; the filename rule wins over the size rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.name.ends_with(".csv") {
            return Err(ValidationError::NotCsv);
        }

        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::TooLarge);
        }

        Ok(())
    }

    /// Human-readable size for the file preview row.
    pub fn formatted_size(&self) -> String {
        let bytes = self.bytes.len();

        if bytes < 1024 {
            return format!("{bytes} B");
        }

        if bytes < 1024 * 1024 {
            return format!("{:.2} KB", bytes as f64 / 1024.0);
        }

        format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
