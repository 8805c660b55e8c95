//! Uploaded file descriptors.

use std::path::{Path, PathBuf};

use kwa_model::FileFormat;

use crate::error::{IngestError, Result};

/// A file handed over by the caller: name, optional format tag, raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name including its extension (no directory part).
    pub name: String,
    /// Explicit format tag; derived from the extension when absent.
    pub format: Option<FileFormat>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            format: None,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Reads an upload from disk, keeping only the file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// Resolves the format tag, falling back to the file extension.
    pub fn format(&self) -> Result<FileFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        let extension = Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        FileFormat::from_extension(extension).ok_or_else(|| IngestError::UnsupportedFormat {
            file: self.name.clone(),
            extension: extension.to_string(),
        })
    }

    /// Site name derived from the file name without its extension.
    pub fn source_name(&self) -> String {
        let path = PathBuf::from(&self.name);
        path.file_stem()
            .map(|stem| stem.to_string_lossy().trim().to_string())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| self.name.clone())
    }
}
