//! Upload handling and attachment descriptors
//!
//! This module normalizes an uploaded file into a display-safe descriptor
//! (name, human-readable size, mime type) and enforces the client-side size
//! limit. The raw bytes live only as long as the single request that carries
//! them; descriptors keep no content.

use crate::error::{CobaError, Result, MAX_UPLOAD_BYTES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extensions presented to the user as supported
///
/// Advisory only: the list filters what the picker offers, a renamed file
/// can bypass it. Content validation is the analysis service's job.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt"];

/// An uploaded file pending submission
///
/// Holds the raw bytes together with the metadata needed to build the
/// multipart request and the display descriptor. Dropped (with its bytes)
/// as soon as the originating request completes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name (display only, not a filesystem path)
    pub name: String,
    /// Mime type as reported by the source
    pub mime_type: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload from in-memory bytes
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads an upload from a local file path
    ///
    /// The mime type is guessed from the extension; unknown extensions fall
    /// back to `application/octet-stream`.
    ///
    /// # Errors
    ///
    /// Returns `FileLoad` if the path cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| CobaError::FileLoad(format!("{}: {}", path.display(), e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = guess_mime_type(&name);
        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    /// Size of the upload in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// True if the file name ends in one of the advertised extensions
    pub fn has_accepted_extension(&self) -> bool {
        let lower = self.name.to_lowercase();
        ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

/// Display-safe metadata about an uploaded file
///
/// Derived once at submission time and never recomputed; carries no raw
/// content, so it is safe to keep in the transcript after the upload's
/// bytes are gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    /// Original file name
    pub name: String,
    /// Size rendered in the largest whole unit (bytes, KB, or MB)
    pub size_label: String,
    /// Mime type as reported by the source file
    pub mime_type: String,
}

impl AttachmentDescriptor {
    /// Builds a descriptor for an upload, validating the size limit
    ///
    /// # Errors
    ///
    /// Returns `FileTooLarge` when the upload exceeds 10 MiB. The upload is
    /// rejected and not attached; the caller's prior input mode is left
    /// unchanged. A file of exactly 10 MiB is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use coba::attachment::{AttachmentDescriptor, FileUpload};
    ///
    /// let upload = FileUpload::new("report.pdf", "application/pdf", vec![0u8; 2048]);
    /// let descriptor = AttachmentDescriptor::from_upload(&upload).unwrap();
    /// assert_eq!(descriptor.size_label, "2.0 KB");
    /// ```
    pub fn from_upload(upload: &FileUpload) -> Result<Self> {
        let size = upload.size();
        if size > MAX_UPLOAD_BYTES {
            return Err(CobaError::FileTooLarge {
                size,
                limit: MAX_UPLOAD_BYTES,
            }
            .into());
        }
        Ok(Self {
            name: upload.name.clone(),
            size_label: format_file_size(size),
            mime_type: upload.mime_type.clone(),
        })
    }
}

/// Renders a byte count in its largest whole unit
///
/// Below 1024 the exact byte count is shown; below 1 MiB the size is shown
/// in KB with one decimal; everything else in MB with one decimal.
///
/// # Examples
///
/// ```
/// use coba::attachment::format_file_size;
///
/// assert_eq!(format_file_size(512), "512 bytes");
/// assert_eq!(format_file_size(2048), "2.0 KB");
/// assert_eq!(format_file_size(5_242_880), "5.0 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}

/// Guesses a mime type from a file name extension
fn guess_mime_type(name: &str) -> String {
    let lower = name.to_lowercase();
    let mime = if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".doc") {
        "application/msword"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    };
    mime.to_string()
}
