//! Input composer: text/file exclusivity
//!
//! The composer tracks what the next submission will carry: free text or a
//! single attached file, never both. The two directions are deliberately
//! asymmetric, matching the product's observed affordances:
//!
//! - typing non-empty text while a file is attached clears the file;
//! - attaching while text is non-empty is rejected up front (`can_attach`
//!   is false), leaving the text untouched.

use crate::attachment::FileUpload;
use crate::error::{CobaError, Result, MAX_UPLOAD_BYTES};

/// Which input mode the next submission will use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Free-text submission (including empty text)
    Text,
    /// Single attached file submission
    File,
}

/// Pending input state for one conversation view
///
/// # Examples
///
/// ```
/// use coba::attachment::FileUpload;
/// use coba::composer::{Composer, InputMode};
///
/// let mut composer = Composer::new();
/// composer.attach(FileUpload::new("a.txt", "text/plain", vec![1, 2, 3])).unwrap();
/// assert_eq!(composer.mode(), InputMode::File);
///
/// // Typing clears the attachment
/// composer.set_input("hello");
/// assert_eq!(composer.mode(), InputMode::Text);
/// assert!(composer.upload().is_none());
/// ```
#[derive(Debug, Default)]
pub struct Composer {
    input: String,
    upload: Option<FileUpload>,
}

impl Composer {
    /// Creates an empty composer in free-text mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text input, untrimmed
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The attached upload, if any
    pub fn upload(&self) -> Option<&FileUpload> {
        self.upload.as_ref()
    }

    /// Current input mode
    pub fn mode(&self) -> InputMode {
        if self.upload.is_some() {
            InputMode::File
        } else {
            InputMode::Text
        }
    }

    /// Replaces the text input
    ///
    /// Setting a non-empty value while a file is attached clears the file
    /// (text wins on type). Pure state transition, no error conditions.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        if self.upload.is_some() && !self.input.is_empty() {
            tracing::debug!("text entered while file attached, clearing attachment");
            self.upload = None;
        }
    }

    /// True when the file-picking affordance is enabled
    ///
    /// Attaching is offered only while the trimmed text input is empty;
    /// text is never cleared in favor of a file.
    pub fn can_attach(&self) -> bool {
        self.input.trim().is_empty()
    }

    /// Attaches an upload for the next submission
    ///
    /// Inert when `can_attach()` is false (the state is left unchanged, no
    /// error). An upload over the 10 MiB limit is rejected with
    /// `FileTooLarge` and the prior mode is preserved.
    ///
    /// # Errors
    ///
    /// Returns `FileTooLarge` for an oversized upload.
    pub fn attach(&mut self, upload: FileUpload) -> Result<()> {
        if !self.can_attach() {
            tracing::debug!("attach ignored: text input is non-empty");
            return Ok(());
        }
        if upload.size() > MAX_UPLOAD_BYTES {
            return Err(CobaError::FileTooLarge {
                size: upload.size(),
                limit: MAX_UPLOAD_BYTES,
            }
            .into());
        }
        self.upload = Some(upload);
        // Mirror the original affordance: picking a file clears leftover
        // whitespace-only text.
        self.input.clear();
        Ok(())
    }

    /// Removes the attached file, returning to free-text mode
    pub fn remove_upload(&mut self) {
        self.upload = None;
    }

    /// True when a submission would pass the dispatch guard
    ///
    /// The guard uses the trimmed text (while the payload later sends the
    /// raw input as-is).
    pub fn has_submittable_input(&self) -> bool {
        !self.input.trim().is_empty() || self.upload.is_some()
    }

    /// Takes the pending input for submission, resetting to empty text mode
    ///
    /// Returns the raw untrimmed text and the upload, if one was attached.
    pub fn take(&mut self) -> (String, Option<FileUpload>) {
        let input = std::mem::take(&mut self.input);
        let upload = self.upload.take();
        (input, upload)
    }
}
