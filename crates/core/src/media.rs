//! Input-file references and pre-pipeline validation.
//!
//! The upload surface hands the pipeline a name, a size, and an optional
//! declared MIME type. The pipeline re-validates before doing anything
//! else; an unsupported type must never reach the analysis engine.

use serde::{Deserialize, Serialize};

pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "ogg", "aac", "m4a", "mp4", "mpeg", "mov", "avi", "webm",
];

const SUPPORTED_MIME_SUBTYPES: &[&str] = &[
    "mpeg", "mp3", "wav", "ogg", "aac", "m4a", "mp4", "quicktime", "x-msvideo", "webm",
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub size_bytes: u64,
    pub media_type: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("unsupported file type: {name} (expected audio/video: mp3, wav, mp4, mov, ...)")]
    UnsupportedType { name: String },
}

impl MediaFile {
    pub fn new<S: Into<String>>(name: S, size_bytes: u64, media_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type,
        }
    }

    /// Accepts a file when either its extension or its declared MIME
    /// subtype matches a supported audio/video format.
    pub fn validate(&self) -> Result<(), MediaError> {
        let name = self.name.to_lowercase();
        let has_valid_extension = SUPPORTED_EXTENSIONS
            .iter()
            .any(|ext| name.ends_with(&format!(".{ext}")));

        let has_valid_type = self
            .media_type
            .as_deref()
            .map(|t| {
                let t = t.to_lowercase();
                SUPPORTED_MIME_SUBTYPES.iter().any(|sub| t.contains(sub))
            })
            .unwrap_or(false);

        if has_valid_extension || has_valid_type {
            Ok(())
        } else {
            Err(MediaError::UnsupportedType {
                name: self.name.clone(),
            })
        }
    }
}
