use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::UploadError;

/// Target platform for a captioning run.
///
/// Platforms are an open set: any name works as long as a matching
/// `<platform>-prompt.txt` exists. Schema validation recognizes exactly
/// two response shapes — the subreddit list shape for `"reddit"` and
/// the generic caption/tags shape for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform(String);

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this platform expects the subreddit list schema.
    pub fn is_reddit(&self) -> bool {
        self.0 == "reddit"
    }

    /// Name of the prompt template file for this platform.
    pub fn prompt_filename(&self) -> String {
        format!("{}-prompt.txt", self.0)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One suggested subreddit with its caption, as returned for the
/// Reddit schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubredditEntry {
    pub subreddit: String,
    pub caption: String,
}

/// Platform-specific structured content extracted from a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionPayload {
    /// Generic caption-plus-tags shape (Flickr, Instagram, ...).
    /// Tag order is preserved exactly as the model returned it.
    Tags { caption: String, tags: Vec<String> },
    /// Reddit shape: an ordered list of (subreddit, caption) pairs.
    Subreddits { entries: Vec<SubredditEntry> },
}

/// Outcome of captioning a single image file.
///
/// A `Success` payload always matches the platform's schema; a shape
/// mismatch is reported as `Failure`, never as a partially-filled
/// `Success`. Results are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Success {
        filename: String,
        platform: Platform,
        payload: CaptionPayload,
    },
    Failure {
        filename: String,
        platform: Platform,
        error: String,
    },
}

impl UploadResult {
    pub fn success(filename: impl Into<String>, platform: &Platform, payload: CaptionPayload) -> Self {
        Self::Success {
            filename: filename.into(),
            platform: platform.clone(),
            payload,
        }
    }

    pub fn failure(filename: impl Into<String>, platform: &Platform, error: UploadError) -> Self {
        Self::Failure {
            filename: filename.into(),
            platform: platform.clone(),
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Per-run result mapping, keyed by filename in insertion order.
pub type BatchResults = IndexMap<String, UploadResult>;
