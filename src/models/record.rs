//! History record model.
//!
//! Records are supplied by an external store and are read-only to the
//! engine: a search call attaches transient scores to them but never
//! mutates their content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared reference to a Record for memory-efficient storage.
///
/// Search results reference the same underlying record as the caller's
/// snapshot, so records are never cloned during a search pass.
pub type RecordRef = Arc<Record>;

/// A single history record: a captured piece of text plus the context it
/// was captured in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Unique identifier, stable for the lifetime of the record
    pub id: u64,

    /// Primary text body
    pub content: String,

    /// Label of the application the record came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_app: Option<String>,

    /// Title of the window the record came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,

    /// Externally supplied classification tag (e.g. "text", "code", "url").
    /// The engine consumes this opaquely; it never computes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_kind: Option<String>,

    /// When the record was captured
    pub captured_at: DateTime<Utc>,
}

impl Record {
    /// Create a record with just an id and content.
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            source_app: None,
            window_title: None,
            content_kind: None,
            captured_at: Utc::now(),
        }
    }

    /// Set the source application label.
    pub fn with_source_app(mut self, source_app: impl Into<String>) -> Self {
        self.source_app = Some(source_app.into());
        self
    }

    /// Set the window title label.
    pub fn with_window_title(mut self, window_title: impl Into<String>) -> Self {
        self.window_title = Some(window_title.into());
        self
    }

    /// Set the content-kind tag.
    pub fn with_content_kind(mut self, content_kind: impl Into<String>) -> Self {
        self.content_kind = Some(content_kind.into());
        self
    }

    /// The scoring surface used by all matching strategies: content,
    /// source app, window title, and content kind joined by spaces,
    /// skipping empty parts.
    pub fn searchable_content(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(4);

        if !self.content.is_empty() {
            parts.push(&self.content);
        }
        if let Some(ref source_app) = self.source_app {
            if !source_app.is_empty() {
                parts.push(source_app);
            }
        }
        if let Some(ref window_title) = self.window_title {
            if !window_title.is_empty() {
                parts.push(window_title);
            }
        }
        if let Some(ref content_kind) = self.content_kind {
            if !content_kind.is_empty() {
                parts.push(content_kind);
            }
        }

        parts.join(" ")
    }
}
