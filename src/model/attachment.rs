//! Attachment table supplied alongside a post.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Downloadable file, shown as a chip
    File,
    /// Picture, shown inline
    Image,
}

/// A file or image attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment id referenced by `[attachment=<id>:…]`
    pub id: u64,

    /// File or image
    pub kind: AttachmentKind,

    /// Original file name
    pub name: String,

    /// Size in bytes
    pub byte_size: u64,

    /// Download / display URL
    pub url: String,

    /// Image width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Image height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Number of downloads, if the server reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u32>,
}

impl Attachment {
    /// Create a file attachment.
    pub fn file(id: u64, name: impl Into<String>, byte_size: u64, url: impl Into<String>) -> Self {
        Self {
            id,
            kind: AttachmentKind::File,
            name: name.into(),
            byte_size,
            url: url.into(),
            width: None,
            height: None,
            download_count: None,
        }
    }

    /// Create an image attachment.
    pub fn image(id: u64, name: impl Into<String>, url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            kind: AttachmentKind::Image,
            width: Some(width),
            height: Some(height),
            ..Self::file(id, name, 0, url)
        }
    }

    /// Set the download count.
    pub fn with_downloads(mut self, count: u32) -> Self {
        self.download_count = Some(count);
        self
    }

    /// Check if this is an image attachment.
    pub fn is_image(&self) -> bool {
        self.kind == AttachmentKind::Image
    }
}

/// Read-only attachment table keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Attachments {
    by_id: HashMap<u64, Attachment>,
}

impl Attachments {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON array of attachments.
    pub fn from_json(json: &str) -> Result<Self> {
        let list: Vec<Attachment> =
            serde_json::from_str(json).map_err(|e| Error::InvalidAttachments(e.to_string()))?;
        Ok(list.into_iter().collect())
    }

    /// Add an attachment, replacing any previous entry with the same id.
    pub fn insert(&mut self, attachment: Attachment) {
        self.by_id.insert(attachment.id, attachment);
    }

    /// Get an attachment by id.
    pub fn get(&self, id: u64) -> Option<&Attachment> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<Attachment> for Attachments {
    fn from_iter<I: IntoIterator<Item = Attachment>>(iter: I) -> Self {
        Self {
            by_id: iter.into_iter().map(|a| (a.id, a)).collect(),
        }
    }
}

impl From<&[Attachment]> for Attachments {
    fn from(list: &[Attachment]) -> Self {
        list.iter().cloned().collect()
    }
}
