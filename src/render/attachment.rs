//! Attachment reference resolution.

use crate::model::{
    Attachment, AttachmentChip, AttachmentKind, Attachments, ContentBlock, FileIcon, Inline,
    StyleContext, TextRun,
};

/// Outcome of resolving an `[attachment=…]` token.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// File attachment, always a standalone block
    Chip(AttachmentChip),

    /// Image attachment, placed like any other image
    Image {
        url: String,
        width: Option<u32>,
        height: Option<u32>,
    },

    /// Unknown id; the literal text to show instead
    Missing(String),
}

impl Resolved {
    /// Block form of an image attachment.
    pub fn image_block(url: &str, width: Option<u32>, height: Option<u32>) -> ContentBlock {
        ContentBlock::Image {
            url: url.to_string(),
            width,
            height,
        }
    }

    /// Inline form of an image attachment.
    pub fn image_inline(url: &str, width: Option<u32>, height: Option<u32>) -> Inline {
        Inline::Image {
            url: url.to_string(),
            width,
            height,
        }
    }
}

/// Resolves attachment tokens against the caller's table.
pub struct AttachmentResolver<'a> {
    table: &'a Attachments,
}

impl<'a> AttachmentResolver<'a> {
    /// Create a resolver over an attachment table.
    pub fn new(table: &'a Attachments) -> Self {
        Self { table }
    }

    /// Resolve a `<id>:<note>` token.
    ///
    /// `style` is the style active at the tag; the chip's name inherits it.
    pub fn resolve(&self, token: &str, style: &StyleContext) -> Resolved {
        let Some(attachment) = parse_id(token).and_then(|id| self.table.get(id)) else {
            log::warn!("unknown attachment reference {:?}", token);
            return Resolved::Missing(format!("[attachment={}]", token));
        };

        match attachment.kind {
            AttachmentKind::Image => Resolved::Image {
                url: attachment.url.clone(),
                width: attachment.width,
                height: attachment.height,
            },
            AttachmentKind::File => Resolved::Chip(chip(attachment, style)),
        }
    }
}

/// Id part of an attachment token.
pub fn parse_id(token: &str) -> Option<u64> {
    let id = token.split(':').next()?.trim();
    id.parse().ok()
}

fn chip(attachment: &Attachment, style: &StyleContext) -> AttachmentChip {
    let name_style = style
        .clone()
        .with_link(attachment.url.clone())
        .with_underline();

    AttachmentChip {
        id: attachment.id,
        icon: icon_for(&attachment.name),
        name: TextRun::plain(attachment.name.clone(), name_style),
        url: attachment.url.clone(),
        size_label: size_label(attachment.byte_size),
        caption: attachment
            .download_count
            .map(|count| format!("Downloads: {}", count)),
    }
}

/// Icon family derived from a file name's extension.
pub fn icon_for(name: &str) -> FileIcon {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return FileIcon::Generic;
    };

    match ext.to_ascii_lowercase().as_str() {
        "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" | "xz" => FileIcon::Archive,
        "pdf" | "doc" | "docx" | "odt" | "rtf" | "txt" | "xls" | "xlsx" | "ppt" | "pptx" => {
            FileIcon::Document
        }
        "mp3" | "ogg" | "flac" | "wav" | "m4a" | "aac" => FileIcon::Audio,
        "mp4" | "mkv" | "avi" | "webm" | "mov" => FileIcon::Video,
        "apk" | "ipa" | "exe" | "msi" | "dmg" | "deb" => FileIcon::Package,
        _ => FileIcon::Generic,
    }
}

/// Human-readable byte size in binary units with one decimal.
pub fn size_label(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
