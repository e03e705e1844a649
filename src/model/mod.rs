//! Data model shared by the pipeline stages.
//!
//! Tags and trees are pipeline-local and built per call; attachments come
//! from the caller; content blocks are the output handed to presentation.

mod attachment;
mod block;
mod node;
mod style;
mod tag;

pub use attachment::{Attachment, AttachmentKind, Attachments};
pub use block::{
    AttachmentChip, ContentBlock, FileIcon, Inline, QuoteHeader, Span, TextRun, OBJECT_REPLACEMENT,
};
pub use node::{MarkupNode, StyledNode};
pub use style::{Rgb, StyleContext, ThemedColor, TypeSize, BASELINE_SHIFT};
pub use tag::{
    attribute_value, decode_brackets, Alignment, Format, Leaf, ListOrdering, NoticeKind, Structure, Tag, TagName,
};
