//! Rendering: style cascade, normalization and output formats.

mod attachment;
mod cleanup;
mod json;
mod marker;
mod normalize;
mod options;
mod pipeline;
mod quote;
mod result;
mod style;
mod text;
pub mod visitor;

pub use attachment::{icon_for, size_label, AttachmentResolver, Resolved};
pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, JsonFormat};
pub use marker::{marker, roman, ListScope, ITEM_PLACEHOLDER};
pub use normalize::{retrim, Normalizer};
pub use options::{RenderOptions, DEFAULT_DATE_FORMAT};
pub use pipeline::run;
pub use quote::{parse_quote_attribute, quote_title};
pub use result::{RenderResult, RenderStats};
pub use style::{derive, resolve_color, StyleRenderer};
pub use text::{plain_text, to_text, to_text_with_visitor};
pub use visitor::{
    BlockVisitor, CollapseSpoilersVisitor, CompositeVisitor, DefaultVisitor, SkipImagesVisitor,
    VisitorAction,
};
