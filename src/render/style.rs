//! Style cascade over the markup tree.
//!
//! Formatting tags are folded into the [`StyleContext`] of every run below
//! them; structural tags keep their place in the tree and leaves capture the
//! context active at their position.

use super::pipeline::render_clause;
use super::quote::quote_title;
use super::RenderOptions;
use crate::catalog::{fonts, palette};
use crate::model::{
    attribute_value, Format, MarkupNode, Rgb, StyleContext, StyledNode, Structure, Tag,
    ThemedColor, TypeSize, BASELINE_SHIFT,
};

/// Depth-first style renderer.
pub struct StyleRenderer<'o> {
    options: &'o RenderOptions,
}

impl<'o> StyleRenderer<'o> {
    /// Create a renderer.
    pub fn new(options: &'o RenderOptions) -> Self {
        Self { options }
    }

    /// Render a sibling list starting from `base`.
    pub fn render(&self, nodes: &[MarkupNode], base: &StyleContext) -> Vec<StyledNode> {
        self.render_at(nodes, base, 0)
    }

    /// `depth` counts the container tags enclosing `nodes`.
    fn render_at(&self, nodes: &[MarkupNode], base: &StyleContext, depth: usize) -> Vec<StyledNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.render_node(node, base, depth, &mut out);
        }
        out
    }

    fn render_node(
        &self,
        node: &MarkupNode,
        ctx: &StyleContext,
        depth: usize,
        out: &mut Vec<StyledNode>,
    ) {
        match node {
            MarkupNode::Text(text) => push_text(out, text, ctx),
            MarkupNode::Tagged {
                tag: Tag::Format(format),
                children,
                ..
            } => {
                let derived = derive(ctx, format, children);
                for child in children {
                    self.render_node(child, &derived, depth + 1, out);
                }
            }
            MarkupNode::Tagged {
                tag: Tag::Structure(kind),
                attribute,
                children,
            } => {
                let clause = self.clause(kind, attribute.as_deref(), ctx, depth);
                out.push(StyledNode::Structure {
                    kind: kind.clone(),
                    attribute: attribute.clone(),
                    clause,
                    style: ctx.clone(),
                    children: self.render_at(children, ctx, depth + 1),
                });
            }
            MarkupNode::Tagged {
                tag: Tag::Leaf(leaf),
                ..
            } => out.push(StyledNode::Leaf {
                leaf: leaf.clone(),
                style: ctx.clone(),
            }),
        }
    }

    /// Pre-render the markup-bearing attribute of a structural tag.
    ///
    /// The clause is parsed with whatever nesting depth the tag itself left
    /// unused, so clauses nested inside clauses stay within `max_depth`.
    fn clause(
        &self,
        kind: &Structure,
        attribute: Option<&str>,
        ctx: &StyleContext,
        depth: usize,
    ) -> Option<crate::model::TextRun> {
        let markup = match kind {
            Structure::Spoiler => attribute
                .map(attribute_value)
                .filter(|v| !v.trim().is_empty())?
                .to_string(),
            Structure::Quote => quote_title(attribute)?,
            _ => return None,
        };
        let remaining = self.options.parse.max_depth.saturating_sub(depth + 1);
        render_clause(&markup, ctx, self.options, remaining)
    }
}

fn push_text(out: &mut Vec<StyledNode>, text: &str, ctx: &StyleContext) {
    if text.is_empty() {
        return;
    }
    if let Some(StyledNode::Text { text: last, style }) = out.last_mut() {
        if style == ctx {
            last.push_str(text);
            return;
        }
    }
    out.push(StyledNode::Text {
        text: text.to_string(),
        style: ctx.clone(),
    });
}

/// Apply one formatting tag to the inherited context.
pub fn derive(ctx: &StyleContext, format: &Format, children: &[MarkupNode]) -> StyleContext {
    let ctx = ctx.clone();
    match format {
        Format::Bold => ctx.with_bold(),
        Format::Italic => ctx.with_italic(),
        Format::Underline => ctx.with_underline(),
        Format::Strikethrough => ctx.with_strikethrough(),
        Format::Superscript => ctx.with_baseline(BASELINE_SHIFT),
        Format::Subscript => ctx.with_baseline(-BASELINE_SHIFT),
        Format::Size(level) => ctx.with_size(TypeSize::from_level(*level)),
        Format::Color(spec) => {
            let color = resolve_color(spec).unwrap_or_else(|| {
                log::warn!("unknown color {:?}, using default", spec);
                ThemedColor::LABEL
            });
            ctx.with_foreground(color)
        }
        Format::Background(spec) => match resolve_color(spec) {
            Some(color) => ctx.with_background(color),
            None => {
                log::warn!("unknown background color {:?}, ignoring", spec);
                ctx
            }
        },
        Format::Font(name) => match fonts::lookup(name) {
            Some(family) => ctx.with_font(Some(family.to_string())),
            None => {
                log::warn!("unknown font family {:?}, using default font", name);
                ctx.with_font(None)
            }
        },
        Format::Url(href) => {
            let target = href
                .clone()
                .unwrap_or_else(|| children.iter().map(MarkupNode::plain_text).collect());
            let target = target.trim();
            if target.is_empty() {
                ctx.with_underline()
            } else {
                ctx.with_link(target).with_underline()
            }
        }
        Format::Anchor(Some(name)) => ctx.with_link(format!("#{}", name)),
        Format::Anchor(None) => ctx,
        Format::Offtop => {
            let size = ctx.size.smaller();
            ctx.with_size(size).with_foreground(ThemedColor::SECONDARY_LABEL)
        }
    }
}

/// Resolve a color spec: palette name first, then raw hex.
pub fn resolve_color(spec: &str) -> Option<ThemedColor> {
    palette::lookup(spec).or_else(|| Rgb::parse_hex(spec.trim()).map(ThemedColor::fixed))
}
