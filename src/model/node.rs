//! Markup and styled trees.

use super::{Leaf, StyleContext, Structure, Tag, TextRun};

/// A node of the parsed markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    /// Literal text, bracket entities still encoded
    Text(String),

    /// A tag with its raw attribute and children (leaves have none)
    Tagged {
        tag: Tag,
        attribute: Option<String>,
        children: Vec<MarkupNode>,
    },
}

impl MarkupNode {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text(text.into())
    }

    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Tagged { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, MarkupNode::Text(_))
    }
}

/// A node of the styled tree.
///
/// Formatting tags have been folded into the style of the runs below them,
/// so only runs, leaves and structural nodes remain.
#[derive(Debug, Clone, PartialEq)]
pub enum StyledNode {
    /// Text with its resolved style
    Text { text: String, style: StyleContext },

    /// Leaf placeholder with the style active at its position
    Leaf { leaf: Leaf, style: StyleContext },

    /// Structural node
    Structure {
        kind: Structure,
        /// Raw attribute string of the tag
        attribute: Option<String>,
        /// Attribute rendered through the pipeline (spoiler / quote titles)
        clause: Option<TextRun>,
        /// Style active at the tag, inherited by synthesized content
        style: StyleContext,
        children: Vec<StyledNode>,
    },
}

impl StyledNode {
    /// Check if this is a structural node.
    pub fn is_structure(&self) -> bool {
        matches!(self, StyledNode::Structure { .. })
    }
}
