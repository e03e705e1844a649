//! Tree building with recovery for malformed nesting.
//!
//! The builder never fails. Closing tags that match nothing open become
//! literal text; a closing tag matching a tag further down the stack
//! dissolves every tag above it into `raw opening text + children`; tags
//! still open at end of input are closed in place.

use super::{ParseOptions, Token};
use crate::model::{MarkupNode, Tag, TagName};

/// How a child sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    /// The closing tag of the enclosing element was consumed
    Closed,
    /// A closing tag for an element further down the stack is pending
    Unwind,
    /// Tokens ran out
    End,
}

/// Recursive-descent tree builder over a token slice.
pub struct TreeBuilder {
    stack: Vec<TagName>,
    max_depth: usize,
}

impl TreeBuilder {
    /// Create a builder.
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            stack: Vec::new(),
            max_depth: options.max_depth,
        }
    }

    /// Build the tree for a whole token stream.
    pub fn build(mut self, tokens: &[Token]) -> Vec<MarkupNode> {
        let (nodes, _, rest) = self.parse_children(tokens);
        debug_assert!(rest.is_empty());
        nodes
    }

    /// Parse siblings until the enclosing element closes, an outer element
    /// must unwind, or input ends. Returns the remaining tokens.
    fn parse_children<'t>(&mut self, mut tokens: &'t [Token]) -> (Vec<MarkupNode>, Exit, &'t [Token]) {
        let mut children = Vec::new();

        while let Some((token, rest)) = tokens.split_first() {
            match token {
                Token::Text(text) => {
                    push_text(&mut children, text);
                    tokens = rest;
                }
                Token::Leaf {
                    leaf, attribute, ..
                } => {
                    children.push(MarkupNode::Tagged {
                        tag: Tag::Leaf(leaf.clone()),
                        attribute: attribute.clone(),
                        children: Vec::new(),
                    });
                    tokens = rest;
                }
                Token::Open {
                    tag,
                    attribute,
                    raw,
                } => {
                    if self.stack.len() >= self.max_depth {
                        log::debug!("nesting limit {} reached, keeping {} as text", self.max_depth, raw);
                        push_text(&mut children, raw);
                        tokens = rest;
                        continue;
                    }
                    let (nodes, remaining) = self.parse_element(tag, attribute, raw, rest);
                    for node in nodes {
                        push_node(&mut children, node);
                    }
                    tokens = remaining;
                }
                Token::Close { name, raw } => {
                    if self.stack.last() == Some(name) {
                        return (children, Exit::Closed, rest);
                    }
                    if self.stack.contains(name) {
                        // Leave the close pending for the frame that owns it.
                        return (children, Exit::Unwind, tokens);
                    }
                    log::debug!("unmatched closing tag {} kept as text", raw);
                    push_text(&mut children, raw);
                    tokens = rest;
                }
            }
        }

        (children, Exit::End, tokens)
    }

    /// Parse one container element whose opening token was just consumed.
    ///
    /// Returns the nodes to splice into the parent: the element itself, or,
    /// if it had to be unwound, its raw opening text followed by its
    /// children.
    fn parse_element<'t>(
        &mut self,
        tag: &Tag,
        attribute: &Option<String>,
        raw: &str,
        tokens: &'t [Token],
    ) -> (Vec<MarkupNode>, &'t [Token]) {
        self.stack.push(tag.name());
        let (children, exit, rest) = self.parse_children(tokens);
        self.stack.pop();

        match exit {
            Exit::Closed | Exit::End => {
                if exit == Exit::End {
                    log::debug!("closing {} at end of input", raw);
                }
                let node = MarkupNode::Tagged {
                    tag: tag.clone(),
                    attribute: attribute.clone(),
                    children,
                };
                (vec![node], rest)
            }
            Exit::Unwind => {
                log::debug!("misnested {} dissolved into text", raw);
                let mut nodes = Vec::with_capacity(children.len() + 1);
                nodes.push(MarkupNode::text(raw));
                nodes.extend(children);
                (nodes, rest)
            }
        }
    }
}

/// Build a markup tree from tokens.
pub fn build_tree(tokens: &[Token], options: &ParseOptions) -> Vec<MarkupNode> {
    TreeBuilder::new(options).build(tokens)
}

fn push_text(children: &mut Vec<MarkupNode>, text: &str) {
    if let Some(MarkupNode::Text(last)) = children.last_mut() {
        last.push_str(text);
    } else {
        children.push(MarkupNode::text(text));
    }
}

fn push_node(children: &mut Vec<MarkupNode>, node: MarkupNode) {
    match node {
        MarkupNode::Text(text) => push_text(children, &text),
        node => children.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Format, Leaf, Structure};
    use crate::parser::tokenize;

    fn parse(input: &str) -> Vec<MarkupNode> {
        let options = ParseOptions::default();
        build_tree(&tokenize(input, &options), &options)
    }

    fn plain(nodes: &[MarkupNode]) -> String {
        nodes.iter().map(MarkupNode::plain_text).collect()
    }

    #[test]
    fn test_well_formed_nesting() {
        let nodes = parse("a[b]b[i]c[/i][/b]");
        assert_eq!(nodes.len(), 2);
        let MarkupNode::Tagged { tag, children, .. } = &nodes[1] else {
            panic!("expected tagged node");
        };
        assert_eq!(*tag, Tag::Format(Format::Bold));
        assert_eq!(children.len(), 2);
        assert!(matches!(
            &children[1],
            MarkupNode::Tagged { tag: Tag::Format(Format::Italic), .. }
        ));
    }

    #[test]
    fn test_unmatched_close_becomes_text() {
        let nodes = parse("a[/b]c");
        assert_eq!(nodes, vec![MarkupNode::text("a[/b]c")]);
    }

    #[test]
    fn test_misnested_close_unwinds() {
        let nodes = parse("[b]bold[i]mixed[/b]text[/i]");
        assert_eq!(nodes.len(), 2);
        let MarkupNode::Tagged { children, .. } = &nodes[0] else {
            panic!("expected bold node");
        };
        assert_eq!(children, &vec![MarkupNode::text("bold[i]mixed")]);
        assert_eq!(nodes[1], MarkupNode::text("text[/i]"));
        assert_eq!(plain(&nodes), "bold[i]mixedtext[/i]");
    }

    #[test]
    fn test_unwinds_several_levels() {
        let nodes = parse("[quote][b][i]x[/quote]y");
        let MarkupNode::Tagged { tag, children, .. } = &nodes[0] else {
            panic!("expected quote node");
        };
        assert_eq!(*tag, Tag::Structure(Structure::Quote));
        assert_eq!(children, &vec![MarkupNode::text("[b][i]x")]);
        assert_eq!(nodes[1], MarkupNode::text("y"));
    }

    #[test]
    fn test_unclosed_tags_closed_at_end() {
        let nodes = parse("[b]open[i]deeper");
        assert_eq!(nodes.len(), 1);
        assert_eq!(plain(&nodes), "opendeeper");
        let MarkupNode::Tagged { children, .. } = &nodes[0] else {
            panic!("expected bold node");
        };
        assert!(matches!(&children[1], MarkupNode::Tagged { tag: Tag::Format(Format::Italic), .. }));
    }

    #[test]
    fn test_leaf_has_no_children() {
        let nodes = parse("[b][snapback=7][/b]");
        let MarkupNode::Tagged { children, .. } = &nodes[0] else {
            panic!("expected bold node");
        };
        assert!(matches!(
            &children[0],
            MarkupNode::Tagged { tag: Tag::Leaf(Leaf::Snapback(7)), children, .. } if children.is_empty()
        ));
    }

    #[test]
    fn test_depth_limit_keeps_text() {
        let options = ParseOptions::new().with_max_depth(2);
        let nodes = build_tree(&tokenize("[b][i][u]x[/u][/i][/b]", &options), &options);
        assert_eq!(plain(&nodes), "[u]x[/u]");
        let MarkupNode::Tagged { children, .. } = &nodes[0] else {
            panic!("expected bold node");
        };
        let MarkupNode::Tagged { children, .. } = &children[0] else {
            panic!("expected italic node");
        };
        assert_eq!(children, &vec![MarkupNode::text("[u]x[/u]")]);
    }

    #[test]
    fn test_no_content_lost_on_garbage() {
        let input = "[/i]x[b][u]y[/b][/u]z[s]";
        let nodes = parse(input);
        let text = plain(&nodes);
        for needle in ["x", "y", "z"] {
            assert!(text.contains(needle));
        }
    }
}
