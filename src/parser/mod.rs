//! Markup parsing: tokenizer and tree builder.

mod options;
mod tokenizer;
mod tree;

pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use tokenizer::{tokenize, Token, Tokenizer, MAX_ARGUMENT_LEN};
pub use tree::{build_tree, TreeBuilder};

use crate::model::MarkupNode;

/// Tokenize and build the markup tree in one step.
pub fn parse(input: &str, options: &ParseOptions) -> Vec<MarkupNode> {
    let tokens = tokenize(input, options);
    build_tree(&tokens, options)
}
