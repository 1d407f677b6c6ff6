//! bz HTML
//!
//! Parses authored HTML fragments into a [`DomTree`] with html5ever and
//! serializes trees back to HTML.

mod parser;
mod serializer;

pub use bz_dom::{DomTree, NodeId};
pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;

/// Parse an HTML fragment with the default parser
pub fn parse_fragment(html: &str) -> Result<DomTree, ParseError> {
    HtmlParser::new().parse_fragment(html)
}

/// Serialize the children of the tree root
pub fn to_html(tree: &DomTree) -> String {
    HtmlSerializer::new().serialize_inner(tree, tree.root())
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("fragment parser produced no context root")]
    MissingRoot,
}
