//! HTML5 fragment parser
//!
//! Uses html5ever's fragment parsing algorithm with a `<body>` context and
//! converts the result from RcDom into our DOM format. Content that a full
//! document parse would hoist into `<head>` (`style`, `script`, `link`,
//! `meta`, `template`) stays where it was authored.

use crate::ParseError;
use bz_dom::{DomTree, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{local_name, ns, parse_fragment, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
#[derive(Debug, Clone)]
pub struct HtmlParser {
    keep_comments: bool,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self { keep_comments: true }
    }

    /// Drop comment nodes while converting
    pub fn without_comments(mut self) -> Self {
        self.keep_comments = false;
        self
    }

    /// Parse an HTML fragment into a tree whose root children are the
    /// fragment's top-level nodes
    pub fn parse_fragment(&self, html: &str) -> Result<DomTree, ParseError> {
        tracing::debug!(len = html.len(), "parsing HTML fragment");

        let dom = parse_fragment(
            RcDom::default(),
            ParseOpts::default(),
            QualName::new(None, ns!(html), local_name!("body")),
            Vec::new(),
            false,
        )
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

        // The fragment algorithm parents everything under a synthetic <html>
        let context = dom
            .document
            .children
            .borrow()
            .first()
            .cloned()
            .ok_or(ParseError::MissingRoot)?;
        let mut tree = DomTree::new();
        let root = tree.root();
        for child in context.children.borrow().iter() {
            self.convert_node(child, &mut tree, root);
        }

        tracing::debug!(nodes = tree.len(), "parsed fragment");
        Ok(tree)
    }

    /// Convert an RcDom node (and its subtree) to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        let id = match &handle.data {
            RcNodeData::Text { contents } => tree.create_text(&contents.borrow()),
            RcNodeData::Comment { contents } if self.keep_comments => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => tree.create_element_with(
                &name.local,
                attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string())),
            ),
            // Doctypes, processing instructions, and filtered comments
            _ => return,
        };

        if let Err(err) = tree.append_child(parent, id) {
            tracing::warn!(%err, "dropping unattachable node");
            return;
        }

        for child in handle.children.borrow().iter() {
            self.convert_node(child, tree, id);
        }

        // <template> keeps its parsed content in a separate fragment
        if let RcNodeData::Element { template_contents, .. } = &handle.data {
            if let Some(contents) = template_contents.borrow().as_ref() {
                for child in contents.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
        }
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
