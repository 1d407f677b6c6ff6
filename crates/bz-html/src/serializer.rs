//! HTML Serialization
//!
//! Serializes DOM nodes to HTML strings.
//!
//! Key features:
//! - inner/outer serialization
//! - Proper HTML escaping
//! - Void element handling

use bz_dom::{DomTree, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
}

/// Void elements (self-closing, no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose first newline the parser drops
const NEWLINE_STRIPPING_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            indent: "  ".to_string(),
        }
    }

    /// Serialize the children of a node
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output, 0);
        output
    }

    /// Serialize a node including the node itself
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output, 0);
        output
    }

    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String, depth: usize) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output, depth);
            }
            NodeData::Element(elem) => {
                let tag = elem.tag.as_str();
                let is_void = VOID_ELEMENTS.contains(&tag);
                let is_raw = RAW_TEXT_ELEMENTS.contains(&tag);

                if self.pretty_print && depth > 0 {
                    self.newline(output, depth);
                }

                output.push('<');
                output.push_str(tag);
                for attr in elem.attrs.iter() {
                    output.push(' ');
                    output.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                }

                if is_void {
                    output.push('>');
                    return;
                }
                output.push('>');

                if NEWLINE_STRIPPING_ELEMENTS.contains(&tag) {
                    let first_text = tree.get(node.first_child).and_then(|n| n.as_text());
                    if first_text.is_some_and(|t| t.starts_with('\n')) {
                        output.push('\n');
                    }
                }

                if is_raw {
                    self.serialize_children_raw(tree, node_id, output);
                } else {
                    self.serialize_children(tree, node_id, output, depth + 1);
                }

                if self.pretty_print && node.first_child.is_valid() {
                    self.newline(output, depth);
                }
                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(text, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                escape_comment(text, output);
                output.push_str("-->");
            }
        }
    }

    fn newline(&self, output: &mut String, depth: usize) {
        output.push('\n');
        for _ in 0..depth {
            output.push_str(&self.indent);
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String, depth: usize) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output, depth);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for (_, child) in tree.children(parent_id) {
            if let Some(text) = child.as_text() {
                output.push_str(text);
            }
        }
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Write comment text so that it cannot close the comment early
///
/// `--` never appears in the output and the text never starts with `>` or
/// `->`.
fn escape_comment(text: &str, output: &mut String) {
    if text.starts_with('>') || text.starts_with("->") {
        output.push(' ');
    }
    let mut previous_dash = false;
    for c in text.chars() {
        if c == '-' && previous_dash {
            output.push(' ');
        }
        previous_dash = c == '-';
        output.push(c);
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        let mut output = String::new();
        escape_text("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; \"friends\"");
    }

    #[test]
    fn test_escape_attribute() {
        let mut output = String::new();
        escape_attribute("Hello <world> & \"friends\"", &mut output);
        assert_eq!(output, "Hello &lt;world&gt; &amp; &quot;friends&quot;");
    }

    #[test]
    fn test_escape_comment() {
        let mut output = String::new();
        escape_comment("a --> b", &mut output);
        assert_eq!(output, "a - -> b");

        output.clear();
        escape_comment("->x---", &mut output);
        assert_eq!(output, " ->x- - -");
    }

    #[test]
    fn test_void_elements() {
        assert!(VOID_ELEMENTS.contains(&"br"));
        assert!(VOID_ELEMENTS.contains(&"input"));
        assert!(!VOID_ELEMENTS.contains(&"div"));
    }

    #[test]
    fn test_serialize_built_tree() {
        let mut tree = DomTree::new();
        let div = tree.create_element_with("div", [("class", "q"), ("data-bz-weight", "2")]);
        let input = tree.create_element_with("input", [("type", "checkbox"), ("checked", "")]);
        let text = tree.create_text("a < b");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, input).unwrap();
        tree.append_child(div, text).unwrap();

        assert_eq!(
            HtmlSerializer::new().serialize_inner(&tree, tree.root()),
            r#"<div class="q" data-bz-weight="2"><input type="checkbox" checked>a &lt; b</div>"#
        );
        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, input),
            r#"<input type="checkbox" checked>"#
        );
    }

    #[test]
    fn test_pretty_print_indents_children() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();

        assert_eq!(
            HtmlSerializer::pretty().serialize_inner(&tree, tree.root()),
            "<div>\n  <p></p>\n</div>"
        );
    }
}
