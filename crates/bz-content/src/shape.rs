//! Interactive element shapes
//!
//! The clipboard rewriter dispatches on a closed set of recognised element
//! shapes. Anything not recognised is [`ElementShape::Other`].

use bz_dom::{DomTree, NodeId};

/// Grouping attribute on a radio-group wrapper; holds the group's shared name
pub const RADIO_GROUP_ATTR: &str = "data-radio-group";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    /// Wrapper carrying [`RADIO_GROUP_ATTR`] around radio/label pairs
    RadioGroup,
    /// Container whose element children include a `label` and a `select`
    DropdownGroup { select: NodeId },
    /// `input`, `textarea` or bare `select`
    SimpleInput,
    /// `h1`..`h6` and any other one-letter-one-digit tag
    Heading,
    Other,
}

impl ElementShape {
    /// Shape of node `id`; non-elements are `Other`
    pub fn classify(tree: &DomTree, id: NodeId) -> Self {
        let Some(elem) = tree.element(id) else {
            return Self::Other;
        };

        if elem.attrs.contains(RADIO_GROUP_ATTR) {
            return Self::RadioGroup;
        }
        if is_heading_tag(&elem.tag) {
            return Self::Heading;
        }
        match elem.tag.as_str() {
            "input" | "textarea" | "select" => Self::SimpleInput,
            _ => dropdown_select(tree, id)
                .map_or(Self::Other, |select| Self::DropdownGroup { select }),
        }
    }

}

/// Radio inputs belonging to the group wrapped by `group`, in document order
///
/// Radios inside a nested group wrapper belong to that wrapper instead.
pub fn group_radios(tree: &DomTree, group: NodeId) -> Vec<NodeId> {
    let mut radios = Vec::new();
    let mut pending: Vec<NodeId> = tree.child_ids(group).into_iter().rev().collect();
    while let Some(id) = pending.pop() {
        let Some(elem) = tree.element(id) else {
            continue;
        };
        if elem.attrs.contains(RADIO_GROUP_ATTR) {
            continue;
        }
        if elem.input_type().is_some_and(|t| t == "radio") {
            radios.push(id);
        }
        pending.extend(tree.child_ids(id).into_iter().rev());
    }
    radios
}

/// One ASCII letter followed by one ASCII digit
pub fn is_heading_tag(tag: &str) -> bool {
    matches!(tag.as_bytes(), [letter, digit] if letter.is_ascii_alphabetic() && digit.is_ascii_digit())
}

fn dropdown_select(tree: &DomTree, id: NodeId) -> Option<NodeId> {
    let mut has_label = false;
    let mut select = None;
    for (child, elem) in tree.element_children(id) {
        if elem.is("label") {
            has_label = true;
        } else if elem.is("select") && select.is_none() {
            select = Some(child);
        }
    }
    select.filter(|_| has_label)
}
