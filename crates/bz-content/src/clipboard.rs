//! Clipboard rewrite pipeline
//!
//! Pasted or dropped content may duplicate identifiers already in the
//! document. Before insertion every identifier minted in one of our
//! namespaces is replaced with a fresh one; everything else is copied
//! through unchanged. The output is a new tree with the same structure as
//! the input.

use crate::ids::{IdGenerator, IdNamespace};
use crate::retained::{RetainedAllocator, RETAINED_ATTR};
use crate::shape::{group_radios, ElementShape, RADIO_GROUP_ATTR};
use bz_dom::{DomTree, NodeId};
use std::collections::{HashMap, HashSet};

/// What a rewrite changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// `name` attributes replaced (a radio group counts once)
    pub names: usize,
    /// `id` attributes replaced
    pub ids: usize,
    /// Radio groups renamed
    pub radio_groups: usize,
    /// `label[for]` references retargeted to a rewritten id
    pub labels: usize,
    /// `data-bz-retained` values reissued
    pub retained: usize,
}

impl RewriteReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Rewrites identifiers in paste payloads
pub struct ClipboardRewriter<'a, G: IdGenerator + ?Sized> {
    generator: &'a G,
    retained: Option<&'a mut RetainedAllocator>,
}

#[derive(Default)]
struct RewriteState {
    renamed_ids: HashMap<String, String>,
    // controls already rewritten by their group
    handled: HashSet<NodeId>,
    report: RewriteReport,
}

impl<'a, G: IdGenerator + ?Sized> ClipboardRewriter<'a, G> {
    pub fn new(generator: &'a G) -> Self {
        Self {
            generator,
            retained: None,
        }
    }

    /// Also reissue pasted retained ids belonging to `allocator`'s page
    pub fn reissue_retained(mut self, allocator: &'a mut RetainedAllocator) -> Self {
        self.retained = Some(allocator);
        self
    }

    /// Rewrite a paste fragment. The input is left untouched.
    pub fn rewrite(&mut self, fragment: &DomTree) -> (DomTree, RewriteReport) {
        let mut output = fragment.detached_clone();
        let mut state = RewriteState::default();

        self.walk(&mut output, NodeId::ROOT, &mut state);
        relink_labels(&mut output, &mut state);
        self.reissue(&mut output, &mut state.report);

        tracing::debug!(report = ?state.report, "rewrote paste fragment");
        (output, state.report)
    }

    /// Every node is visited; group wrappers rewrite their own controls and
    /// the walk then continues inside them for anything else.
    fn walk(&self, tree: &mut DomTree, parent: NodeId, state: &mut RewriteState) {
        for child in tree.child_ids(parent) {
            if !state.handled.contains(&child) {
                match ElementShape::classify(tree, child) {
                    ElementShape::RadioGroup => self.rewrite_radio_group(tree, child, state),
                    ElementShape::DropdownGroup { select } => {
                        self.rewrite_control(tree, select, state)
                    }
                    ElementShape::SimpleInput => self.rewrite_control(tree, child, state),
                    ElementShape::Heading => {
                        self.rewrite_attr(tree, child, "id", IdNamespace::ElementId, state);
                    }
                    ElementShape::Other => {}
                }
            }
            self.walk(tree, child, state);
        }
    }

    fn rewrite_control(&self, tree: &mut DomTree, control: NodeId, state: &mut RewriteState) {
        self.rewrite_attr(tree, control, "name", IdNamespace::ElementName, state);
        self.rewrite_attr(tree, control, "id", IdNamespace::ElementId, state);
        state.handled.insert(control);
    }

    /// Replace `attr` on `id` if its value is in `namespace`
    fn rewrite_attr(
        &self,
        tree: &mut DomTree,
        id: NodeId,
        attr: &str,
        namespace: IdNamespace,
        state: &mut RewriteState,
    ) {
        let Some(elem) = tree.element_mut(id) else {
            return;
        };
        let Some(old) = elem.get_attr(attr).filter(|v| namespace.owns(v)).map(str::to_owned) else {
            return;
        };

        let fresh = self.generator.generate(namespace);
        elem.set_attr(attr, fresh.clone());
        if attr == "id" {
            state.report.ids += 1;
            state.renamed_ids.insert(old, fresh);
        } else {
            state.report.names += 1;
        }
    }

    /// One fresh name for the whole group, forced onto every radio
    fn rewrite_radio_group(&self, tree: &mut DomTree, group: NodeId, state: &mut RewriteState) {
        let name = self.generator.element_name();
        if let Some(elem) = tree.element_mut(group) {
            elem.set_attr(RADIO_GROUP_ATTR, name.clone());
        }

        for radio in group_radios(tree, group) {
            if let Some(elem) = tree.element_mut(radio) {
                elem.set_attr("name", name.clone());
            }
            self.rewrite_attr(tree, radio, "id", IdNamespace::ElementId, state);
            state.handled.insert(radio);
        }

        state.report.names += 1;
        state.report.radio_groups += 1;
    }

    fn reissue(&mut self, tree: &mut DomTree, report: &mut RewriteReport) {
        let Some(allocator) = self.retained.as_deref_mut() else {
            return;
        };

        let owned: Vec<NodeId> = tree
            .descendants(tree.root())
            .elements()
            .filter(|&id| {
                tree.get_attribute(id, RETAINED_ATTR)
                    .is_some_and(|v| allocator.owns(v))
            })
            .collect();

        for id in owned {
            let fresh = allocator.next_id();
            if let Some(elem) = tree.element_mut(id) {
                elem.set_attr(RETAINED_ATTR, fresh);
                report.retained += 1;
            }
        }
    }
}

/// Point `label[for]` at rewritten ids
fn relink_labels(tree: &mut DomTree, state: &mut RewriteState) {
    if state.renamed_ids.is_empty() {
        return;
    }
    let labels: Vec<NodeId> = tree
        .descendants(tree.root())
        .elements()
        .filter(|&id| tree.element(id).is_some_and(|e| e.is("label")))
        .collect();

    for label in labels {
        let Some(elem) = tree.element_mut(label) else {
            continue;
        };
        let target = elem.get_attr("for").and_then(|f| state.renamed_ids.get(f)).cloned();
        if let Some(target) = target {
            elem.set_attr("for", target);
            state.report.labels += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialGenerator;
    use bz_html::{parse_fragment, to_html};

    fn rewrite(html: &str) -> (String, RewriteReport) {
        let generator = SequentialGenerator::new();
        let (tree, report) = ClipboardRewriter::new(&generator).rewrite(&parse_fragment(html).unwrap());
        (to_html(&tree), report)
    }

    #[test]
    fn test_simple_input_name() {
        let (html, report) = rewrite(r#"<input type="text" name="content-name-ABC">"#);
        assert_eq!(html, r#"<input type="text" name="content-name-seq-1">"#);
        assert_eq!(report.names, 1);
    }

    #[test]
    fn test_foreign_name_is_kept() {
        let (html, report) = rewrite(r#"<input type="text" name="email"><textarea name="notes"></textarea>"#);
        assert_eq!(html, r#"<input type="text" name="email"><textarea name="notes"></textarea>"#);
        assert!(report.is_empty());
    }

    #[test]
    fn test_heading_id() {
        let (html, _) = rewrite(r#"<h2 id="content-id-old" class="t">Title</h2><h3 id="intro">x</h3>"#);
        assert_eq!(html, r#"<h2 id="content-id-seq-1" class="t">Title</h2><h3 id="intro">x</h3>"#);
    }

    #[test]
    fn test_dropdown_group() {
        let (html, report) = rewrite(concat!(
            r#"<div class="dropdown"><label for="content-id-s">Pick</label>"#,
            r#"<select name="content-name-s" id="content-id-s">"#,
            r#"<option value="content-value-a">A</option></select></div>"#
        ));
        assert_eq!(
            html,
            concat!(
                r#"<div class="dropdown"><label for="content-id-seq-2">Pick</label>"#,
                r#"<select name="content-name-seq-1" id="content-id-seq-2">"#,
                r#"<option value="content-value-a">A</option></select></div>"#
            )
        );
        assert_eq!((report.names, report.ids, report.labels), (1, 1, 1));
    }

    #[test]
    fn test_radio_group_normalization() {
        let (html, report) = rewrite(concat!(
            r#"<fieldset data-radio-group="old-group">"#,
            r#"<div><input type="radio" name="first" id="content-id-1" value="a"><label for="content-id-1">A</label></div>"#,
            r#"<div><input type="radio" name="second" id="plain" value="b"><label for="plain">B</label></div>"#,
            "</fieldset>"
        ));
        assert_eq!(
            html,
            concat!(
                r#"<fieldset data-radio-group="content-name-seq-1">"#,
                r#"<div><input type="radio" name="content-name-seq-1" id="content-id-seq-2" value="a"><label for="content-id-seq-2">A</label></div>"#,
                r#"<div><input type="radio" name="content-name-seq-1" id="plain" value="b"><label for="plain">B</label></div>"#,
                "</fieldset>"
            )
        );
        assert_eq!(report.radio_groups, 1);
        assert_eq!(report.ids, 1);
    }

    #[test]
    fn test_nested_constructs_are_reached() {
        let (html, report) = rewrite(concat!(
            r#"<section><div class="question"><p>Q</p>"#,
            r#"<input type="text" name="content-name-deep"></div></section>"#
        ));
        assert!(html.contains(r#"name="content-name-seq-1""#));
        assert_eq!(report.names, 1);
    }

    #[test]
    fn test_controls_inside_groups_are_reached() {
        let (html, report) = rewrite(concat!(
            r#"<div class="quiz"><label>A</label><select name="content-name-1" id="content-id-1"></select>"#,
            r#"<label>B</label><select name="content-name-2" id="content-id-2"></select>"#,
            r#"<input type="text" name="content-name-3"><h4 id="content-id-4">H</h4></div>"#,
            r#"<fieldset data-radio-group="g"><input type="radio" name="g" id="content-id-5">"#,
            r#"<input type="text" name="content-name-6"></fieldset>"#
        ));
        assert_eq!(
            html,
            concat!(
                r#"<div class="quiz"><label>A</label><select name="content-name-seq-1" id="content-id-seq-2"></select>"#,
                r#"<label>B</label><select name="content-name-seq-3" id="content-id-seq-4"></select>"#,
                r#"<input type="text" name="content-name-seq-5"><h4 id="content-id-seq-6">H</h4></div>"#,
                r#"<fieldset data-radio-group="content-name-seq-7"><input type="radio" name="content-name-seq-7" id="content-id-seq-8">"#,
                r#"<input type="text" name="content-name-seq-9"></fieldset>"#
            )
        );
        assert_eq!((report.names, report.ids, report.radio_groups), (5, 4, 1));
    }

    #[test]
    fn test_nested_radio_groups_keep_their_own_names() {
        let (html, _) = rewrite(concat!(
            r#"<div data-radio-group="a"><input type="radio" name="a">"#,
            r#"<div data-radio-group="b"><input type="radio" name="b"></div></div>"#
        ));
        assert_eq!(
            html,
            concat!(
                r#"<div data-radio-group="content-name-seq-1"><input type="radio" name="content-name-seq-1">"#,
                r#"<div data-radio-group="content-name-seq-2"><input type="radio" name="content-name-seq-2"></div></div>"#
            )
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let generator = SequentialGenerator::new();
        let fragment = parse_fragment(r#"<input name="content-name-x">"#).unwrap();
        let (output, _) = ClipboardRewriter::new(&generator).rewrite(&fragment);

        assert_eq!(to_html(&fragment), r#"<input name="content-name-x">"#);
        assert!(fragment.same_structure(fragment.root(), &output, output.root()));
    }

    #[test]
    fn test_retained_reissue() {
        let generator = SequentialGenerator::new();
        let mut allocator = RetainedAllocator::new("p").unwrap();
        allocator.observe_value("retained_p_4");

        let fragment = parse_fragment(concat!(
            r#"<div data-bz-retained="retained_p_2"></div>"#,
            r#"<div data-bz-retained="retained_other_2"></div>"#
        ))
        .unwrap();
        let (output, report) = ClipboardRewriter::new(&generator)
            .reissue_retained(&mut allocator)
            .rewrite(&fragment);

        assert_eq!(
            to_html(&output),
            r#"<div data-bz-retained="retained_p_5"></div><div data-bz-retained="retained_other_2"></div>"#
        );
        assert_eq!(report.retained, 1);
        assert_eq!(allocator.peek(), "6");
    }
}
