//! Interactive element builders
//!
//! Each insertion operation returns a fragment whose form controls carry
//! freshly minted ids, names and values plus a retained id. The fragments
//! use exactly the shapes the clipboard rewriter recognises, so copying a
//! built element and pasting it back is always disambiguated.

use crate::ids::IdGenerator;
use crate::retained::{RetainedAllocator, RETAINED_ATTR};
use crate::shape::RADIO_GROUP_ATTR;
use crate::Result;
use bz_dom::{DomTree, NodeId};

/// Builds new interactive elements for one session
pub struct ElementBuilder<'a, G: IdGenerator + ?Sized> {
    generator: &'a G,
    allocator: &'a mut RetainedAllocator,
}

impl<'a, G: IdGenerator + ?Sized> ElementBuilder<'a, G> {
    pub fn new(generator: &'a G, allocator: &'a mut RetainedAllocator) -> Self {
        Self {
            generator,
            allocator,
        }
    }

    /// `<input type="text">`
    pub fn text_input(&mut self, placeholder: Option<&str>) -> Result<DomTree> {
        let mut tree = DomTree::new();
        let input = self.control(&mut tree, "input", Some("text"));
        if let (Some(placeholder), Some(elem)) = (placeholder, tree.element_mut(input)) {
            elem.set_attr("placeholder", placeholder);
        }
        tree.append_child(tree.root(), input)?;
        Ok(tree)
    }

    /// `<textarea>`
    pub fn textarea(&mut self) -> Result<DomTree> {
        let mut tree = DomTree::new();
        let textarea = self.control(&mut tree, "textarea", None);
        tree.append_child(tree.root(), textarea)?;
        Ok(tree)
    }

    /// Checkbox with its label, wrapped in `<div class="checkbox">`
    pub fn checkbox(&mut self, label: &str) -> Result<DomTree> {
        let mut tree = DomTree::new();
        let wrapper = tree.create_element_with("div", [("class", "checkbox")]);
        let input = self.control(&mut tree, "input", Some("checkbox"));
        if let Some(elem) = tree.element_mut(input) {
            elem.set_attr("value", self.generator.element_value());
        }
        let label = label_for(&mut tree, input, label)?;

        tree.append_child(wrapper, input)?;
        tree.append_child(wrapper, label)?;
        tree.append_child(tree.root(), wrapper)?;
        Ok(tree)
    }

    /// Labelled `<select>` with one `<option>` per entry
    pub fn dropdown(&mut self, label: &str, options: &[&str]) -> Result<DomTree> {
        let mut tree = DomTree::new();
        let wrapper = tree.create_element_with("div", [("class", "dropdown")]);
        let select = self.control(&mut tree, "select", None);
        let label = label_for(&mut tree, select, label)?;

        for text in options {
            let option =
                tree.create_element_with("option", [("value", self.generator.element_value())]);
            let content = tree.create_text(text);
            tree.append_child(option, content)?;
            tree.append_child(select, option)?;
        }

        tree.append_child(wrapper, label)?;
        tree.append_child(wrapper, select)?;
        tree.append_child(tree.root(), wrapper)?;
        Ok(tree)
    }

    /// Radio group: one shared name, one radio/label pair per entry
    pub fn radio_group(&mut self, labels: &[&str]) -> Result<DomTree> {
        let mut tree = DomTree::new();
        let name = self.generator.element_name();
        let group = tree.create_element_with(
            "fieldset",
            [("class", "radio-group".to_string()), (RADIO_GROUP_ATTR, name.clone())],
        );
        self.allocator.assign(&mut tree, group);

        for text in labels {
            let pair = tree.create_element_with("div", [("class", "radio")]);
            let radio = tree.create_element_with(
                "input",
                [
                    ("type", "radio".to_string()),
                    ("name", name.clone()),
                    ("id", self.generator.element_id()),
                    ("value", self.generator.element_value()),
                ],
            );
            self.allocator.assign(&mut tree, radio);
            let label = label_for(&mut tree, radio, text)?;

            tree.append_child(pair, radio)?;
            tree.append_child(pair, label)?;
            tree.append_child(group, pair)?;
        }

        tree.append_child(tree.root(), group)?;
        Ok(tree)
    }

    /// `<hN id="...">text</hN>`, level clamped to 1..=6
    pub fn heading(&mut self, level: u8, text: &str) -> Result<DomTree> {
        let mut tree = DomTree::new();
        let tag = format!("h{}", level.clamp(1, 6));
        let heading = tree.create_element_with(&tag, [("id", self.generator.element_id())]);
        let content = tree.create_text(text);
        tree.append_child(heading, content)?;
        tree.append_child(tree.root(), heading)?;
        Ok(tree)
    }

    /// Detached form control with fresh id, name and retained id
    fn control(&mut self, tree: &mut DomTree, tag: &str, input_type: Option<&str>) -> NodeId {
        let control = tree.create_element(tag);
        if let Some(elem) = tree.element_mut(control) {
            if let Some(input_type) = input_type {
                elem.set_attr("type", input_type);
            }
            elem.set_attr("id", self.generator.element_id());
            elem.set_attr("name", self.generator.element_name());
            elem.set_attr(RETAINED_ATTR, self.allocator.next_id());
        }
        control
    }
}

/// Detached `<label for>` pointing at `target`'s id
fn label_for(tree: &mut DomTree, target: NodeId, text: &str) -> Result<NodeId> {
    let target_id = tree.get_attribute(target, "id").unwrap_or_default().to_string();
    let label = tree.create_element_with("label", [("for", target_id)]);
    let content = tree.create_text(text);
    tree.append_child(label, content)?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialGenerator;
    use crate::shape::ElementShape;
    use bz_html::to_html;

    fn top(tree: &DomTree) -> NodeId {
        tree.child_ids(tree.root())[0]
    }

    #[test]
    fn test_text_input() {
        let generator = SequentialGenerator::new();
        let mut allocator = RetainedAllocator::new("p").unwrap();
        let tree = ElementBuilder::new(&generator, &mut allocator)
            .text_input(Some("Your answer"))
            .unwrap();

        assert_eq!(
            to_html(&tree),
            r#"<input type="text" id="content-id-seq-1" name="content-name-seq-2" data-bz-retained="retained_p_1" placeholder="Your answer">"#
        );
        assert_eq!(ElementShape::classify(&tree, top(&tree)), ElementShape::SimpleInput);
    }

    #[test]
    fn test_radio_group_shares_name() {
        let generator = SequentialGenerator::new();
        let mut allocator = RetainedAllocator::new("p").unwrap();
        let tree = ElementBuilder::new(&generator, &mut allocator)
            .radio_group(&["Yes", "No"])
            .unwrap();

        let group = top(&tree);
        assert_eq!(ElementShape::classify(&tree, group), ElementShape::RadioGroup);
        let group_name = tree.get_attribute(group, RADIO_GROUP_ATTR).unwrap();

        let radios: Vec<_> = tree
            .descendants(group)
            .elements()
            .filter(|&id| tree.element(id).unwrap().is("input"))
            .collect();
        assert_eq!(radios.len(), 2);
        for radio in &radios {
            assert_eq!(tree.get_attribute(*radio, "name"), Some(group_name));
        }
        assert_ne!(
            tree.get_attribute(radios[0], "value"),
            tree.get_attribute(radios[1], "value")
        );
        // group + two radios
        assert_eq!(allocator.peek(), "4");
    }

    #[test]
    fn test_dropdown_shape_and_label() {
        let generator = SequentialGenerator::new();
        let mut allocator = RetainedAllocator::new("p").unwrap();
        let tree = ElementBuilder::new(&generator, &mut allocator)
            .dropdown("Pick one", &["A", "B", "C"])
            .unwrap();

        let ElementShape::DropdownGroup { select } = ElementShape::classify(&tree, top(&tree)) else {
            panic!("expected a dropdown group");
        };
        assert_eq!(tree.element_children(select).count(), 3);
        let select_id = tree.get_attribute(select, "id").unwrap();
        assert!(tree.find_by_attribute("for", select_id).is_some());
    }

    #[test]
    fn test_checkbox_and_textarea() {
        let generator = SequentialGenerator::new();
        let mut allocator = RetainedAllocator::new("p").unwrap();
        let mut builder = ElementBuilder::new(&generator, &mut allocator);

        let checkbox = builder.checkbox("Agree").unwrap();
        let input = checkbox.descendants(checkbox.root()).elements().nth(1).unwrap();
        assert_eq!(checkbox.get_attribute(input, "type"), Some("checkbox"));
        assert!(checkbox.get_attribute(input, "value").unwrap().starts_with("content-value-"));

        let textarea = builder.textarea().unwrap();
        assert_eq!(textarea.get_attribute(top(&textarea), RETAINED_ATTR), Some("retained_p_2"));
    }

    #[test]
    fn test_heading_level_clamped() {
        let generator = SequentialGenerator::new();
        let mut allocator = RetainedAllocator::new("p").unwrap();
        let tree = ElementBuilder::new(&generator, &mut allocator)
            .heading(9, "Wrap-up")
            .unwrap();
        assert_eq!(to_html(&tree), r#"<h6 id="content-id-seq-1">Wrap-up</h6>"#);
    }
}
