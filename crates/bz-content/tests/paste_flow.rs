//! End-to-end authoring flow: load, build, copy, paste, export

use bz_content::{EditingSession, SessionConfig, RETAINED_ATTR};
use bz_dom::DomTree;
use bz_html::to_html;
use std::collections::HashSet;

fn attribute_values(tree: &DomTree, name: &str) -> Vec<String> {
    tree.descendants(tree.root())
        .elements()
        .filter_map(|id| tree.get_attribute(id, name).map(str::to_string))
        .collect()
}

/// `name` values of every control except radios, which share a group name
fn control_names(tree: &DomTree) -> Vec<String> {
    tree.descendants(tree.root())
        .elements()
        .filter(|&id| tree.element(id).and_then(|e| e.input_type()).as_deref() != Some("radio"))
        .filter_map(|id| tree.get_attribute(id, "name").map(str::to_string))
        .collect()
}

fn assert_unique(values: &[String]) {
    let unique: HashSet<_> = values.iter().collect();
    assert_eq!(unique.len(), values.len(), "duplicates in {values:?}");
}

#[test]
fn test_copy_paste_never_duplicates_identifiers() {
    let mut session = EditingSession::new(SessionConfig::new("1042")).unwrap();
    let mut document = session
        .load(concat!(
            r#"<h2 data-bz-retained="retained_1042_9">Module</h2>"#,
            r#"<div class="quiz">"#,
            r#"<label>A</label><select name="content-name-a" id="content-id-a"><option>1</option></select>"#,
            r#"<label>B</label><select name="content-name-b" id="content-id-b"><option>2</option></select>"#,
            r#"<input type="text" name="content-name-c" id="content-id-c"><h4 id="content-id-h">Why?</h4>"#,
            "</div>"
        ))
        .unwrap();
    let root = document.root();

    let group = session.builder().radio_group(&["Agree", "Disagree"]).unwrap();
    let dropdown = session.builder().dropdown("Pick", &["A", "B"]).unwrap();
    session.insert(&mut document, root, &group).unwrap();
    session.insert(&mut document, root, &dropdown).unwrap();

    // copy everything that is on the page and paste it twice
    let copied = to_html(&document);
    for _ in 0..2 {
        let (fragment, report) = session.paste(&copied).unwrap();
        assert!(report.radio_groups == 1 && report.retained > 0);
        session.insert(&mut document, root, &fragment).unwrap();
    }

    assert_unique(&attribute_values(&document, "id"));
    assert_unique(&attribute_values(&document, RETAINED_ATTR));
    // 3 controls in the quiz plus the dropdown select, three times over
    let names = control_names(&document);
    assert_eq!(names.len(), 12);
    assert_unique(&names);

    // three radio groups, each internally consistent
    let groups = attribute_values(&document, "data-radio-group");
    assert_eq!(groups.len(), 3);
    assert_unique(&groups);
}

#[test]
fn test_paste_drops_unknown_attributes() {
    let mut session = EditingSession::new(SessionConfig::new("p")).unwrap();
    let (fragment, _) = session
        .paste(r#"<p onclick="steal()" class="x" data-bz-weight="2">t</p>"#)
        .unwrap();
    assert_eq!(session.export(&fragment), r#"<p class="x" data-bz-weight="2">t</p>"#);
}

#[test]
fn test_extra_attributes_from_config() {
    let config = SessionConfig::from_toml_str(
        r#"
        page_id = "p"
        extra_attributes = ["data-bz-hint"]
        "#,
    )
    .unwrap();
    let mut session = EditingSession::new(config).unwrap();
    let document = session.load(r#"<p data-bz-hint="think" data-x="1">t</p>"#).unwrap();
    assert_eq!(session.export(&document), r#"<p data-bz-hint="think">t</p>"#);
}

#[test]
fn test_reload_resets_counter() {
    let mut session = EditingSession::new(SessionConfig::new("p")).unwrap();
    session.load(r#"<p data-bz-retained="retained_p_50">a</p>"#).unwrap();
    assert_eq!(session.allocator().peek(), "51");

    session.load(r#"<p data-bz-retained="retained_p_2">b</p>"#).unwrap();
    assert_eq!(session.next_retained_id(), "retained_p_3");
}
