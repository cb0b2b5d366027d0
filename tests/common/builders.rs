use retest_state::attribute::attribute_model::TEXT_KEY;
use retest_state::{Attribute, Attributes, Element, IdentifyingAttributes, Path, RetestId};

pub fn path(raw: &str) -> Path {
    raw.parse().unwrap()
}

pub fn identity(raw_path: &str, type_name: &str) -> IdentifyingAttributes {
    IdentifyingAttributes::create(path(raw_path), type_name).unwrap()
}

pub fn identity_with_text(raw_path: &str, type_name: &str, text: &str) -> IdentifyingAttributes {
    let base = identity(raw_path, type_name);
    IdentifyingAttributes::new(
        base.attributes()
            .cloned()
            .chain([Attribute::new(TEXT_KEY, text)]),
    )
    .unwrap()
}

pub fn retest_id(id: &str) -> RetestId {
    RetestId::new(id).unwrap()
}

pub fn leaf(id: &str, raw_path: &str, type_name: &str) -> Element {
    Element::leaf(retest_id(id), identity(raw_path, type_name), Attributes::new())
}

pub fn node(id: &str, raw_path: &str, type_name: &str, children: Vec<Element>) -> Element {
    Element::new(
        retest_id(id),
        identity(raw_path, type_name),
        Attributes::new(),
        children,
    )
    .unwrap()
}

/// `Window[1]` holding `Panel[1]` (with `Button[1]`, `Button[2]`) and `Label[1]`.
pub fn window_tree() -> Element {
    node(
        "window",
        "Window[1]",
        "javax.swing.JFrame",
        vec![
            node(
                "panel",
                "Window[1]/Panel[1]",
                "javax.swing.JPanel",
                vec![
                    leaf("ok", "Window[1]/Panel[1]/Button[1]", "javax.swing.JButton"),
                    leaf("cancel", "Window[1]/Panel[1]/Button[2]", "javax.swing.JButton"),
                ],
            ),
            leaf("status", "Window[1]/Label[1]", "javax.swing.JLabel"),
        ],
    )
}
