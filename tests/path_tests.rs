use proptest::prelude::*;
use retest_state::error::ErrorKind;
use retest_state::{Path, PathElement};

// =========================================================================
// PathElement
// =========================================================================

#[test]
fn path_element_renders_name_and_suffix() {
    assert_eq!(PathElement::new("JButton", "2").unwrap().to_string(), "JButton[2]");
    assert_eq!(PathElement::named("HTML").unwrap().to_string(), "HTML");
    assert_eq!(PathElement::with_index("DIV", 3).unwrap().to_string(), "DIV[3]");
}

#[test]
fn path_element_trims_and_rejects_empty_names() {
    let element = PathElement::new("  Panel ", " 1 ").unwrap();
    assert_eq!(element.name(), "Panel");
    assert_eq!(element.suffix(), "1");

    let err = PathElement::new("   ", "1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(PathElement::named("").is_err());
}

#[test]
fn path_element_rejects_reserved_characters() {
    assert!(PathElement::named("a/b").is_err());
    assert!(PathElement::new("a", "1]").is_err());
    assert!("Button[1".parse::<PathElement>().is_err(), "unclosed suffix");
}

#[test]
fn path_element_index_only_for_numeric_suffix() {
    assert_eq!("Tab[4]".parse::<PathElement>().unwrap().index(), Some(4));
    assert_eq!("Tab[x]".parse::<PathElement>().unwrap().index(), None);
    assert!(!"Tab".parse::<PathElement>().unwrap().has_suffix());
}

#[test]
fn path_element_ordering_is_structural() {
    let a = PathElement::new("A", "1").unwrap();
    let b = PathElement::new("A", "2").unwrap();
    let c = PathElement::new("B", "1").unwrap();
    assert!(a < b);
    assert!(b < c);
    assert_eq!(a, "A[1]".parse().unwrap());
}

// =========================================================================
// Path
// =========================================================================

#[test]
fn path_compose_appends_one_element() {
    let window = Path::of(PathElement::with_index("Window", 1).unwrap());
    let button = Path::compose(Some(&window), PathElement::with_index("JButton", 2).unwrap());
    assert_eq!(button.to_string(), "Window[1]/JButton[2]");
    assert_eq!(button.len(), 2);

    let standalone = Path::compose(None, PathElement::named("Root").unwrap());
    assert_eq!(standalone.to_string(), "Root");
}

#[test]
fn empty_and_absolute_root_stay_distinguishable() {
    assert_eq!(Path::empty().to_string(), "");
    assert_eq!(Path::absolute_root().to_string(), "/");
    assert_ne!(Path::empty(), Path::absolute_root());
    assert_eq!("/".parse::<Path>().unwrap(), Path::absolute_root());
    assert_eq!("".parse::<Path>().unwrap(), Path::empty());
}

#[test]
fn absolute_paths_round_trip() {
    let path: Path = "/HTML/BODY/DIV[1]".parse().unwrap();
    assert!(path.is_absolute());
    assert_eq!(path.len(), 3);
    assert_eq!(path.to_string(), "/HTML/BODY/DIV[1]");
}

#[test]
fn parent_path_drops_trailing_element() {
    let path: Path = "Window[1]/Panel[1]/Button[2]".parse().unwrap();
    let parent = path.parent_path().unwrap();
    assert_eq!(parent.to_string(), "Window[1]/Panel[1]");
    assert_eq!(path.element().unwrap().to_string(), "Button[2]");

    let single: Path = "Window[1]".parse().unwrap();
    assert_eq!(single.parent_path(), Some(Path::empty()));
    assert_eq!(Path::empty().parent_path(), None);
}

#[test]
fn is_parent_requires_full_leading_sequence() {
    let panel: Path = "Window[1]/Panel[1]".parse().unwrap();
    let button: Path = "Window[1]/Panel[1]/Button[1]".parse().unwrap();
    let other: Path = "Window[1]/Panel[2]/Button[1]".parse().unwrap();

    assert!(panel.is_parent(&button));
    assert!(panel.is_parent(&panel), "a path contains itself");
    assert!(!panel.is_parent(&other));
    assert!(!button.is_parent(&panel));
    assert!(!"/Window[1]".parse::<Path>().unwrap().is_parent(&button));
}

#[test]
fn malformed_path_is_rejected() {
    let err = "Window[1]//Button".parse::<Path>().unwrap_err();
    assert_eq!(err.code(), "ERR_VALIDATION");
    assert!("Window[1]/Button[".parse::<Path>().is_err());
}

#[test]
fn path_serializes_as_string() {
    let path: Path = "Window[1]/Tab[2]".parse().unwrap();
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, "\"Window[1]/Tab[2]\"");
    assert_eq!(serde_json::from_str::<Path>(&json).unwrap(), path);
    assert!(serde_json::from_str::<Path>("\"a//b\"").is_err());
}

// =========================================================================
// Property tests
// =========================================================================

fn path_element_strategy() -> impl Strategy<Value = PathElement> {
    ("[A-Za-z][A-Za-z0-9_]{0,8}", proptest::option::of(0i32..50)).prop_map(|(name, index)| {
        match index {
            Some(index) => PathElement::with_index(&name, index).unwrap(),
            None => PathElement::named(&name).unwrap(),
        }
    })
}

proptest! {
    #[test]
    fn path_element_string_form_parses_back(element in path_element_strategy()) {
        let parsed: PathElement = element.to_string().parse().unwrap();
        prop_assert_eq!(parsed, element);
    }

    #[test]
    fn path_string_form_parses_back(
        absolute in any::<bool>(),
        elements in proptest::collection::vec(path_element_strategy(), 1..6),
    ) {
        let root = if absolute { Path::absolute_root() } else { Path::empty() };
        let path = elements.into_iter().fold(root, |path, element| path.child(element));

        let reparsed: Path = path.to_string().parse().unwrap();
        prop_assert_eq!(&reparsed, &path);
        prop_assert_eq!(reparsed.to_string(), path.to_string());
    }
}
