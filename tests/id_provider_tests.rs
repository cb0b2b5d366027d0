mod common;

use std::collections::HashSet;

use common::builders::{identity, identity_with_text};
use proptest::prelude::*;
use retest_state::identity::id_provider::{MAX_ID_LEN, PLACEHOLDER_SEED};
use retest_state::identity::DefaultRetestIdProvider;
use retest_state::util::retest_id::{cut, is_valid_retest_id, normalize, normalize_and_cut};
use retest_state::{Path, RetestError, RetestId, RetestIdProvider};

// =========================================================================
// Normalization and cutting
// =========================================================================

#[test]
fn normalize_collapses_whitespace_and_strips_punctuation() {
    assert_eq!(normalize("  Save As...  "), "save_as");
    assert_eq!(normalize("First\t\tName:"), "first_name");
    assert_eq!(normalize("a _ b"), "a_b");
    assert_eq!(normalize("Ünïcode!"), "ncode");
    assert_eq!(normalize("!!!"), "");
}

#[test]
fn short_ids_are_kept_whole() {
    assert_eq!(cut("seventeen_chars_x"), "seventeen_chars_x");
    assert_eq!(normalize_and_cut("OK"), "ok");
}

#[test]
fn long_ids_cut_at_a_word_boundary() {
    // boundary at index 13
    assert_eq!(cut("please_select_a_file_to_open"), "please_select");
    // boundary right at index 12
    assert_eq!(cut("abcdefghijkl_mn_opqrs"), "abcdefghijkl");
}

#[test]
fn long_ids_without_boundary_are_hard_cut() {
    assert_eq!(cut("supercalifragilisticexpialidocious"), "supercalifragil");
    assert_eq!(cut("ab_cdefghijklmnopqrstuv"), "ab_cdefghijklmn");
}

#[test]
fn retest_id_character_set() {
    assert!(is_valid_retest_id("ok_button-3"));
    assert!(!is_valid_retest_id(""));
    assert!(!is_valid_retest_id("a b"));
}

// =========================================================================
// Provider
// =========================================================================

#[test]
fn text_is_the_preferred_seed() {
    let mut provider = DefaultRetestIdProvider::new();
    let id = provider
        .retest_id(&identity_with_text("Window[1]/Button[1]", "javax.swing.JButton", "Save As"))
        .unwrap();
    assert_eq!(id, "save_as");
}

#[test]
fn type_is_used_without_usable_text() {
    let mut provider = DefaultRetestIdProvider::new();
    let blank = identity_with_text("Window[1]/Button[1]", "JButton", "   ");
    assert_eq!(provider.retest_id(&blank).unwrap(), "jbutton");

    let symbols = identity_with_text("Window[1]/Button[2]", "JToggleButton", "★");
    assert_eq!(provider.retest_id(&symbols).unwrap(), "jtogglebutton");
}

#[test]
fn placeholder_when_nothing_normalizes() {
    let mut provider = DefaultRetestIdProvider::new();
    let id = provider.retest_id(&identity("Window[1]/X[1]", "???")).unwrap();
    assert_eq!(id, PLACEHOLDER_SEED);
}

#[test]
fn repeated_seeds_get_distinct_short_ids() {
    let mut provider = DefaultRetestIdProvider::new();
    let button = identity_with_text("Window[1]/Button[1]", "JButton", "Please select a file to open");

    let ids: Vec<String> = (0..25).map(|_| provider.retest_id(&button).unwrap()).collect();
    let unique: HashSet<&String> = ids.iter().collect();

    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids[0], "please_select");
    for id in &ids {
        assert!(id.chars().count() < MAX_ID_LEN, "{id} is too long");
        assert!(RetestId::new(id).is_ok(), "{id} is not a valid retest id");
    }
    assert!(ids[1].starts_with("please_select-"));
    assert_eq!(provider.issued(), 25);
}

#[test]
fn reset_starts_a_new_scope() {
    let mut provider = DefaultRetestIdProvider::new();
    let ok = identity_with_text("Window[1]/Button[1]", "JButton", "OK");

    assert_eq!(provider.retest_id(&ok).unwrap(), "ok");
    assert_ne!(provider.retest_id(&ok).unwrap(), "ok");

    provider.reset();
    assert_eq!(provider.issued(), 0);
    assert_eq!(provider.retest_id(&ok).unwrap(), "ok");
}

#[test]
fn identity_without_path_elements_is_rejected() {
    let mut provider = DefaultRetestIdProvider::new();
    let rootless = retest_state::IdentifyingAttributes::create(Path::empty(), "JFrame").unwrap();
    assert_eq!(
        provider.retest_id(&rootless).unwrap_err(),
        RetestError::MissingField("path")
    );
}

proptest! {
    #[test]
    fn ids_are_unique_valid_and_short(texts in proptest::collection::vec(".{0,40}", 1..30)) {
        let mut provider = DefaultRetestIdProvider::new();
        let mut seen = HashSet::new();

        for (index, text) in texts.iter().enumerate() {
            let identity = identity_with_text(&format!("Window[1]/Item[{index}]"), "JLabel", text);
            let id = provider.retest_id(&identity).unwrap();
            prop_assert!(id.chars().count() < MAX_ID_LEN);
            prop_assert!(is_valid_retest_id(&id));
            prop_assert!(seen.insert(id));
        }
    }
}
