use crate::attribute::Attribute;
use crate::attribute::attribute_model::TEXT_KEY;
use crate::element::{ActionChangeSet, RootElement};
use crate::identity::{AttributeWeights, DefaultRetestIdProvider, IdentifyingAttributes, RetestIdProvider};
use crate::path::{Path, PathElement};
use crate::util::checksum::sha256_str;
use crate::util::similarity::{path_similarity, text_similarity};

type CmdResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Path element name of the synthetic elements `ids` creates
const ID_SCOPE_ELEMENT: &str = "element";

// ============================================================================
// similarity subcommand
// ============================================================================

pub fn cmd_similarity(a: &str, b: &str, as_path: bool) -> String {
    let score = if as_path {
        path_similarity(Some(a), Some(b))
    } else {
        text_similarity(Some(a), Some(b))
    };
    format!("{score:.6}")
}

// ============================================================================
// match subcommand
// ============================================================================

pub fn cmd_match(
    expected_path: &str,
    expected_type: &str,
    actual_path: &str,
    actual_type: &str,
    weights: &AttributeWeights,
) -> CmdResult<String> {
    let expected =
        IdentifyingAttributes::create_weighted(expected_path.parse()?, expected_type, weights)?;
    let actual = IdentifyingAttributes::create_weighted(actual_path.parse()?, actual_type, weights)?;

    let score = expected.match_score(&actual)?;
    tracing::info!(expected = %expected_path, actual = %actual_path, score, "matched identities");
    Ok(format!("{score:.6}"))
}

// ============================================================================
// ids subcommand
// ============================================================================

/// One `text -> id` line per input, all ids drawn from one scope.
pub fn cmd_ids(texts: &[String]) -> CmdResult<String> {
    let mut provider = DefaultRetestIdProvider::new();
    let mut lines = Vec::with_capacity(texts.len());

    for (index, text) in texts.iter().enumerate() {
        let position = i32::try_from(index + 1)?;
        let path = Path::of(PathElement::with_index(ID_SCOPE_ELEMENT, position)?);
        let identity =
            IdentifyingAttributes::new([Attribute::path(path), Attribute::new(TEXT_KEY, text.as_str())])?;
        let id = provider.retest_id(&identity)?;
        lines.push(format!("{text} -> {id}"));
    }

    Ok(lines.join("\n"))
}

// ============================================================================
// checksum subcommand
// ============================================================================

pub fn cmd_checksum(text: &str) -> String {
    sha256_str(text)
}

// ============================================================================
// apply subcommand
// ============================================================================

/// Patch the tree in `tree_file` with the change set in `changes_file`.
/// Returns the patched tree as JSON, or a summary when written to `output`.
pub fn cmd_apply(tree_file: &str, changes_file: &str, output: Option<&str>) -> CmdResult<String> {
    let tree: RootElement = serde_json::from_str(&std::fs::read_to_string(tree_file)?)?;
    let mut change_set: ActionChangeSet =
        serde_json::from_str(&std::fs::read_to_string(changes_file)?)?;

    let patched = apply_json(&tree, &mut change_set)?;

    match output {
        Some(path) => {
            std::fs::write(path, &patched.json)?;
            Ok(format!(
                "Wrote {} elements ({} before) to {}",
                patched.after, patched.before, path
            ))
        }
        None => Ok(patched.json),
    }
}

/// Patched tree plus element counts before and after.
pub struct PatchedTree {
    pub json: String,
    pub before: usize,
    pub after: usize,
}

pub fn apply_json(tree: &RootElement, change_set: &mut ActionChangeSet) -> CmdResult<PatchedTree> {
    let before = tree.count_all_contained_elements();
    let patched = tree.apply_changes(change_set)?;
    let after = patched.count_all_contained_elements();
    tracing::info!(before, after, screen = %patched.screen(), "applied change set");

    Ok(PatchedTree {
        json: serde_json::to_string_pretty(&patched)?,
        before,
        after,
    })
}
