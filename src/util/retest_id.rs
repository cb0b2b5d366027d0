/// Separator between words of a normalized id
pub const WORD_SEPARATOR: char = '_';

/// Normalized ids up to this length are kept whole.
pub const MAX_UNCUT_LEN: usize = 17;

/// Earliest word boundary at which a long id may be cut.
pub const MIN_CUT_POS: usize = 12;

/// Length of a long id without a usable word boundary.
pub const HARD_CUT_LEN: usize = 15;

pub fn normalize_and_cut(raw: &str) -> String {
    cut(&normalize(raw))
}

/// Lowercase `[a-z0-9_]` form of `raw`: whitespace becomes `_`, everything
/// else outside `[A-Za-z0-9_]` is dropped and runs of `_` collapse.
pub fn normalize(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());

    for c in raw.trim().chars() {
        let c = if c.is_whitespace() { WORD_SEPARATOR } else { c };
        if !(c.is_ascii_alphanumeric() || c == WORD_SEPARATOR) {
            continue;
        }
        if c == WORD_SEPARATOR && normalized.ends_with(WORD_SEPARATOR) {
            continue;
        }
        normalized.push(c.to_ascii_lowercase());
    }

    normalized
}

/// Shorten an id longer than [`MAX_UNCUT_LEN`], preferring to end at the
/// first word boundary in `MIN_CUT_POS..=MAX_UNCUT_LEN`.
pub fn cut(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= MAX_UNCUT_LEN {
        return id.to_string();
    }

    let len = (MIN_CUT_POS..=MAX_UNCUT_LEN)
        .find(|&pos| chars[pos] == WORD_SEPARATOR)
        .unwrap_or(HARD_CUT_LEN);

    chars[..len].iter().collect()
}

/// Retest ids are non-empty and made of ASCII letters, digits, `_` and `-`.
pub fn is_valid_retest_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
