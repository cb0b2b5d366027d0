//! String and path similarity in `[0, 1]`.
//!
//! Both measures start from the common prefix and the common suffix of the
//! two inputs, related to the longer input.
//!
//! Paths square that ratio, so a renumbered segment deep inside a long path
//! still scores high. Text is much stricter: the ratio is taken to the fourth
//! power and every character of the longer differing middle section costs a
//! further factor of [`MISMATCH_FACTOR`]. Two type names that differ in one
//! word score close to 0, and a differing character in a short string is
//! punished harder than in a long one (`abc`/`adc` ≈ 0.08, `abcd`/`adcd` ≈ 0.13).

use crate::path::path_element::{SUFFIX_END, SUFFIX_START};
use crate::path::PATH_SEPARATOR;

/// Factor applied per differing character by [`text_similarity`].
pub const MISMATCH_FACTOR: f64 = 0.4;

/// Similarity of two optional texts. Two absent values are identical,
/// an absent and a present value share nothing.
pub fn text_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (None, None) => 1.0,
        (Some(a), Some(b)) => {
            let overlap = Overlap::of(a, b);
            let ratio = overlap.ratio();
            let mismatch = i32::try_from(overlap.mismatch).unwrap_or(i32::MAX);
            ratio.powi(4) * MISMATCH_FACTOR.powi(mismatch)
        }
        _ => 0.0,
    }
}

/// Similarity of two `/`-delimited paths. The positional suffix of the
/// trailing segment (`[3]`) is ignored, so siblings compare as equal.
pub fn path_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (a, b) {
        (None, None) => 1.0,
        (Some(a), Some(b)) => {
            let ratio = Overlap::of(strip_trailing_suffix(a), strip_trailing_suffix(b)).ratio();
            ratio * ratio
        }
        _ => 0.0,
    }
}

/// `"a/b[2]"` -> `"a/b"`; paths whose last segment has no suffix are returned as is.
pub(crate) fn strip_trailing_suffix(path: &str) -> &str {
    let last_start = path.rfind(PATH_SEPARATOR).map_or(0, |i| i + 1);
    let last = &path[last_start..];

    if last.ends_with(SUFFIX_END) {
        if let Some(open) = last.rfind(SUFFIX_START) {
            return &path[..last_start + open];
        }
    }
    path
}

/// Shared prefix plus suffix of two strings, in chars.
struct Overlap {
    common: usize,
    max_len: usize,
    /// Length of the longer differing middle section
    mismatch: usize,
}

impl Overlap {
    fn of(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let max_len = a.len().max(b.len());

        let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
        let suffix = a[prefix..]
            .iter()
            .rev()
            .zip(b[prefix..].iter().rev())
            .take_while(|(x, y)| x == y)
            .count();
        let common = prefix + suffix;

        Self {
            common,
            max_len,
            mismatch: max_len - common,
        }
    }

    fn ratio(&self) -> f64 {
        if self.max_len == 0 {
            return 1.0;
        }
        self.common as f64 / self.max_len as f64
    }
}
