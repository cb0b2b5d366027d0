use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{Result, RetestError};
use crate::identity::IdentifyingAttributes;
use crate::util::retest_id::normalize_and_cut;

/// Every id handed out is shorter than this.
pub const MAX_ID_LEN: usize = 20;

/// Seed used when neither text nor type yields a usable id.
pub const PLACEHOLDER_SEED: &str = "element";

const DISAMBIGUATOR_SEPARATOR: char = '-';
const DISAMBIGUATOR_LEN: usize = 5;

/// Assigns retest ids that are unique within one capture scope.
pub trait RetestIdProvider {
    fn retest_id(&mut self, identity: &IdentifyingAttributes) -> Result<String>;

    /// Start a new scope; previously issued ids may be handed out again.
    fn reset(&mut self);
}

/// Derives ids from the element's text, falling back to its type.
///
/// Not synchronised: use one provider per sequential capture pass.
#[derive(Debug, Default)]
pub struct DefaultRetestIdProvider {
    used: HashSet<String>,
}

impl DefaultRetestIdProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issued(&self) -> usize {
        self.used.len()
    }

    fn candidate(identity: &IdentifyingAttributes) -> String {
        [identity.text(), identity.type_name()]
            .into_iter()
            .flatten()
            .map(normalize_and_cut)
            .find(|id| !id.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_SEED.to_string())
    }

    fn disambiguate(&self, base: &str) -> String {
        let keep = MAX_ID_LEN - 1 - DISAMBIGUATOR_LEN - 1;
        let base: String = base.chars().take(keep).collect();
        loop {
            let random: String = Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(DISAMBIGUATOR_LEN)
                .collect();
            let id = format!("{base}{DISAMBIGUATOR_SEPARATOR}{random}");
            if !self.used.contains(&id) {
                return id;
            }
        }
    }
}

impl RetestIdProvider for DefaultRetestIdProvider {
    fn retest_id(&mut self, identity: &IdentifyingAttributes) -> Result<String> {
        if identity.path().is_empty() {
            return Err(RetestError::MissingField("path"));
        }

        let candidate = Self::candidate(identity);
        let id = if self.used.contains(&candidate) {
            let id = self.disambiguate(&candidate);
            tracing::debug!(candidate = %candidate, id = %id, "retest id already taken, disambiguated");
            id
        } else {
            candidate
        };

        self.used.insert(id.clone());
        Ok(id)
    }

    fn reset(&mut self) {
        tracing::trace!(issued = self.used.len(), "resetting retest id scope");
        self.used.clear();
    }
}
