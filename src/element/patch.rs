use crate::attribute::AttributeDifference;
use crate::attribute::attribute_model::PATH_KEY;
use crate::element::{ActionChangeSet, Element};
use crate::error::Result;

impl Element {
    /// New tree with `change_set` applied to this element and all descendants.
    ///
    /// Per element: apply the differences keyed to its current identity,
    /// drop deleted children, push a path rewrite to every surviving child
    /// when the own path changed, recurse, then append the insertions whose
    /// parent path is the new path. The receiver is left untouched.
    pub fn apply_changes(&self, change_set: &mut ActionChangeSet) -> Result<Element> {
        let old_identity = &self.identifying_attributes;
        let identity = old_identity
            .apply_changes(change_set.identifying_changes().get_all(old_identity))?;
        let attributes = self
            .attributes
            .apply_changes(change_set.attribute_changes().get_all(old_identity))?;

        let survivors: Vec<&Element> = self
            .children
            .iter()
            .filter(|child| {
                let deleted = change_set.is_deleted(&child.identifying_attributes);
                if deleted {
                    tracing::debug!(path = %child.path(), "removing deleted element");
                }
                !deleted
            })
            .collect();

        if identity.path() != old_identity.path() {
            tracing::debug!(
                from = %old_identity.path(),
                to = %identity.path(),
                children = survivors.len(),
                "propagating path change to children"
            );
            for child in &survivors {
                let Some(own) = child.path().element() else {
                    continue;
                };
                let rewritten = identity.path().child(own.clone());
                change_set.add_identifying_change(
                    child.identifying_attributes.clone(),
                    AttributeDifference::new(
                        PATH_KEY,
                        Some(child.path().clone().into()),
                        Some(rewritten.into()),
                    ),
                );
            }
        }

        let mut children = survivors
            .into_iter()
            .map(|child| child.apply_changes(change_set))
            .collect::<Result<Vec<_>>>()?;

        for inserted in change_set.insertions_under(identity.path()) {
            tracing::debug!(path = %inserted.path(), "inserting element");
            children.push(inserted.clone());
        }

        let mut patched = Element::new(self.retest_id.clone(), identity, attributes, children)?;
        patched.screenshot = self.screenshot.clone();
        Ok(patched)
    }
}
