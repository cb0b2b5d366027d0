use crate::attribute::AttributeValue;
use crate::identity::IdentifyingAttributes;

/// Host-supplied lookup of toolkit default values (default font, colour...).
///
/// State attributes equal to their default need not be persisted.
pub trait DefaultValueFinder {
    fn default_value(&self, identity: &IdentifyingAttributes, key: &str) -> Option<AttributeValue>;

    fn is_default(&self, identity: &IdentifyingAttributes, key: &str, value: &AttributeValue) -> bool {
        self.default_value(identity, key)
            .is_some_and(|default| default == *value)
    }
}

/// Finder that knows no defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultValueFinder for NoDefaults {
    fn default_value(&self, _identity: &IdentifyingAttributes, _key: &str) -> Option<AttributeValue> {
        None
    }
}
