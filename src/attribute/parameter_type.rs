use std::collections::BTreeMap;
use std::fmt;

use crate::attribute::AttributeValue;
use crate::error::{ParameterParseError, Result, RetestError};
use crate::path::Path;

pub const STRING_TYPE: &str = "string";
pub const BOOLEAN_TYPE: &str = "boolean";
pub const INTEGER_TYPE: &str = "integer";
pub const CLASS_TYPE: &str = "class";
pub const PATH_TYPE: &str = "path";

/// A named parser turning raw strings into attribute values.
pub trait ParameterType: Send + Sync {
    fn name(&self) -> &str;

    fn parse(&self, raw: &str) -> std::result::Result<AttributeValue, ParameterParseError>;

    fn can_parse(&self, raw: &str) -> bool {
        self.parse(raw).is_ok()
    }
}

// ============================================================================
// Standard types
// ============================================================================

/// Any string, taken as is.
pub struct StringType;

impl ParameterType for StringType {
    fn name(&self) -> &str {
        STRING_TYPE
    }

    fn parse(&self, raw: &str) -> std::result::Result<AttributeValue, ParameterParseError> {
        Ok(AttributeValue::Generic(raw.to_string()))
    }
}

/// `true` or `false`, ignoring case.
pub struct BooleanType;

impl ParameterType for BooleanType {
    fn name(&self) -> &str {
        BOOLEAN_TYPE
    }

    fn parse(&self, raw: &str) -> std::result::Result<AttributeValue, ParameterParseError> {
        parse_flag(raw).map(AttributeValue::Flag).ok_or_else(|| {
            ParameterParseError::new(
                BOOLEAN_TYPE,
                raw,
                "Value must be 'true' or 'false' (ignoring case).",
            )
        })
    }
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Decimal integer literal; leading zeros are insignificant.
pub struct IntegerType;

impl ParameterType for IntegerType {
    fn name(&self) -> &str {
        INTEGER_TYPE
    }

    fn parse(&self, raw: &str) -> std::result::Result<AttributeValue, ParameterParseError> {
        raw.trim()
            .parse::<i64>()
            .map(AttributeValue::Number)
            .map_err(|e| ParameterParseError::new(INTEGER_TYPE, raw, e.to_string()))
    }
}

/// Fully qualified type name such as `javax.swing.JButton` or `Outer$Inner`.
pub struct ClassNameType;

impl ParameterType for ClassNameType {
    fn name(&self) -> &str {
        CLASS_TYPE
    }

    fn parse(&self, raw: &str) -> std::result::Result<AttributeValue, ParameterParseError> {
        let raw = raw.trim();
        if raw.split('.').all(is_identifier) {
            Ok(AttributeValue::Generic(raw.to_string()))
        } else {
            Err(ParameterParseError::new(
                CLASS_TYPE,
                raw,
                "Value must be a dot-separated sequence of identifiers.",
            ))
        }
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Element path in its canonical string form.
pub struct PathType;

impl ParameterType for PathType {
    fn name(&self) -> &str {
        PATH_TYPE
    }

    fn parse(&self, raw: &str) -> std::result::Result<AttributeValue, ParameterParseError> {
        raw.parse::<Path>()
            .map(AttributeValue::Path)
            .map_err(|e| ParameterParseError::new(PATH_TYPE, raw, e.to_string()))
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Parameter types by name.
///
/// Build it once at startup and hand it out by reference; registration takes
/// `&mut self`, so a shared registry is read-only.
#[derive(Default)]
pub struct ParameterTypeRegistry {
    types: BTreeMap<String, Box<dyn ParameterType>>,
}

impl ParameterTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `string`, `boolean`, `integer`, `class` and `path`.
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        registry.register(StringType);
        registry.register(BooleanType);
        registry.register(IntegerType);
        registry.register(ClassNameType);
        registry.register(PathType);
        registry
    }

    /// Registers `parameter_type`, replacing any type of the same name.
    pub fn register(&mut self, parameter_type: impl ParameterType + 'static) {
        let name = parameter_type.name().to_string();
        tracing::trace!(parameter_type = %name, "registering parameter type");
        self.types.insert(name, Box::new(parameter_type));
    }

    pub fn get(&self, name: &str) -> Result<&dyn ParameterType> {
        self.types
            .get(name)
            .map(|parameter_type| parameter_type.as_ref())
            .ok_or_else(|| RetestError::UnregisteredParameterType(name.to_string()))
    }

    pub fn parse(&self, type_name: &str, raw: &str) -> Result<AttributeValue> {
        Ok(self.get(type_name)?.parse(raw)?)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl fmt::Debug for ParameterTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
