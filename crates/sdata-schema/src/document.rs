//! # Schema Documents
//!
//! A [`SchemaDocument`] is a parsed schema tree plus the display name used
//! in error messages. Construction only parses; whether the tree is a
//! usable JSON Schema is discovered by the engine on first use.

use sdata_core::{parse, ParseError, Value};

/// A parsed, immutable JSON-Schema-shaped document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    name: String,
    root: Value,
}

impl SchemaDocument {
    /// Parse schema text (YAML or JSON) and attach a display name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is malformed or empty. An empty
    /// schema document has nothing to validate against, so it is rejected
    /// here rather than surfacing later as a library fault.
    pub fn from_text(text: &str, name: impl Into<String>) -> Result<Self, ParseError> {
        let root = parse(text)?;
        if root.is_null() {
            return Err(ParseError::new("schema document is empty"));
        }
        Ok(Self {
            name: name.into(),
            root,
        })
    }

    /// Wrap an already-parsed tree.
    pub fn from_value(root: Value, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The schema as a `serde_json` tree for the validator.
    pub fn to_json(&self) -> serde_json::Value {
        self.root.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdata_core::Kind;

    #[test]
    fn yaml_schema_parses_to_map() {
        let doc = SchemaDocument::from_text("type: object\nrequired: [age]", "person").unwrap();
        assert_eq!(doc.name(), "person");
        assert_eq!(doc.root().kind(), Kind::Map);
        assert_eq!(doc.to_json()["required"][0], "age");
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        assert!(SchemaDocument::from_text("{not valid", "broken").is_err());
    }

    #[test]
    fn empty_text_is_rejected() {
        let err = SchemaDocument::from_text("   \n", "blank").unwrap_err();
        assert_eq!(err.message, "schema document is empty");
    }

    #[test]
    fn scalar_schema_is_accepted_until_use() {
        // Shape is checked lazily by the engine.
        let doc = SchemaDocument::from_text("just a string", "odd").unwrap();
        assert_eq!(doc.root().kind(), Kind::String);
    }
}
