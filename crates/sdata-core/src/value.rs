//! # Canonical Value Tree
//!
//! [`Value`] is the in-memory form of every parsed document. It is an
//! explicit tagged union: a mapping is a [`Value::Map`], a sequence is a
//! [`Value::Sequence`], and nothing else can stand in for either.
//!
//! ## Conversion Rules
//!
//! YAML is richer than JSON. When converting the YAML tree:
//!
//! 1. **Tags are dropped**: `!custom {a: 1}` becomes the inner mapping.
//! 2. **Scalar keys are stringified**: `1: one` and `true: yes` produce the
//!    keys `"1"` and `"true"`. Null and collection keys are rejected.
//! 3. **Non-finite floats are rejected**: `.inf` and `.nan` have no JSON
//!    representation, and the validator only understands JSON numbers.
//! 4. **Merge keys are expanded**: `<<: *base` copies the anchored
//!    mapping's entries in; keys written alongside it take precedence.
//! 5. **Colliding keys are rejected**: `1: a` next to `"1": b` would
//!    otherwise silently drop one entry after stringification.
//!
//! Map key order is not significant; maps are stored sorted so that two
//! parses of the same text are structurally identical.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ParseError;

/// Canonical representation of a parsed YAML or JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `null`, `~`, or an empty document.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// Integer or finite floating point number.
    Number(serde_json::Number),
    /// Any string scalar.
    String(String),
    /// Ordered list of values.
    Sequence(Vec<Value>),
    /// String-keyed mapping.
    Map(BTreeMap<String, Value>),
}

/// The shape of a [`Value`], without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Map,
}

impl Kind {
    /// The JSON Schema `type` name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "array",
            Self::Map => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse YAML or JSON text into a canonical [`Value`].
///
/// Empty (or whitespace-only) text is `Null`. Callers that need a
/// non-null document must reject it themselves.
///
/// # Errors
///
/// Returns [`ParseError`] with the YAML parser's diagnostic when the text is
/// not well-formed, contains more than one document, or contains a construct
/// with no canonical representation (see the module docs).
pub fn parse(text: &str) -> Result<Value, ParseError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let mut yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| ParseError::from_yaml(&e))?;
    yaml.apply_merge().map_err(|e| ParseError::from_yaml(&e))?;
    Value::from_yaml(yaml)
}

impl Value {
    /// Convert a YAML tree into the canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for null or collection map keys, colliding
    /// keys, and non-finite floats.
    pub fn from_yaml(yaml: serde_yaml::Value) -> Result<Self, ParseError> {
        match yaml {
            serde_yaml::Value::Null => Ok(Self::Null),
            serde_yaml::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_yaml::Value::Number(n) => yaml_number(&n).map(Self::Number),
            serde_yaml::Value::String(s) => Ok(Self::String(s)),
            serde_yaml::Value::Sequence(seq) => seq
                .into_iter()
                .map(Self::from_yaml)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            serde_yaml::Value::Mapping(mapping) => {
                let mut map = BTreeMap::new();
                for (k, v) in mapping {
                    let key = map_key(k)?;
                    if map.contains_key(&key) {
                        return Err(ParseError::new(format!("duplicate mapping key: {key:?}")));
                    }
                    map.insert(key, Self::from_yaml(v)?);
                }
                Ok(Self::Map(map))
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value),
        }
    }

    /// The shape of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Sequence(_) => Kind::Sequence,
            Self::Map(_) => Kind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// The equivalent `serde_json` tree, as consumed by the schema validator.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }

    /// Compact JSON rendering.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::String(s.clone()),
            Value::Sequence(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Map(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Result<serde_json::Number, ParseError> {
    if let Some(i) = n.as_i64() {
        Ok(serde_json::Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(serde_json::Number::from(u))
    } else if let Some(f) = n.as_f64() {
        serde_json::Number::from_f64(f)
            .ok_or_else(|| ParseError::new(format!("cannot represent float {f} as a JSON number")))
    } else {
        Err(ParseError::new(format!("unsupported YAML number: {n}")))
    }
}

fn map_key(key: serde_yaml::Value) -> Result<String, ParseError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => map_key(tagged.value),
        serde_yaml::Value::Null => Err(ParseError::new("mapping keys must not be null")),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => Err(ParseError::new(
            "mapping keys must be scalars, found a collection",
        )),
    }
}
