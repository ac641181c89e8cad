//! Schema types and schema documents
//!
//! A [`Schema`] lists the options a component accepts, each with a
//! [`Directive`] saying whether it is required, what its default is and how
//! its value is checked. Schemas are built in code or parsed from JSON/TOML
//! documents:
//!
//! ```toml
//! [port]
//! required = true
//! validator = "port"
//!
//! [address]
//! required = true
//! default = "0.0.0.0"
//!
//! [mode]
//! validator = { one_of = ["fast", "safe"] }
//!
//! [verbose]
//! ```

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};
use crate::options::Key;
use crate::validator::Validator;

/// Per-option declarations
#[derive(Debug, Clone)]
pub struct Directive {
    /// Must have a value after defaulting
    pub required: bool,
    /// Filled in when the caller omits the option; `Some(Value::Null)` is a real default
    pub default: Option<Value>,
    /// Checked against present values
    pub validator: Option<Validator>,
}

impl Directive {
    /// A directive with no declarations: the option is only passed through
    pub fn new() -> Self {
        Self {
            required: false,
            default: None,
            validator: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Parse a directive table from a schema document
    fn from_json(key: &str, value: &Value) -> Result<Self> {
        let table = value.as_object().ok_or_else(|| SchemaError::InvalidDirective {
            key: key.to_string(),
            reason: format!("expected a table of directives, got {}", json_type_name(value)),
        })?;

        let mut directive = Directive::new();
        for (name, setting) in table {
            match name.as_str() {
                "required" => {
                    directive.required =
                        setting.as_bool().ok_or_else(|| SchemaError::InvalidDirective {
                            key: key.to_string(),
                            reason: format!(
                                "'required' must be a boolean, got {}",
                                json_type_name(setting)
                            ),
                        })?;
                }
                "default" => directive.default = Some(setting.clone()),
                "validator" => directive.validator = Some(parse_validator(key, setting)?),
                other => {
                    return Err(SchemaError::InvalidDirective {
                        key: key.to_string(),
                        reason: format!("unknown directive '{}'", other),
                    })
                }
            }
        }

        Ok(directive)
    }
}

/// Declared options, in declaration order.
///
/// Repeated keys are allowed here and merged when the schema is compiled.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(Key, Directive)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option, chaining
    pub fn option(mut self, key: impl Into<Key>, directive: Directive) -> Self {
        self.push(key, directive);
        self
    }

    pub fn push(&mut self, key: impl Into<Key>, directive: Directive) {
        self.entries.push((key.into(), directive));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Directive)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a schema document held as JSON
    pub fn from_json(document: &Value) -> Result<Self> {
        let table = document.as_object().ok_or_else(|| {
            SchemaError::InvalidSchema(format!(
                "expected a table of options, got {}",
                json_type_name(document)
            ))
        })?;
        Self::from_table(table)
    }

    pub fn from_json_str(document: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(document)?;
        Self::from_json(&value)
    }

    pub fn from_toml_str(document: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(document)?;
        let value = serde_json::to_value(table)?;
        Self::from_json(&value)
    }

    /// Read a `.toml` or `.json` schema document
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading schema document");

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(SchemaError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn from_table(table: &Map<String, Value>) -> Result<Self> {
        let mut schema = Schema::new();
        for (key, value) in table {
            schema.push(key.clone(), Directive::from_json(key, value)?);
        }
        Ok(schema)
    }
}

impl<K: Into<Key>> FromIterator<(K, Directive)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Directive)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, d)| (k.into(), d)).collect(),
        }
    }
}

/// `"name"`, `{ pattern = "..." }` or `{ one_of = [...] }`
fn parse_validator(key: &str, setting: &Value) -> Result<Validator> {
    if let Some(name) = setting.as_str() {
        return Validator::builtin(name).ok_or_else(|| SchemaError::UnknownValidator {
            key: key.to_string(),
            name: name.to_string(),
        });
    }

    let table = match setting.as_object() {
        Some(table) if table.len() == 1 => table,
        _ => {
            return Err(SchemaError::InvalidDirective {
                key: key.to_string(),
                reason: "'validator' must be a name or a single-entry table".into(),
            })
        }
    };

    match table.iter().next() {
        Some((kind, Value::String(pattern))) if kind == "pattern" => {
            Validator::pattern(pattern).map_err(|source| SchemaError::InvalidPattern {
                key: key.to_string(),
                source,
            })
        }
        Some((kind, Value::Array(allowed))) if kind == "one_of" => {
            Ok(Validator::one_of(allowed.clone()))
        }
        Some((kind, _)) => Err(SchemaError::UnknownValidator {
            key: key.to_string(),
            name: kind.clone(),
        }),
        None => Err(SchemaError::InvalidDirective {
            key: key.to_string(),
            reason: "empty validator table".into(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "table",
    }
}
