//! Compiled schemas
//!
//! [`compile`] folds a [`Schema`] into four indexes: every declared key, the
//! required keys, the declared defaults and the declared validators. A
//! [`Spec`] never changes after compilation and can be shared between
//! threads and reused for any number of validations.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::OptionError;
use crate::options::{Key, OptionList};
use crate::pipeline;
use crate::schema::Schema;
use crate::validator::Validator;

/// Lookup structure built from a schema.
///
/// Every index keeps first-declaration order, which is also the order keys
/// appear in validated option lists and in error reports.
#[derive(Debug, Clone, Default)]
pub struct Spec {
    keys: IndexSet<Key>,
    required: IndexSet<Key>,
    defaults: IndexMap<Key, Value>,
    validators: IndexMap<Key, Validator>,
}

/// Compile `schema` into a reusable [`Spec`].
///
/// Repeated keys merge: a key stays required once any entry requires it,
/// and a later default or validator replaces an earlier one.
pub fn compile(schema: &Schema) -> Spec {
    let spec = schema.iter().fold(Spec::default(), |mut spec, (key, directive)| {
        spec.keys.insert(key.to_string());
        if directive.required {
            spec.required.insert(key.to_string());
        }
        if let Some(default) = &directive.default {
            spec.defaults.insert(key.to_string(), default.clone());
        }
        if let Some(validator) = &directive.validator {
            spec.validators.insert(key.to_string(), validator.clone());
        }
        spec
    });

    tracing::debug!(
        keys = spec.keys.len(),
        required = spec.required.len(),
        defaults = spec.defaults.len(),
        validators = spec.validators.len(),
        "compiled option schema"
    );

    spec
}

impl Spec {
    pub fn compile(schema: &Schema) -> Self {
        compile(schema)
    }

    /// Validate `options` against this spec
    pub fn validate(&self, options: &OptionList) -> Result<OptionList, OptionError> {
        pipeline::run(options, self)
    }

    /// Every declared key
    pub fn keys(&self) -> &IndexSet<Key> {
        &self.keys
    }

    /// Keys that must have a value after defaulting
    pub fn required(&self) -> &IndexSet<Key> {
        &self.required
    }

    pub fn defaults(&self) -> &IndexMap<Key, Value> {
        &self.defaults
    }

    pub fn validators(&self) -> &IndexMap<Key, Validator> {
        &self.validators
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Declaration position of `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.get_index_of(key)
    }
}

impl From<&Schema> for Spec {
    fn from(schema: &Schema) -> Self {
        compile(schema)
    }
}

impl From<Schema> for Spec {
    fn from(schema: Schema) -> Self {
        compile(&schema)
    }
}
