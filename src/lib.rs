//! Familiar Options
//!
//! Declarative validation for keyword-style option lists. A component
//! declares the options it accepts as a [`Schema`]; callers hand in an
//! arbitrary [`OptionList`] and get back a normalized list or an error
//! naming every offending key.
//!
//! ## Features
//!
//! - **Projection**: undeclared options are dropped
//! - **Defaults**: declared defaults fill omitted options, never override
//! - **Required options**: all missing keys reported in one error
//! - **Validators**: per-option predicates, all failures reported in one error
//! - **Compile once**: a compiled [`Spec`] is immutable and reusable
//! - **Schema documents**: schemas can be declared in TOML or JSON
//!
//! ## Example
//!
//! ```
//! use familiar_options::{validate, Directive, OptionList, Schema, Validator};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .option("port", Directive::new().required().validator(Validator::integer()))
//!     .option("address", Directive::new().required().default("0.0.0.0"));
//!
//! let options = OptionList::new().with("port", 12345).with("debug", true);
//! let options = validate(&options, &schema).unwrap();
//!
//! assert_eq!(options.get("address"), Some(&json!("0.0.0.0")));
//! assert!(!options.contains_key("debug"));
//! ```

use std::borrow::Cow;

pub mod config;
pub mod error;
pub mod message;
pub mod options;
pub mod pipeline;
pub mod schema;
pub mod spec;
pub mod validator;

pub use config::OptionSources;
pub use error::{ErrorKind, OptionError, Result, SchemaError};
pub use options::{Key, OptionList};
pub use schema::{Directive, Schema};
pub use spec::{compile, Spec};
pub use validator::Validator;

/// Anything `validate` can check options against: a raw schema, compiled
/// on the spot, or an already compiled spec.
pub trait IntoSpec<'a> {
    fn into_spec(self) -> Cow<'a, Spec>;
}

impl<'a> IntoSpec<'a> for &'a Spec {
    fn into_spec(self) -> Cow<'a, Spec> {
        Cow::Borrowed(self)
    }
}

impl<'a> IntoSpec<'a> for Spec {
    fn into_spec(self) -> Cow<'a, Spec> {
        Cow::Owned(self)
    }
}

impl<'a> IntoSpec<'a> for &Schema {
    fn into_spec(self) -> Cow<'a, Spec> {
        Cow::Owned(compile(self))
    }
}

impl<'a> IntoSpec<'a> for Schema {
    fn into_spec(self) -> Cow<'a, Spec> {
        Cow::Owned(compile(&self))
    }
}

/// Validate `options` against a schema or compiled spec.
///
/// Returns the normalized option list: declared keys only, defaults filled,
/// in declaration order. Missing required options are reported before any
/// validator runs.
///
/// # Panics
///
/// Panics if a [`Validator::dynamic`] predicate returns a non-boolean, or if
/// any validator panics.
pub fn validate<'a>(
    options: &OptionList,
    spec: impl IntoSpec<'a>,
) -> std::result::Result<OptionList, OptionError> {
    spec.into_spec().validate(options)
}

/// Like [`validate`], but panics with the error message on failure.
pub fn validate_or_panic<'a>(options: &OptionList, spec: impl IntoSpec<'a>) -> OptionList {
    match validate(options, spec) {
        Ok(options) => options,
        Err(err) => {
            tracing::error!(kind = ?err.kind(), keys = ?err.keys(), "option validation failed");
            panic!("{}", err)
        }
    }
}
