//! Caller-supplied option validators
//!
//! A [`Validator`] wraps a predicate over a single option value. Predicates
//! built with [`Validator::new`] return `bool` and cannot break the
//! boolean contract. Predicates built with [`Validator::dynamic`] return a
//! JSON value whose verdict is checked at call time; anything other than a
//! JSON boolean is a bug in the predicate and panics.
//!
//! The built-in validators can also be looked up by name, which is how
//! schema documents refer to them.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type DynamicPredicate = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

#[derive(Clone)]
enum Check {
    Predicate(Predicate),
    Dynamic(DynamicPredicate),
}

/// Names accepted by [`Validator::builtin`]
pub const BUILTIN_VALIDATORS: &[&str] = &[
    "integer", "number", "string", "boolean", "list", "non_empty", "port",
];

/// A shareable predicate over one option value
#[derive(Clone)]
pub struct Validator {
    name: Cow<'static, str>,
    check: Check,
}

impl Validator {
    /// Wrap a boolean predicate
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: Cow::Borrowed("custom"),
            check: Check::Predicate(Arc::new(f)),
        }
    }

    /// Wrap a predicate whose verdict arrives as a JSON value.
    ///
    /// The predicate must return `Value::Bool`. Any other return panics when
    /// the validator runs.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Cow::Borrowed("dynamic"),
            check: Check::Dynamic(Arc::new(f)),
        }
    }

    /// Attach a display name used in logs and `Debug` output
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the predicate against the value of option `key`.
    ///
    /// # Panics
    ///
    /// Panics if a dynamic predicate returns anything but a JSON boolean.
    pub fn check(&self, key: &str, value: &Value) -> bool {
        match &self.check {
            Check::Predicate(f) => f(value),
            Check::Dynamic(f) => match f(value) {
                Value::Bool(verdict) => verdict,
                other => panic!(
                    "validator '{}' for option {} must return a boolean, got {}",
                    self.name, key, other
                ),
            },
        }
    }

    /// Look up a built-in validator by name
    pub fn builtin(name: &str) -> Option<Self> {
        let validator = match name {
            "integer" => Self::integer(),
            "number" => Self::number(),
            "string" => Self::string(),
            "boolean" => Self::boolean(),
            "list" => Self::list(),
            "non_empty" => Self::non_empty(),
            "port" => Self::port(),
            _ => return None,
        };
        Some(validator)
    }

    /// Integral JSON numbers
    pub fn integer() -> Self {
        Self::new(|v| v.is_i64() || v.is_u64()).named("integer")
    }

    pub fn number() -> Self {
        Self::new(Value::is_number).named("number")
    }

    pub fn string() -> Self {
        Self::new(Value::is_string).named("string")
    }

    pub fn boolean() -> Self {
        Self::new(Value::is_boolean).named("boolean")
    }

    pub fn list() -> Self {
        Self::new(Value::is_array).named("list")
    }

    /// Non-empty strings, lists and maps
    pub fn non_empty() -> Self {
        Self::new(|v| match v {
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => false,
        })
        .named("non_empty")
    }

    /// TCP/UDP port number in 1..=65535
    pub fn port() -> Self {
        Self::new(|v| v.as_u64().is_some_and(|n| (1..=65535).contains(&n))).named("port")
    }

    /// Strings matching `pattern`
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        let re = Regex::new(pattern)?;
        Ok(Self::new(move |v| v.as_str().is_some_and(|s| re.is_match(s)))
            .named(format!("pattern({})", pattern)))
    }

    /// Values equal to one of `allowed`
    pub fn one_of(allowed: Vec<Value>) -> Self {
        Self::new(move |v| allowed.contains(v)).named("one_of")
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicate_verdicts() {
        let even = Validator::new(|v| v.as_i64().is_some_and(|n| n % 2 == 0));
        assert!(even.check("n", &json!(4)));
        assert!(!even.check("n", &json!(3)));
        assert!(!even.check("n", &json!("4")));
    }

    #[test]
    fn test_dynamic_boolean_verdict() {
        let validator = Validator::dynamic(|v| json!(v.is_string()));
        assert!(validator.check("key", &json!("x")));
        assert!(!validator.check("key", &json!(1)));
    }

    #[test]
    #[should_panic(expected = "must return a boolean")]
    fn test_dynamic_non_boolean_panics() {
        let validator = Validator::dynamic(|_| json!("not a bool"));
        validator.check("key", &json!("x"));
    }

    #[test]
    fn test_builtins_by_name() {
        for name in BUILTIN_VALIDATORS {
            let validator = Validator::builtin(name).unwrap();
            assert_eq!(validator.name(), *name);
        }
        assert!(Validator::builtin("intger").is_none());
    }

    #[test]
    fn test_integer_rejects_strings_and_floats() {
        let integer = Validator::integer();
        assert!(integer.check("port", &json!(12345)));
        assert!(!integer.check("port", &json!("12345")));
        assert!(!integer.check("port", &json!(1.5)));
    }

    #[test]
    fn test_port_range() {
        let port = Validator::port();
        assert!(port.check("port", &json!(80)));
        assert!(!port.check("port", &json!(0)));
        assert!(!port.check("port", &json!(70000)));
        assert!(!port.check("port", &json!(-1)));
    }

    #[test]
    fn test_non_empty() {
        let non_empty = Validator::non_empty();
        assert!(non_empty.check("k", &json!("a")));
        assert!(!non_empty.check("k", &json!("")));
        assert!(!non_empty.check("k", &json!([])));
        assert!(!non_empty.check("k", &json!(null)));
    }

    #[test]
    fn test_pattern_and_one_of() {
        let name = Validator::pattern("^[a-z]+$").unwrap();
        assert!(name.check("name", &json!("abc")));
        assert!(!name.check("name", &json!("ABC")));
        assert!(!name.check("name", &json!(1)));
        assert!(Validator::pattern("(").is_err());

        let mode = Validator::one_of(vec![json!("fast"), json!("safe")]);
        assert!(mode.check("mode", &json!("safe")));
        assert!(!mode.check("mode", &json!("slow")));
    }

    #[test]
    fn test_debug_shows_name() {
        let validator = Validator::new(|_| true).named("always");
        assert_eq!(format!("{:?}", validator), "Validator(always)");
    }
}
