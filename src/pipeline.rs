//! The validation pipeline
//!
//! Options pass through four phases, each consuming the previous one's
//! output:
//!
//! 1. **project** keeps only declared keys, first value wins
//! 2. **default** fills declared defaults for keys the caller omitted
//! 3. **check required** fails with every required key still absent
//! 4. **check validators** fails with every present key whose validator
//!    rejects its value
//!
//! Phase 4 only runs when phase 3 passes, so a single call reports either
//! missing or invalid options, never both.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::OptionError;
use crate::options::{Key, OptionList};
use crate::spec::Spec;

type Working = IndexMap<Key, Value>;

/// Run all phases of `spec` over `options`
pub fn run(options: &OptionList, spec: &Spec) -> Result<OptionList, OptionError> {
    let projected = project(options, spec);
    let defaulted = apply_defaults(projected, spec);
    let checked = check_required(defaulted, spec)?;
    let validated = check_validators(checked, spec)?;
    Ok(validated.into_iter().collect())
}

fn project(options: &OptionList, spec: &Spec) -> Working {
    let projected: Working = spec
        .keys()
        .iter()
        .filter_map(|key| options.get(key).map(|value| (key.clone(), value.clone())))
        .collect();

    tracing::trace!(
        supplied = options.len(),
        kept = projected.len(),
        "projected options onto schema keys"
    );

    projected
}

fn apply_defaults(mut options: Working, spec: &Spec) -> Working {
    let mut applied = 0usize;
    for (key, default) in spec.defaults() {
        if !options.contains_key(key) {
            options.insert(key.clone(), default.clone());
            applied += 1;
        }
    }

    if applied > 0 {
        // Defaulted keys were appended; restore declaration order
        options.sort_by_cached_key(|key, _| spec.position(key));
    }

    tracing::trace!(applied, "applied option defaults");
    options
}

fn check_required(options: Working, spec: &Spec) -> Result<Working, OptionError> {
    let missing: Vec<Key> = spec
        .required()
        .iter()
        .filter(|key| !options.contains_key(key.as_str()))
        .cloned()
        .collect();

    match OptionError::missing(missing) {
        Some(err) => {
            tracing::debug!(keys = ?err.keys(), "required options missing");
            Err(err)
        }
        None => Ok(options),
    }
}

fn check_validators(options: Working, spec: &Spec) -> Result<Working, OptionError> {
    let invalid: Vec<Key> = spec
        .validators()
        .iter()
        .filter(|(key, validator)| {
            options
                .get(key.as_str())
                .is_some_and(|value| !validator.check(key, value))
        })
        .map(|(key, _)| key.clone())
        .collect();

    match OptionError::invalid(invalid) {
        Some(err) => {
            tracing::debug!(keys = ?err.keys(), "options failed validation");
            Err(err)
        }
        None => Ok(options),
    }
}
