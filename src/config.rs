//! Loading option lists from configuration sources
//!
//! Option lists are often assembled from several places before being
//! validated. [`OptionSources`] layers them in order:
//! - Config files (TOML or JSON, later files override earlier ones)
//! - Environment variables (`PREFIX_*`)
//!
//! The underlying `config` crate lowercases every key it reads. Use
//! [`OptionSources::load_for`] when the schema declares mixed-case keys so
//! loaded keys are matched back to their declared spelling.
//!
//! ## Example
//! ```no_run
//! use familiar_options::{OptionSources, Schema, Directive, validate};
//!
//! let options = OptionSources::new()
//!     .file("server.toml")
//!     .optional_file("server.local.toml")
//!     .env_prefix("SERVER")
//!     .load()?;
//!
//! let schema = Schema::new().option("port", Directive::new().required());
//! let options = validate(&options, &schema)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::PathBuf;

use config_crate::{Config, Environment, File};

use crate::error::Result;
use crate::options::OptionList;
use crate::spec::Spec;

/// One config file in the stack
#[derive(Debug, Clone)]
struct FileSource {
    path: PathBuf,
    required: bool,
}

/// An ordered stack of option sources
#[derive(Debug, Clone)]
pub struct OptionSources {
    files: Vec<FileSource>,
    env_prefix: Option<String>,
    separator: String,
}

impl Default for OptionSources {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            env_prefix: None,
            separator: default_separator(),
        }
    }
}

fn default_separator() -> String {
    "__".to_string()
}

impl OptionSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a config file that must exist
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileSource {
            path: path.into(),
            required: true,
        });
        self
    }

    /// Add a config file that is skipped when absent
    pub fn optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileSource {
            path: path.into(),
            required: false,
        });
        self
    }

    /// Read `PREFIX_*` environment variables last
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Separator for nested environment keys (default `__`)
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Merge every source into one option list. Keys come back lowercased.
    pub fn load(&self) -> Result<OptionList> {
        let mut builder = Config::builder();

        for source in &self.files {
            tracing::debug!(
                path = %source.path.display(),
                required = source.required,
                "adding option file"
            );
            builder = builder
                .add_source(File::from(source.path.as_path()).required(source.required));
        }

        if let Some(prefix) = &self.env_prefix {
            tracing::debug!(prefix = %prefix, "adding option environment");
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator(&self.separator)
                    .try_parsing(true),
            );
        }

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Like [`load`](Self::load), but keys that match a declared key of
    /// `spec` ignoring case take the declared spelling. When several declared
    /// keys differ only by case, the first declared one is used.
    pub fn load_for(&self, spec: &Spec) -> Result<OptionList> {
        let loaded = self.load()?;
        Ok(loaded
            .into_iter()
            .map(|(key, value)| (declared_spelling(spec, key), value))
            .collect())
    }
}

fn declared_spelling(spec: &Spec, key: String) -> String {
    if spec.contains_key(&key) {
        return key;
    }
    spec.keys()
        .iter()
        .find(|declared| declared.to_lowercase() == key)
        .cloned()
        .unwrap_or(key)
}
