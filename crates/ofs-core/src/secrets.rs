//! # Explicit Secrets
//!
//! Secret values are passed into every execution call as an explicit
//! `Secrets` value. No part of the stack reads secret material from
//! ambient global scope, and the `Debug` impl redacts every value so a
//! stray log line cannot leak a key.

use std::collections::BTreeMap;
use std::fmt;

/// Designated secret key carrying a nested script payload.
///
/// When an outer script gates and runs an inner script, the inner source
/// text travels under this key while the expected digest rides in the
/// argument list.
pub const SRC_KEY: &str = "SRC_JS";

/// Key-value secret material for one execution.
///
/// Deliberately not serializable: secrets are assembled at the call site
/// (usually from the environment) and never written back out.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets(BTreeMap<String, String>);

impl Secrets {
    /// Empty secret set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a secret, returning `self` for chained construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a secret.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a secret by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of secrets held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no secrets are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collect secrets from environment variables starting with `prefix`.
    ///
    /// The prefix is stripped from the resulting keys, so with prefix
    /// `OFS_SECRET_` the variable `OFS_SECRET_API_KEY` becomes the secret
    /// `API_KEY`.
    pub fn from_env_prefix(prefix: &str) -> Self {
        let mut secrets = Self::new();
        for (key, value) in std::env::vars() {
            if let Some(stripped) = key.strip_prefix(prefix) {
                if !stripped.is_empty() {
                    secrets.insert(stripped, value);
                }
            }
        }
        secrets
    }
}

impl fmt::Debug for Secrets {
    /// Keys only; every value is redacted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in self.0.keys() {
            map.entry(key, &"***");
        }
        map.finish()
    }
}
