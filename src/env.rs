//! Process environment lookups.
//!
//! Config loading reads credentials and overrides through [`Env`] so that
//! tests can supply a fixed variable table instead of mutating the real
//! process environment.

use std::collections::HashMap;

/// Environment variable reader: the process environment or a fixed table.
#[derive(Clone, Debug)]
pub struct Env {
    table: Option<HashMap<String, String>>,
}

impl Env {
    pub fn real() -> Self {
        Self { table: None }
    }

    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            table: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.table {
            Some(table) => table.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// The first non-blank value among `names`, trimmed.
    ///
    /// Credentials have a tool-specific name and a conventional fallback
    /// (`REVIEWDOC_GITLAB_TOKEN`, then `GITLAB_TOKEN`).
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| {
            self.var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}
