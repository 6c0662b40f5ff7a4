//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.reviewdoc.toml` in the workspace root
//! 4. `~/.config/reviewdoc/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing {field}: set it in {file} or via {env}")]
    Missing {
        field: &'static str,
        file: &'static str,
        env: &'static str,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gitlab: GitlabConfig,
    pub jira: JiraConfig,
    pub render: RenderConfig,
}

/// GitLab connection and provider labels.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitlabConfig {
    /// Host name; the API lives at `https://<domain>/api/v4`.
    pub domain: String,
    /// Full API base URL, overriding `domain`.
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub title: String,
    pub display: String,
}

impl std::fmt::Debug for GitlabConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitlabConfig")
            .field("domain", &self.domain)
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("title", &self.title)
            .field("display", &self.display)
            .finish()
    }
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            domain: constants::DEFAULT_GITLAB_DOMAIN.to_string(),
            base_url: None,
            token: None,
            title: "gitlab_mr".to_string(),
            display: "GitLab MR Comments".to_string(),
        }
    }
}

impl GitlabConfig {
    /// API base URL without a trailing slash.
    pub fn api_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}/api/v4", self.domain.trim_end_matches('/')),
        }
    }

    /// The configured token, or a [`ConfigError::Missing`].
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::Missing {
            field: "gitlab.token",
            file: constants::CONFIG_FILENAME,
            env: constants::ENV_GITLAB_TOKEN,
        })
    }
}

/// Jira connection, listing query, and provider labels.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraConfig {
    /// Instance root, e.g. `https://acme.atlassian.net`.
    pub instance: Option<String>,
    pub email: Option<String>,
    pub token: Option<String>,
    /// JQL for the candidate-issue listing.
    pub issue_query: Option<String>,
    pub title: String,
    pub display: String,
}

impl std::fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraConfig")
            .field("instance", &self.instance)
            .field("email", &self.email)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("issue_query", &self.issue_query)
            .field("title", &self.title)
            .field("display", &self.display)
            .finish()
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            instance: None,
            email: None,
            token: None,
            issue_query: None,
            title: "jira".to_string(),
            display: "Jira".to_string(),
        }
    }
}

impl JiraConfig {
    /// REST API base URL (`<instance>/rest/api/3`).
    pub fn api_url(&self) -> Result<String, ConfigError> {
        let instance = self.instance.as_deref().ok_or(ConfigError::Missing {
            field: "jira.instance",
            file: constants::CONFIG_FILENAME,
            env: constants::ENV_JIRA_INSTANCE,
        })?;
        Ok(format!("{}/rest/api/3", instance.trim_end_matches('/')))
    }

    /// The `(email, token)` basic-auth pair.
    pub fn credentials(&self) -> Result<(&str, &str), ConfigError> {
        let email = self.email.as_deref().ok_or(ConfigError::Missing {
            field: "jira.email",
            file: constants::CONFIG_FILENAME,
            env: constants::ENV_JIRA_EMAIL,
        })?;
        let token = self.token.as_deref().ok_or(ConfigError::Missing {
            field: "jira.token",
            file: constants::CONFIG_FILENAME,
            env: constants::ENV_JIRA_TOKEN,
        })?;
        Ok((email, token))
    }

    /// The listing query, falling back to the built-in default.
    pub fn query(&self) -> &str {
        self.issue_query
            .as_deref()
            .unwrap_or(constants::DEFAULT_ISSUE_QUERY)
    }
}

/// Rendering options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Embed the commented source range under each anchored comment.
    /// `None` when no layer set it.
    pub snippets: Option<bool>,
}

impl RenderConfig {
    pub fn snippets(&self) -> bool {
        self.snippets.unwrap_or(false)
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, workspace-local config, then applies
    /// environment variable overrides.
    pub fn load(workspace_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: workspace-local config
        if let Some(root) = workspace_root {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_gitlab = GitlabConfig::default();
        if other.gitlab.domain != default_gitlab.domain {
            self.gitlab.domain = other.gitlab.domain;
        }
        if other.gitlab.base_url.is_some() {
            self.gitlab.base_url = other.gitlab.base_url;
        }
        if other.gitlab.token.is_some() {
            self.gitlab.token = other.gitlab.token;
        }
        if other.gitlab.title != default_gitlab.title {
            self.gitlab.title = other.gitlab.title;
        }
        if other.gitlab.display != default_gitlab.display {
            self.gitlab.display = other.gitlab.display;
        }

        let default_jira = JiraConfig::default();
        if other.jira.instance.is_some() {
            self.jira.instance = other.jira.instance;
        }
        if other.jira.email.is_some() {
            self.jira.email = other.jira.email;
        }
        if other.jira.token.is_some() {
            self.jira.token = other.jira.token;
        }
        if other.jira.issue_query.is_some() {
            self.jira.issue_query = other.jira.issue_query;
        }
        if other.jira.title != default_jira.title {
            self.jira.title = other.jira.title;
        }
        if other.jira.display != default_jira.display {
            self.jira.display = other.jira.display;
        }

        if other.render.snippets.is_some() {
            self.render.snippets = other.render.snippets;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(token) =
            env.first_of(&[constants::ENV_GITLAB_TOKEN, constants::ENV_GITLAB_TOKEN_FALLBACK])
        {
            self.gitlab.token = Some(token);
        }
        if let Some(domain) = env.first_of(&[constants::ENV_GITLAB_DOMAIN]) {
            self.gitlab.domain = domain;
        }
        if let Some(url) = env.first_of(&[constants::ENV_GITLAB_URL]) {
            self.gitlab.base_url = Some(url);
        }

        if let Some(instance) = env.first_of(&[constants::ENV_JIRA_INSTANCE]) {
            self.jira.instance = Some(instance);
        }
        if let Some(email) = env.first_of(&[constants::ENV_JIRA_EMAIL]) {
            self.jira.email = Some(email);
        }
        if let Some(token) =
            env.first_of(&[constants::ENV_JIRA_TOKEN, constants::ENV_JIRA_TOKEN_FALLBACK])
        {
            self.jira.token = Some(token);
        }
        if let Some(query) = env.first_of(&[constants::ENV_JIRA_QUERY]) {
            self.jira.issue_query = Some(query);
        }

        if let Ok(val) = env.var(constants::ENV_SNIPPETS) {
            match val.to_lowercase().as_str() {
                "false" | "0" | "no" | "off" => self.render.snippets = Some(false),
                "true" | "1" | "yes" | "on" => self.render.snippets = Some(true),
                _ => tracing::warn!("ignoring invalid {} value: {val}", constants::ENV_SNIPPETS),
            }
        }
    }
}
