use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::auth::Credentials;
use crate::error::JenkinsError;

pub const DEFAULT_MAX_LOG_LINES: usize = 3000;
pub const DEFAULT_CONTEXT_LINES: usize = 5;
pub const DEFAULT_MAX_MATCHES: usize = 50;

const CONFIG_FILE_NAMES: [&str; 4] = [
    "jenkins-mcp.toml",
    "jenkins-mcp.json",
    "jenkins-mcp.yaml",
    "jenkins-mcp.yml",
];

/// Configuration file structure.
///
/// Every field is optional so a file can carry only the values that are not
/// supplied through the command line or the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub jenkins: JenkinsConfig,

    #[serde(default)]
    pub logs: LogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JenkinsConfig {
    /// Jenkins base URL, e.g. https://ci.example.com/
    pub url: Option<String>,

    /// Jenkins user name for Basic auth
    pub user: Option<String>,

    /// Jenkins API token paired with `user`
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LogConfig {
    /// Line ceiling above which console logs are truncated in the middle
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Lines of context around each console search match
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Maximum number of console search matches
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            context_lines: default_context_lines(),
            max_matches: default_max_matches(),
        }
    }
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_LOG_LINES
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES
}

/// Values taken from the command line or the environment. They win over the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub user: Option<String>,
    pub api_token: Option<String>,
}

/// Bounds applied by the console log tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLimits {
    pub max_lines: usize,
    pub context_lines: usize,
    pub max_matches: usize,
}

impl Default for LogLimits {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LOG_LINES,
            context_lines: DEFAULT_CONTEXT_LINES,
            max_matches: DEFAULT_MAX_MATCHES,
        }
    }
}

/// Immutable settings handed to the Jenkins client at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub credentials: Option<Credentials>,
    pub logs: LogLimits,
}

impl ClientConfig {
    /// Builds a client configuration for `base_url` with default log limits.
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> crate::error::Result<Self> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            base_url,
            credentials,
            logs: LogLimits::default(),
        })
    }
}

fn parse_base_url(raw: &str) -> crate::error::Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(JenkinsError::MissingConfig("JENKINS_URL".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| JenkinsError::InvalidConfig(format!("JENKINS_URL '{trimmed}': {e}")))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(JenkinsError::InvalidConfig(format!(
            "JENKINS_URL '{trimmed}' must be an http(s) URL"
        )));
    }

    Ok(url)
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./jenkins-mcp.{toml,json,yaml,yml}
    /// 3. <user config dir>/jenkins-mcp/jenkins-mcp.{toml,json,yaml,yml}
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                return Self::load_from_path(&candidate);
            }
        }

        Ok(Self::default())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = CONFIG_FILE_NAMES.iter().map(PathBuf::from).collect();

        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("jenkins-mcp");
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| app_dir.join(name)));
        }

        candidates
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }

    /// Merges command-line and environment overrides into this file
    /// configuration and validates the result.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfig` when no Jenkins URL is available and
    /// `InvalidConfig` when the URL cannot be parsed.
    pub fn resolve(self, overrides: Overrides) -> crate::error::Result<ClientConfig> {
        let url = overrides
            .url
            .or(self.jenkins.url)
            .ok_or_else(|| JenkinsError::MissingConfig("JENKINS_URL".to_string()))?;

        let user = overrides.user.or(self.jenkins.user);
        let api_token = overrides.api_token.or(self.jenkins.api_token);
        let credentials = Credentials::from_parts(user.as_deref(), api_token.as_deref());

        if credentials.is_none() {
            warn!(
                "JENKINS_USER and JENKINS_API_TOKEN are not both set; using anonymous access"
            );
        }

        let mut config = ClientConfig::new(&url, credentials)?;
        config.logs = LogLimits {
            max_lines: self.logs.max_lines.max(2),
            context_lines: self.logs.context_lines,
            max_matches: self.logs.max_matches.max(1),
        };

        Ok(config)
    }
}
