//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.palaver.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PALAVER_TOKEN`, `PALAVER_API_BASE`,
//!    `PALAVER_TOOL`, `PALAVER_ARGUMENTS`, or legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--api-base`/`-b`,
//!    `--tool`/`-n`, and `--arguments`/`-a`
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! api_base = "https://ghe.example.com/api/v3"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::github::error::DiscussionError;
use crate::github::locator::PersonalAccessToken;
use crate::tools::ToolName;

/// Public GitHub REST and GraphQL endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use palaver::PalaverConfig;
///
/// let config = PalaverConfig::load().expect("failed to load configuration");
/// let tool = config.require_tool().expect("tool name required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PALAVER",
    discovery(
        dotfile_name = ".palaver.toml",
        config_file_name = "palaver.toml",
        app_name = "palaver"
    )
)]
pub struct PalaverConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PALAVER_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// API base URL, overridden for GitHub Enterprise installations.
    ///
    /// Defaults to `https://api.github.com`.
    #[ortho_config(cli_short = 'b')]
    pub api_base: String,

    /// Name of the tool to invoke, such as `list_discussions`.
    #[ortho_config(cli_short = 'n')]
    pub tool: Option<String>,

    /// Tool arguments as a JSON object string.
    #[ortho_config(cli_short = 'a')]
    pub arguments: Option<String>,
}

impl Default for PalaverConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: DEFAULT_API_BASE.to_owned(),
            tool: None,
            arguments: None,
        }
    }
}

impl PalaverConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, DiscussionError> {
        let value = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(DiscussionError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Returns the requested tool.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::Configuration`] when no tool is configured
    /// and [`DiscussionError::InvalidArgument`] when the name is unknown.
    pub fn require_tool(&self) -> Result<ToolName, DiscussionError> {
        self.tool
            .as_deref()
            .ok_or_else(|| DiscussionError::Configuration {
                message: "tool name is required (use --tool or -n)".to_owned(),
            })?
            .parse()
    }

    /// Parses the tool arguments; absent arguments become an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::InvalidArgument`] when the string is not a
    /// JSON object.
    pub fn parse_arguments(&self) -> Result<Value, DiscussionError> {
        let Some(raw) = self.arguments.as_deref() else {
            return Ok(Value::Object(serde_json::Map::new()));
        };
        let parsed: Value = serde_json::from_str(raw).map_err(|error| {
            DiscussionError::invalid_argument(format!("arguments are not valid JSON: {error}"))
        })?;
        if parsed.is_object() {
            Ok(parsed)
        } else {
            Err(DiscussionError::invalid_argument(
                "arguments must be a JSON object",
            ))
        }
    }
}

#[cfg(test)]
mod tests;
