//! Unit tests for configuration loading and precedence.

use std::ffi::OsString;

use ortho_config::{MergeComposer, OrthoConfig};
use rstest::rstest;
use serde_json::{Value, json};

use super::{DEFAULT_API_BASE, PalaverConfig};
use crate::github::error::DiscussionError;
use crate::tools::ToolName;

/// Applies a configuration layer to the composer based on the layer type.
fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"api_base": DEFAULT_API_BASE})), ("file", json!({"api_base": "https://ghe.example.com/api/v3"}))],
    "api_base",
    "https://ghe.example.com/api/v3",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"tool": "get_discussion"})), ("cli", json!({"tool": "list_discussions"}))],
    "tool",
    "list_discussions",
    "CLI should override environment"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }

    let config = PalaverConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    let actual = match field {
        "api_base" => Some(config.api_base.as_str()),
        "token" => config.token.as_deref(),
        "tool" => config.tool.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let mut composer = MergeComposer::new();
    composer.push_defaults(json!({"token": "default-token", "tool": "list_discussions"}));
    composer.push_cli(json!({"tool": "get_discussion"}));

    let config = PalaverConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    assert_eq!(config.tool.as_deref(), Some("get_discussion"));
    assert_eq!(
        config.token.as_deref(),
        Some("default-token"),
        "default token should be preserved"
    );
}

/// Loads configuration from `cli_args` with the environment and home
/// directory isolated from the host.
fn load_with_cli(cli_args: &[&str]) -> PalaverConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();

    let _guard = env_lock::lock_env([
        ("PALAVER_TOKEN", None),
        ("PALAVER_API_BASE", None),
        ("PALAVER_TOOL", None),
        ("PALAVER_ARGUMENTS", None),
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ]);

    let mut args: Vec<OsString> = vec![OsString::from("palaver")];
    args.extend(cli_args.iter().map(OsString::from));

    PalaverConfig::load_from_iter(args).expect("config should load")
}

#[rstest]
fn short_flags_populate_every_field() {
    let config = load_with_cli(&[
        "-t",
        "cli-token",
        "-b",
        "https://ghe.example.com/api/v3",
        "-n",
        "list_discussions",
        "-a",
        r#"{"owner":"o","repo":"r"}"#,
    ]);

    assert_eq!(config.token.as_deref(), Some("cli-token"));
    assert_eq!(config.api_base, "https://ghe.example.com/api/v3");
    assert_eq!(config.tool.as_deref(), Some("list_discussions"));
    assert_eq!(config.arguments.as_deref(), Some(r#"{"owner":"o","repo":"r"}"#));
}

#[rstest]
fn long_flags_populate_every_field() {
    let config = load_with_cli(&[
        "--api-base",
        "https://ghe.example.com/api/v3",
        "--tool",
        "get_discussion",
        "--arguments",
        "{}",
    ]);

    assert_eq!(config.api_base, "https://ghe.example.com/api/v3");
    assert_eq!(config.tool.as_deref(), Some("get_discussion"));
    assert_eq!(config.arguments.as_deref(), Some("{}"));
}

#[rstest]
fn missing_flags_keep_defaults() {
    let config = load_with_cli(&[]);

    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.tool, None);
}

#[rstest]
fn default_points_at_public_api() {
    assert_eq!(PalaverConfig::default().api_base, DEFAULT_API_BASE);
}

#[rstest]
fn resolve_token_prefers_configured_value() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);
    let config = PalaverConfig {
        token: Some("  my-token  ".to_owned()),
        ..PalaverConfig::default()
    };

    let token = config.resolve_token().expect("token should resolve");

    assert_eq!(token.value(), "my-token");
}

#[rstest]
fn resolve_token_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("legacy-token"))]);

    let token = PalaverConfig::default()
        .resolve_token()
        .expect("legacy token should resolve");

    assert_eq!(token.value(), "legacy-token");
}

#[rstest]
fn resolve_token_returns_error_when_none() {
    // Lock and clear GITHUB_TOKEN to ensure test isolation
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);

    let result = PalaverConfig::default().resolve_token();

    assert_eq!(result, Err(DiscussionError::MissingToken));
}

#[rstest]
#[case::present(Some("list_discussion_categories"), Ok(ToolName::ListDiscussionCategories))]
#[case::unknown(
    Some("close_discussion"),
    Err(DiscussionError::InvalidArgument { message: "unknown tool: close_discussion".to_owned() })
)]
#[case::missing(
    None,
    Err(DiscussionError::Configuration { message: "tool name is required (use --tool or -n)".to_owned() })
)]
fn require_tool_validates_name(
    #[case] tool: Option<&str>,
    #[case] expected: Result<ToolName, DiscussionError>,
) {
    let config = PalaverConfig {
        tool: tool.map(ToOwned::to_owned),
        ..PalaverConfig::default()
    };

    assert_eq!(config.require_tool(), expected);
}

#[rstest]
#[case::absent(None, Ok(json!({})))]
#[case::object(Some(r#"{"owner":"o","repo":"r"}"#), Ok(json!({"owner": "o", "repo": "r"})))]
fn parses_argument_objects(
    #[case] arguments: Option<&str>,
    #[case] expected: Result<Value, DiscussionError>,
) {
    let config = PalaverConfig {
        arguments: arguments.map(ToOwned::to_owned),
        ..PalaverConfig::default()
    };

    assert_eq!(config.parse_arguments(), expected);
}

#[rstest]
#[case::not_json("owner=o")]
#[case::array("[1, 2]")]
fn rejects_non_object_arguments(#[case] arguments: &str) {
    let config = PalaverConfig {
        arguments: Some(arguments.to_owned()),
        ..PalaverConfig::default()
    };

    let result = config.parse_arguments();

    assert!(
        matches!(result, Err(DiscussionError::InvalidArgument { .. })),
        "expected InvalidArgument, got {result:?}"
    );
}
