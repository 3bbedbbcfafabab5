//! Single tool invocation.

use palaver::{
    DiscussionError, DiscussionTools, OctocrabDiscussionGateway, PalaverConfig, ToolOutcome,
};
use tokio_util::sync::CancellationToken;

/// Runs the configured tool with the configured arguments.
///
/// Ctrl-C cancels the invocation between GitHub round trips.
///
/// # Errors
///
/// Returns [`DiscussionError::Configuration`] or a validation error when the
/// tool, token, or arguments are missing or malformed. Failures of the tool
/// itself are reported through the returned [`ToolOutcome`].
pub async fn run(config: &PalaverConfig) -> Result<ToolOutcome, DiscussionError> {
    let tool = config.require_tool()?;
    let arguments = config.parse_arguments()?;
    let token = config.resolve_token()?;
    let gateway = OctocrabDiscussionGateway::for_token(&token, &config.api_base)?;
    let tools = DiscussionTools::new(&gateway, &gateway);

    let cancel = CancellationToken::new();
    let watcher = spawn_interrupt_watcher(cancel.clone());
    let outcome = tools.call(tool.as_str(), arguments, &cancel).await;
    watcher.abort();

    Ok(outcome)
}

fn spawn_interrupt_watcher(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received; cancelling after the current request");
            cancel.cancel();
        }
    })
}
