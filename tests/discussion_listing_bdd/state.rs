//! Scenario state for the discussion listing BDD tests.

use palaver::ToolOutcome;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::runtime::{SharedRuntime, start_runtime_and_server};

#[derive(ScenarioState, Default)]
pub(crate) struct ListingState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) outcome: Slot<ToolOutcome>,
}

/// Ensures the runtime and server are initialised in `ListingState`.
pub(crate) fn ensure_runtime_and_server(listing_state: &ListingState) -> SharedRuntime {
    start_runtime_and_server(&listing_state.runtime, &listing_state.server)
}
