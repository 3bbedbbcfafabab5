//! Support modules for the discussion listing BDD tests.

pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use harness::{
    dated_rest_page, graphql_listing, mount, rest_page, run_listing_tool, with_server,
};
pub(crate) use state::{ListingState, ensure_runtime_and_server};
