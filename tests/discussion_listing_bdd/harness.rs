//! Mock payload builders and tool execution for the discussion listing BDD
//! tests.

use palaver::{DiscussionTools, OctocrabDiscussionGateway, PersonalAccessToken};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::{Mock, MockServer};

use super::state::{ListingState, ensure_runtime_and_server};

/// Builds a GraphQL discussion-listing response for `(number, createdAt)`
/// pairs.
pub(crate) fn graphql_listing(discussions: &[(u64, &str)], category_id: &str) -> Value {
    let nodes: Vec<Value> = discussions
        .iter()
        .map(|(number, created_at)| {
            json!({
                "number": number,
                "title": format!("Discussion {number}"),
                "createdAt": created_at,
                "url": format!("https://github.com/owner/repo/discussions/{number}"),
                "closed": false,
                "category": { "id": category_id, "name": "General" },
                "labels": { "nodes": [] }
            })
        })
        .collect();

    json!({
        "data": {
            "repository": {
                "discussions": {
                    "nodes": nodes,
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                }
            }
        }
    })
}

/// Builds one REST page of open discussions; even numbers carry `bug`.
pub(crate) fn rest_page(numbers: std::ops::RangeInclusive<u64>) -> Value {
    let items: Vec<Value> = numbers
        .map(|number| {
            let labels = if number % 2 == 0 {
                json!([{ "name": "bug" }])
            } else {
                json!([])
            };
            json!({
                "number": number,
                "title": format!("Discussion {number}"),
                "state": "open",
                "created_at": "2023-01-01T00:00:00Z",
                "html_url": format!("https://github.com/owner/repo/discussions/{number}"),
                "labels": labels
            })
        })
        .collect();
    Value::Array(items)
}

/// Builds one REST page of open, unlabelled discussions from
/// `(number, created_at)` pairs.
pub(crate) fn dated_rest_page(discussions: &[(u64, &str)]) -> Value {
    let items: Vec<Value> = discussions
        .iter()
        .map(|(number, created_at)| {
            json!({
                "number": number,
                "title": format!("Discussion {number}"),
                "state": "open",
                "created_at": created_at,
                "html_url": format!("https://github.com/owner/repo/discussions/{number}"),
                "labels": []
            })
        })
        .collect();
    Value::Array(items)
}

/// Runs `action` against the scenario's mock server.
///
/// # Panics
///
/// Panics when the mock server has not been started.
pub(crate) fn with_server<T>(
    listing_state: &ListingState,
    action: impl FnOnce(&MockServer) -> T,
) -> T {
    listing_state
        .server
        .with_ref(action)
        .unwrap_or_else(|| panic!("mock server not initialised"))
}

/// Mounts `mock` on the scenario's server.
pub(crate) fn mount(listing_state: &ListingState, mock: Mock) {
    let runtime = ensure_runtime_and_server(listing_state);
    with_server(listing_state, |server| runtime.block_on(mock.mount(server)));
}

/// Runs `list_discussions` for `owner/repo` with extra JSON `arguments` and
/// stores the outcome in the scenario state.
///
/// # Panics
///
/// Panics when the arguments are not a JSON object or the gateway cannot be
/// built.
pub(crate) fn run_listing_tool(listing_state: &ListingState, arguments: &str) {
    let runtime = ensure_runtime_and_server(listing_state);
    let api_base = with_server(listing_state, |server| format!("{}/api/v3", server.uri()));

    let mut parsed: Value = serde_json::from_str(arguments)
        .unwrap_or_else(|error| panic!("invalid step arguments {arguments}: {error}"));
    let Some(object) = parsed.as_object_mut() else {
        panic!("step arguments must be a JSON object: {arguments}");
    };
    object.insert("owner".to_owned(), json!("owner"));
    object.insert("repo".to_owned(), json!("repo"));

    let outcome = runtime.block_on(async {
        let token = PersonalAccessToken::new("valid-token")
            .unwrap_or_else(|error| panic!("token should be valid: {error}"));
        let gateway = OctocrabDiscussionGateway::for_token(&token, &api_base)
            .unwrap_or_else(|error| panic!("gateway should build: {error}"));
        let tools = DiscussionTools::new(&gateway, &gateway);
        tools
            .call("list_discussions", parsed, &CancellationToken::new())
            .await
    });
    listing_state.outcome.set(outcome);
}
