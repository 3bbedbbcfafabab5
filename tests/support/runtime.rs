//! Tokio runtime and mock server bootstrap shared by behavioural tests.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Runtime handle that can be stored in an `rstest-bdd` [`Slot`].
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    /// Wraps a freshly built runtime.
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    /// Drives `future` to completion on the shared runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Starts the runtime and mock server on first use and returns the runtime.
///
/// # Panics
///
/// Panics when the Tokio runtime cannot be built.
pub fn start_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> SharedRuntime {
    let shared = runtime.get().unwrap_or_else(|| {
        let built = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        let created = SharedRuntime::new(built);
        runtime.set(created.clone());
        created
    });

    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }

    shared
}
