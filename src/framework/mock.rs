//! # Mock Sources & Testing Guide
//!
//! `MockSource<T>` implements [`CollectionSource`] entirely in memory. Each call to
//! `fetch()` consumes the next queued expectation, which lets a test script exactly what
//! the "server" answers, and in which order, without any HTTP.
//!
//! ## When to use Mocks vs a Real Server
//!
//! | Feature | MockSource | Local HTTP server |
//! |---------|------------|-------------------|
//! | **Speed** | Instant (in-memory) | Fast (binds a socket) |
//! | **Determinism** | Fully scripted, including resolution order | Subject to scheduler |
//! | **Use Case** | View-model lifecycle, retries, stale responses | Status / JSON error mapping |
//! | **Error Injection** | `return_err` | Route returning a status |
//!
//! ## Example
//!
//! ```text
//! let mut mock = MockSource::<Restaurant>::new();
//! mock.expect_fetch().return_err(FetchError::HttpStatus { status: 500, body: String::new() });
//! mock.expect_fetch().return_ok(vec![raw_restaurant]);
//!
//! let (actor, client) = ViewModelActor::new(mock.source(), options);
//! tokio::spawn(actor.run(context));
//! // ... drive the client ...
//! mock.verify(); // every queued answer was consumed
//! ```
//!
//! ## Racing Fetches
//!
//! [`FetchExpectationBuilder::return_when_released`] queues an answer that is held back
//! until the test sends it through the returned [`Release`] handle. Two gated
//! expectations released in reverse order reproduce an out-of-order resolution.

use crate::framework::entity::CollectionEntity;
use crate::framework::error::FetchError;
use crate::framework::source::CollectionSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

type FetchResult<T> = Result<Vec<<T as CollectionEntity>::Raw>, FetchError>;

/// One queued answer.
enum Expectation<T: CollectionEntity> {
    Ready(FetchResult<T>),
    Gated(oneshot::Receiver<FetchResult<T>>),
}

struct Shared<T: CollectionEntity> {
    expectations: Mutex<VecDeque<Expectation<T>>>,
    calls: AtomicUsize,
}

/// A scripted source with expectation tracking for fluent testing.
pub struct MockSource<T: CollectionEntity> {
    shared: Arc<Shared<T>>,
}

impl<T: CollectionEntity> Default for MockSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CollectionEntity> MockSource<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                expectations: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Returns the source to hand to a view-model.
    pub fn source(&self) -> Arc<dyn CollectionSource<T>> {
        Arc::new(MockSourceHandle {
            shared: Arc::clone(&self.shared),
        })
    }

    /// Queues the answer for the next `fetch()`.
    pub fn expect_fetch(&mut self) -> FetchExpectationBuilder<T> {
        FetchExpectationBuilder {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of `fetch()` calls seen so far.
    pub fn calls(&self) -> usize {
        self.shared.calls.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were consumed.
    pub fn verify(&self) {
        let remaining = self.shared.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for `fetch` expectations.
pub struct FetchExpectationBuilder<T: CollectionEntity> {
    shared: Arc<Shared<T>>,
}

impl<T: CollectionEntity> FetchExpectationBuilder<T> {
    /// Answer with these raw records.
    pub fn return_ok(self, raws: Vec<T::Raw>) {
        self.push(Expectation::Ready(Ok(raws)));
    }

    /// Answer with an error.
    pub fn return_err(self, error: FetchError) {
        self.push(Expectation::Ready(Err(error)));
    }

    /// Hold the answer back until the returned handle is released.
    pub fn return_when_released(self) -> Release<T> {
        let (sender, receiver) = oneshot::channel();
        self.push(Expectation::Gated(receiver));
        Release { sender }
    }

    fn push(self, expectation: Expectation<T>) {
        self.shared
            .expectations
            .lock()
            .unwrap()
            .push_back(expectation);
    }
}

/// Releases a gated answer.
pub struct Release<T: CollectionEntity> {
    sender: oneshot::Sender<FetchResult<T>>,
}

impl<T: CollectionEntity> Release<T> {
    pub fn ok(self, raws: Vec<T::Raw>) {
        let _ = self.sender.send(Ok(raws));
    }

    pub fn err(self, error: FetchError) {
        let _ = self.sender.send(Err(error));
    }
}

struct MockSourceHandle<T: CollectionEntity> {
    shared: Arc<Shared<T>>,
}

#[async_trait]
impl<T: CollectionEntity> CollectionSource<T> for MockSourceHandle<T> {
    async fn fetch(&self) -> Result<Vec<T::Raw>, FetchError> {
        self.shared.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.shared.expectations.lock().unwrap().pop_front();
        match next {
            Some(Expectation::Ready(result)) => result,
            Some(Expectation::Gated(receiver)) => match receiver.await {
                Ok(result) => result,
                Err(_) => panic!("Gated expectation dropped without being released"),
            },
            None => panic!("Unexpected fetch: no expectation queued"),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
