//! # Mock Clients
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations instead of a store. Use it to test an actor whose `Context` holds
//! another resource's client without standing up that second actor.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **Store** | none | SQLite file |
//! | **Answers** | scripted, in order | computed |
//! | **Error injection** | `return_err` | needs a broken store |
//!
//! ```rust,ignore
//! let mut products = MockClient::<Product>::new();
//! products.expect_action().return_ok(ProductActionResult::FirstEligible(None));
//!
//! let (actor, rentals) = rental_actor::new(store, 8);
//! tokio::spawn(actor.run(RentalContext::new(ProductClient::new(products.client()))));
//! // booking now fails with NoAvailableProduct
//! products.verify();
//! ```
//!
//! For finer control, [`create_mock_client`] returns the raw receiver so a test can inspect
//! each request and answer it by hand.

use crate::client::ResourceClient;
use crate::entity::PersistentEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A scripted answer for one request.
enum Expectation<T: PersistentEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: PersistentEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "Get",
            Expectation::Create(_) => "Create",
            Expectation::List(_) => "List",
            Expectation::Update(_) => "Update",
            Expectation::Delete(_) => "Delete",
            Expectation::Action(_) => "Action",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking.
///
/// Expectations are consumed in the order they were registered. A request that does not
/// match the next expectation panics the mock task, which the caller observes as
/// [`FrameworkError::ActorDropped`].
pub struct MockClient<T: PersistentEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: PersistentEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PersistentEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("mock queue poisoned").pop_front();
                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, next) => {
                        panic!(
                            "Unexpected request {:?}, expected {}",
                            request,
                            next.as_ref().map(Expectation::kind).unwrap_or("nothing")
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .expect("mock queue poisoned")
            .push_back(expectation);
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Expectation::Get)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, Expectation::Create)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, Expectation::List)
    }

    pub fn expect_update(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Update)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, Expectation::Delete)
    }

    pub fn expect_action(&mut self) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, Expectation::Action)
    }

    /// Panics unless every registered expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("mock queue poisoned");
        if !remaining.is_empty() {
            panic!("Not all expectations were met. {} remaining", remaining.len());
        }
    }
}

/// Completes an expectation with either a value or an error.
pub struct ExpectationBuilder<'m, T: PersistentEntity, R> {
    mock: &'m MockClient<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<'m, T: PersistentEntity, R> ExpectationBuilder<'m, T, R> {
    fn new(mock: &'m MockClient<T>, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> Self {
        Self { mock, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: PersistentEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: PersistentEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `List`.
pub async fn expect_list<T: PersistentEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}
