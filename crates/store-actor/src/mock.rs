//! # Mock Clients
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered
//! from a queue of expectations instead of by an actor. It is the tool for testing
//! an actor whose `on_create` calls other actors: mock the dependencies, run the
//! real actor under test.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | none, answers are scripted | real store |
//! | Error injection | `return_err(...)` | needs a failing setup |
//! | Use case | isolating a dependency | the actor under test, full-system tests |
//!
//! ```rust
//! use async_trait::async_trait;
//! use store_actor::mock::MockClient;
//! use store_actor::{ActorEntity, FrameworkError};
//!
//! #[derive(Clone, Debug)]
//! struct Venue {
//!     id: u32,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("venue error")]
//! struct VenueError;
//!
//! #[async_trait]
//! impl ActorEntity for Venue {
//!     type Id = u32;
//!     type Create = ();
//!     type Update = ();
//!     type Filter = ();
//!     type Context = ();
//!     type Error = VenueError;
//!
//!     fn from_create_params(id: u32, _: ()) -> Result<Self, VenueError> {
//!         Ok(Self { id })
//!     }
//!     fn matches(&self, _: &()) -> bool {
//!         true
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), VenueError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Venue>::new();
//!     mock.expect_get(1).return_ok(Some(Venue { id: 1 }));
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().id, 1);
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For lower-level assertions on the raw request stream, [`create_mock_client`]
//! returns a client and the receiving end of its channel; the `expect_*` helpers
//! pop and destructure the next request.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Reset {
        response: Result<usize, FrameworkError>,
    },
}

type ExpectationQueue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &ExpectationQueue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered. A request that
/// does not match the next expectation panics the mock task, which surfaces in
/// the test as `ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: ExpectationQueue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: ExpectationQueue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Reset { respond_to }, Some(Expectation::Reset { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
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

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_create(&mut self) -> ResponseBuilder<T, T> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Create {
            response,
        })
    }

    pub fn expect_list(&mut self) -> ResponseBuilder<T, Vec<T>> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::List {
            response,
        })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ResponseBuilder<T, T> {
        ResponseBuilder::new(self.expectations.clone(), move |response| {
            Expectation::Update { id, response }
        })
    }

    pub fn expect_reset(&mut self) -> ResponseBuilder<T, usize> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Reset {
            response,
        })
    }

    /// Panics if any registered expectation was never consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: ExpectationQueue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for expectations whose only parameter is the response.
pub struct ResponseBuilder<T: ActorEntity, R> {
    expectations: ExpectationQueue<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ResponseBuilder<T, R> {
    fn new(
        expectations: ExpectationQueue<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.expectations).push_back(expectation);
    }

    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.make)(Err(error));
        lock(&self.expectations).push_back(expectation);
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// Useful when a test wants to inspect the payload a client sends and answer it by
/// hand. [`MockClient`] is the more fluent option.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Pops the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Update,
    oneshot::Sender<Result<T, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Dish {
        id: u32,
        name: String,
        price: f64,
    }

    #[derive(Debug)]
    struct DishCreate {
        name: String,
        price: f64,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Dish error")]
    struct DishError;

    #[async_trait]
    impl ActorEntity for Dish {
        type Id = u32;
        type Create = DishCreate;
        type Update = f64;
        type Filter = ();
        type Context = ();
        type Error = DishError;

        fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
                price: params.price,
            })
        }

        fn matches(&self, _filter: &()) -> bool {
            true
        }

        async fn on_update(&mut self, price: f64, _ctx: &()) -> Result<(), Self::Error> {
            self.price = price;
            Ok(())
        }
    }

    fn soup(id: u32) -> Dish {
        Dish {
            id,
            name: "Soup".to_string(),
            price: 5.0,
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(DishCreate {
                    name: "Soup".to_string(),
                    price: 5.0,
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Soup");
        responder.send(Ok(soup(1))).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(dish) if dish.id == 1));
    }

    #[tokio::test]
    async fn test_raw_update_request() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);

        let update_task = tokio::spawn(async move { client.update(3, 7.5).await });

        let (id, price, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, 3);
        assert_eq!(price, 7.5);
        responder
            .send(Err(FrameworkError::NotFound("3".to_string())))
            .unwrap();

        let result = update_task.await.unwrap();
        assert!(matches!(result, Err(FrameworkError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Dish>::new();

        mock.expect_create().return_ok(soup(1));
        mock.expect_get(1).return_ok(Some(soup(1)));
        mock.expect_list().return_ok(vec![soup(1)]);
        mock.expect_reset().return_ok(1);

        let client = mock.client();

        let created = client
            .create(DishCreate {
                name: "Soup".to_string(),
                price: 5.0,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched, Some(soup(1)));

        assert_eq!(client.list(()).await.unwrap().len(), 1);
        assert_eq!(client.reset().await.unwrap(), 1);

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_update(1).return_ok(soup(1));
        mock.verify();
    }
}
