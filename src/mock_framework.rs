//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_action`] to assert behavior
//! and answer on the returned responder.

use tokio::sync::{mpsc, oneshot};
use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::clients::SeatClient;
use crate::messages::SeatRequest;

type Responder<R, E> = oneshot::Sender<Result<R, FrameworkError<E>>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// No `ResourceActor` runs behind the client; the test plays the actor by
/// reading requests off the receiver and answering them.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Same idea for the message-enum seat registry service.
pub fn create_mock_seat_client(buffer_size: usize) -> (SeatClient, mpsc::Receiver<SeatRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SeatClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Responder<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Responder<Vec<T>, T::Error>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<(), T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CustomerClient;
    use crate::customer_actor::CustomerError;
    use crate::domain::{Customer, CustomerCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Customer>(10);
        let client = CustomerClient::new(inner);

        let create_task = tokio::spawn(async move {
            client.register_customer(CustomerCreate::new("赵敏", "13700000000")).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "赵敏");
        responder.send(Ok("customer_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("customer_1".to_string()));
    }

    #[tokio::test]
    async fn test_mock_rejection_surfaces_domain_error() {
        let (inner, mut receiver) = create_mock_client::<Customer>(10);
        let client = CustomerClient::new(inner);

        let create_task = tokio::spawn(async move { client.register_customer(CustomerCreate::new("", "1")).await });

        let (_, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        let rejection = CustomerError::ValidationError("name must not be blank".into());
        responder.send(Err(FrameworkError::Domain(rejection.clone()))).unwrap();

        assert_eq!(create_task.await.unwrap(), Err(rejection));
    }
}
