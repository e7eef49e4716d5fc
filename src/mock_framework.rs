//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_create`] to answer requests by hand.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

type Responder<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// The test plays the actor: it reads each request off `receiver`, checks it,
/// and answers through the request's oneshot sender.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<Responder<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CatalogClient;
    use crate::domain::{Product, ProductCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = CatalogClient::new(inner);

        let create_client = client.clone();
        let create_task = tokio::spawn(async move {
            create_client.create_product(ProductCreate::new("Mouse", 29.99)).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Mouse");
        responder.send(Ok("product_1".to_string())).unwrap();
        assert_eq!(create_task.await.unwrap(), Ok("product_1".to_string()));

        let list_task = tokio::spawn(async move { client.list_products().await });
        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Ok(vec![Product::new("product_1", "Mouse", 29.99)])).unwrap();
        assert_eq!(list_task.await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_actor_failure_surfaces_as_communication_error() {
        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = CatalogClient::new(inner);

        let task = tokio::spawn(async move { client.price_of("1").await });
        let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get request");
        drop(responder);

        assert!(matches!(
            task.await.unwrap(),
            Err(crate::catalog::CatalogError::ActorCommunicationError(_))
        ));
    }
}
