use std::fmt::{Debug, Display};
use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::gateway::{ApiGateway, ApiRequest};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any backend collection must implement to be served by [`ResourceClient`].
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Display + Debug + Clone + Send + Sync;
    type CreatePayload: Serialize + Debug + Send + Sync;
    type Patch: Serialize + Debug + Send + Sync;
    type Action: Debug + Send + Sync;

    /// Collection path, e.g. `/api/products`.
    const COLLECTION: &'static str;

    fn item_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }

    /// Maps a domain-specific action onto the request that performs it.
    fn action_request(id: &Self::Id, action: &Self::Action) -> ApiRequest;
}

// =============================================================================
// 2. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Resource> {
    gateway: ApiGateway,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self::new(self.gateway.clone())
    }
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(gateway: ApiGateway) -> Self {
        Self {
            gateway,
            _resource: PhantomData,
        }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    pub async fn list(&self) -> Result<Vec<T>, ApiError> {
        self.gateway.execute(ApiRequest::get(T::COLLECTION)).await?.decode()
    }

    /// Lists a sub-collection such as `/api/orders/my-orders`.
    pub async fn list_at(&self, segment: &str) -> Result<Vec<T>, ApiError> {
        let path = format!("{}/{}", T::COLLECTION, segment);
        self.gateway.execute(ApiRequest::get(path)).await?.decode()
    }

    pub async fn get(&self, id: T::Id) -> Result<T, ApiError> {
        self.gateway.execute(ApiRequest::get(T::item_path(&id))).await?.decode()
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::POST, T::COLLECTION).json(&payload)?;
        self.gateway.execute(request).await?.decode()
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, ApiError> {
        let request = ApiRequest::new(Method::PUT, T::item_path(&id)).json(&patch)?;
        self.gateway.execute(request).await?.decode()
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), ApiError> {
        self.gateway.execute(ApiRequest::delete(T::item_path(&id))).await?;
        Ok(())
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T, ApiError> {
        self.gateway
            .execute(T::action_request(&id, &action))
            .await?
            .decode()
    }
}

// =============================================================================
// 3. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Session;
    use crate::mock_framework::{create_mock_gateway, expect_request, respond_next};
    use reqwest::StatusCode;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Deserialize)]
    struct Note {
        id: u32,
        text: String,
        pinned: bool,
    }

    #[derive(Debug, Serialize)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug)]
    enum NoteAction {
        Pin,
    }

    impl Resource for Note {
        type Id = u32;
        type CreatePayload = NoteCreate;
        type Patch = NoteCreate;
        type Action = NoteAction;

        const COLLECTION: &'static str = "/api/notes";

        fn action_request(id: &u32, action: &NoteAction) -> ApiRequest {
            match action {
                NoteAction::Pin => ApiRequest::new(Method::POST, format!("/api/notes/{}/pin", id)),
            }
        }
    }

    #[tokio::test]
    async fn test_resource_client_routes() {
        let (gateway, mut requests) = create_mock_gateway(Session::anonymous());
        let client = ResourceClient::<Note>::new(gateway);

        let task = tokio::spawn(async move {
            let created = client.create(NoteCreate { text: "hi".to_string() }).await?;
            let pinned = client.perform_action(created.id, NoteAction::Pin).await?;
            client.delete(pinned.id).await?;
            Ok::<_, ApiError>(pinned)
        });

        let create = respond_next(&mut requests, StatusCode::CREATED, json!({"id": 4, "text": "hi", "pinned": false})).await;
        assert_eq!(create.method, Method::POST);
        assert_eq!(create.path, "/api/notes");
        assert_eq!(create.body, Some(json!({"text": "hi"})));

        let pin = respond_next(&mut requests, StatusCode::OK, json!({"id": 4, "text": "hi", "pinned": true})).await;
        assert_eq!(pin.path, "/api/notes/4/pin");

        let (delete, responder) = expect_request(&mut requests).await.expect("Expected delete");
        assert_eq!(delete.method, Method::DELETE);
        assert_eq!(delete.path, "/api/notes/4");
        responder
            .send(Ok(crate::gateway::ApiResponse::empty(StatusCode::NO_CONTENT)))
            .unwrap();

        let pinned = task.await.unwrap().unwrap();
        assert!(pinned.pinned);
    }

    #[tokio::test]
    async fn test_not_found_and_bad_body() {
        let (gateway, mut requests) = create_mock_gateway(Session::anonymous());
        let client = ResourceClient::<Note>::new(gateway);

        let task = tokio::spawn(async move { (client.get(9).await, client.list().await) });

        respond_next(&mut requests, StatusCode::NOT_FOUND, json!({"message": "Note 9 not found"})).await;
        respond_next(&mut requests, StatusCode::OK, json!({"unexpected": true})).await;

        let (missing, listed) = task.await.unwrap();
        assert_eq!(
            missing,
            Err(ApiError::NotFound { message: Some("Note 9 not found".to_string()) })
        );
        assert!(matches!(listed, Err(ApiError::Decode(_))));
    }
}
