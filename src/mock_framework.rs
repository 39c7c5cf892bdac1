//! # Mock Framework
//!
//! Utilities for testing gateway and client logic without a backend.
//!
//! Use [`create_mock_transport`] to get a transport and a receiver. Each
//! request the gateway sends arrives on the receiver together with a
//! responder; [`expect_request`] pulls the next one so the test can assert on
//! it and answer with whatever status it wants to simulate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use tokio::sync::{mpsc, oneshot};

use crate::error::{ApiError, AuthError};
use crate::gateway::{ApiGateway, ApiRequest, ApiResponse, Session, TokenRefresher, TokenSet, Transport};

pub type Responder = oneshot::Sender<Result<ApiResponse, ApiError>>;

#[derive(Debug)]
pub struct MockRequest {
    pub request: ApiRequest,
    pub respond_to: Responder,
}

/// Transport that forwards every request to the test through a channel.
pub struct MockTransport {
    sender: mpsc::Sender<MockRequest>,
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> BoxFuture<'_, Result<ApiResponse, ApiError>> {
        Box::pin(async move {
            let (respond_to, response) = oneshot::channel();
            self.sender
                .send(MockRequest { request, respond_to })
                .await
                .map_err(|_| ApiError::Network("Mock transport closed".to_string()))?;
            response
                .await
                .map_err(|_| ApiError::Network("Mock responder dropped".to_string()))?
        })
    }
}

pub fn create_mock_transport(buffer_size: usize) -> (Arc<MockTransport>, mpsc::Receiver<MockRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(MockTransport { sender }), receiver)
}

/// Gateway over a mock transport with a refresher that never succeeds.
pub fn create_mock_gateway(session: Session) -> (ApiGateway, mpsc::Receiver<MockRequest>) {
    let (transport, receiver) = create_mock_transport(16);
    let refresher = Arc::new(ScriptedRefresher::new(vec![]));
    (ApiGateway::new(transport, session, refresher), receiver)
}

/// Helper to take the next outgoing request
pub async fn expect_request(receiver: &mut mpsc::Receiver<MockRequest>) -> Option<(ApiRequest, Responder)> {
    receiver
        .recv()
        .await
        .map(|MockRequest { request, respond_to }| (request, respond_to))
}

/// Helper to answer the next request with a JSON body, returning the request for assertions
pub async fn respond_next(
    receiver: &mut mpsc::Receiver<MockRequest>,
    status: StatusCode,
    body: serde_json::Value,
) -> ApiRequest {
    let (request, responder) = expect_request(receiver).await.expect("Expected a request");
    responder
        .send(Ok(ApiResponse::json(status, &body)))
        .expect("Caller dropped the request");
    request
}

/// Refresher that plays back a fixed list of outcomes and records the refresh tokens it saw.
pub struct ScriptedRefresher {
    outcomes: Mutex<VecDeque<Result<TokenSet, AuthError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRefresher {
    pub fn new(outcomes: Vec<Result<TokenSet, AuthError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TokenRefresher for ScriptedRefresher {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, Result<TokenSet, AuthError>> {
        self.calls.lock().unwrap().push(refresh_token.to_string());
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AuthError::RefreshRejected { status: 400 }));
        Box::pin(async move { outcome })
    }
}

/// Unsigned JWT carrying `claims`, good enough for claim decoding.
pub fn fake_jwt(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::session::decode_identity;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport() {
        let (transport, mut receiver) = create_mock_transport(4);

        let send_task = tokio::spawn(async move { transport.send(ApiRequest::get("/ping")).await });

        let request = respond_next(&mut receiver, StatusCode::OK, json!({"ok": true})).await;
        assert_eq!(request.path, "/ping");

        let response = send_task.await.unwrap().unwrap();
        assert_eq!(response.decode::<serde_json::Value>().unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_fake_jwt_decodes() {
        let token = fake_jwt(json!({"preferred_username": "bob"}));
        assert_eq!(decode_identity(&token).unwrap().display_name(), "bob");
    }
}
