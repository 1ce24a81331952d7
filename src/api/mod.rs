//! Counter API module
//!
//! Provides the HTTP routes polled and controlled by the desktop shell.

use crate::shutdown::ShutdownHandle;
use crate::state::SharedCounter;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API state shared across handlers
#[derive(Clone)]
pub struct ApiState {
    pub counter: SharedCounter,
    pub shutdown: ShutdownHandle,
}

impl ApiState {
    pub fn new(counter: SharedCounter, shutdown: ShutdownHandle) -> Self {
        Self { counter, shutdown }
    }
}

/// Create the counter API router
pub fn create_api_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/counter", get(get_counter))
        .route("/counter/increment", post(increment_counter))
        .route("/counter/reset", post(reset_counter))
        .route("/shutdown", post(request_shutdown))
        .with_state(state)
}

/// Liveness message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Counter value response
#[derive(Debug, Serialize, Deserialize)]
pub struct CounterResponse {
    pub counter: i64,
}

/// Counter mutation response
#[derive(Debug, Serialize, Deserialize)]
pub struct CounterMessageResponse {
    pub counter: i64,
    pub message: String,
}

/// Liveness probe for the desktop shell
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        // Message the desktop shell expects, kept verbatim from the
        // service this backend replaces.
        message: "Python backend is running!".to_string(),
    })
}

/// Get the current counter value
async fn get_counter(State(state): State<Arc<ApiState>>) -> Json<CounterResponse> {
    Json(CounterResponse {
        counter: state.counter.get(),
    })
}

/// Increment the counter by 1
async fn increment_counter(State(state): State<Arc<ApiState>>) -> Json<CounterMessageResponse> {
    let counter = state.counter.increment();
    Json(CounterMessageResponse {
        counter,
        message: format!("Counter incremented to {}", counter),
    })
}

/// Reset the counter to 0
async fn reset_counter(State(state): State<Arc<ApiState>>) -> Json<CounterMessageResponse> {
    state.counter.reset();
    Json(CounterMessageResponse {
        counter: 0,
        message: "Counter reset to 0".to_string(),
    })
}

/// Request process shutdown.
///
/// Only signals the shutdown channel; the serve loop terminates the process
/// after this response has flushed.
async fn request_shutdown(State(state): State<Arc<ApiState>>) -> Json<MessageResponse> {
    tracing::info!("Shutdown requested");
    state.shutdown.request();
    Json(MessageResponse {
        message: "Server shutting down".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown::shutdown_channel;
    use crate::state::create_shared_counter;

    fn test_state() -> Arc<ApiState> {
        let (shutdown, _listener) = shutdown_channel();
        Arc::new(ApiState::new(create_shared_counter(), shutdown))
    }

    #[tokio::test]
    async fn test_root_message() {
        let response = root().await;
        assert_eq!(response.message, "Python backend is running!");
    }

    #[tokio::test]
    async fn test_increment_message_matches_counter() {
        let state = test_state();
        let response = increment_counter(State(state)).await;
        assert_eq!(response.counter, 1);
        assert_eq!(response.message, "Counter incremented to 1");
    }

    #[tokio::test]
    async fn test_reset_after_increments() {
        let state = test_state();
        for _ in 0..3 {
            increment_counter(State(state.clone())).await;
        }
        let response = reset_counter(State(state.clone())).await;
        assert_eq!(response.counter, 0);
        assert_eq!(response.message, "Counter reset to 0");
        assert_eq!(state.counter.get(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_signals_without_exiting() {
        let (shutdown, mut listener) = shutdown_channel();
        let state = Arc::new(ApiState::new(create_shared_counter(), shutdown));

        let response = request_shutdown(State(state)).await;
        assert_eq!(response.message, "Server shutting down");

        // The handler only signals; the serve loop owns process exit.
        listener.wait().await;
    }
}
