//! HTTP Server module
//!
//! Assembles the router, CORS and logging layers, and runs the serve loop
//! that coordinates deferred process exit with the `/shutdown` route.

use crate::api::{create_api_router, ApiState};
use crate::config::AppConfig;
use crate::shutdown::{shutdown_channel, ShutdownListener};
use crate::state::create_shared_counter;
use axum::{
    body::Body,
    http::{Request, Response},
    middleware::{self, Next},
    Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Request timing and logging middleware
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        latency_ms = %latency,
        "Request processed"
    );

    response
}

/// Create the main server router.
///
/// The intended caller is a desktop-shell process on a different origin, so
/// CORS permits any origin, method, and header, preflight included.
pub fn create_server_router(state: Arc<ApiState>) -> Router {
    create_api_router(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and block until a shutdown is requested.
///
/// A `/shutdown` request signals the listener; the response keeps flushing
/// while we wait out the delay, then the process exits with status 0. Other
/// in-flight requests are not drained.
pub async fn start_server(config: AppConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let (shutdown, listener) = shutdown_channel();
    let state = Arc::new(ApiState::new(create_shared_counter(), shutdown));
    let app = create_server_router(state);

    tracing::info!(addr = %addr, "Starting HTTP server");

    let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_until_shutdown(tcp_listener, app, listener, config.shutdown.delay_ms).await
}

async fn serve_until_shutdown(
    tcp_listener: tokio::net::TcpListener,
    app: Router,
    mut listener: ShutdownListener,
    delay_ms: u64,
) -> anyhow::Result<()> {
    tokio::select! {
        result = axum::serve(tcp_listener, app).into_future() => {
            result?;
        }
        _ = listener.wait() => {
            tracing::info!(delay_ms = %delay_ms, "Shutdown requested, exiting after flush delay");
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            std::process::exit(0);
        }
    }

    Ok(())
}
