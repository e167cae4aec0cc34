//! HTTP/WebSocket service - the hub's network surface.
//!
//! Routes:
//! - `POST /api/register` — issue credentials for a node
//! - `POST /api/message` — submit an encrypted envelope
//! - `GET /api/status` — service snapshot
//! - `GET /ws` — duplex envelope frames
//! - `GET /health` — liveness probe

use crate::errors::HubError;
use crate::hub::Hub;
use crate::ws;
use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use nodelink_protocol::ProtocolError;
use nodelink_types::{Envelope, MessageAck, RegisterRequest};
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    hub: Arc<Hub>,
}

/// Hub HTTP/WebSocket service.
pub struct HubService {
    hub: Arc<Hub>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl HubService {
    /// Create a service around a hub instance.
    pub fn new(hub: Arc<Hub>) -> Self {
        Self {
            hub,
            shutdown_tx: None,
        }
    }

    /// Build the route table.
    pub fn router(&self) -> Router {
        let state = AppState {
            hub: Arc::clone(&self.hub),
        };

        let middleware = tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        Router::new()
            .route("/api/register", post(handle_register))
            .route("/api/message", post(handle_message))
            .route("/api/status", get(handle_status))
            .route("/ws", get(handle_ws))
            .route("/health", get(health_check))
            .layer(middleware)
            .with_state(state)
    }

    /// Bind and serve until shutdown.
    pub async fn start(&mut self) -> Result<(), HubError> {
        self.hub
            .config()
            .validate()
            .map_err(HubError::Config)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let addr = self.hub.config().bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| HubError::Bind(e.to_string()))?;

        info!(addr = %addr, "hub listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
                info!("received shutdown signal");
            })
            .await
            .map_err(|e| HubError::Internal(e.to_string()))?;

        info!("hub stopped");
        Ok(())
    }

    /// Trigger graceful shutdown.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = match &self {
            HubError::Config(_) | HubError::Bind(_) | HubError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };
        warn!(error = %self, "request rejected");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Handle node registration.
async fn handle_register(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, HubError> {
    let request: RegisterRequest = serde_json::from_value(body)
        .map_err(|e| HubError::Registration(e.to_string()))?;

    let response = state.hub.register(request).await?;
    Ok(Json(response))
}

/// Handle inbound secure messages.
async fn handle_message(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, HubError> {
    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|e| HubError::Protocol(ProtocolError::Malformed(e.to_string())))?;

    state.hub.receive(&envelope).await?;
    Ok(Json(MessageAck::processed()))
}

/// Handle status requests.
async fn handle_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.hub.status())
}

/// Upgrade to the duplex envelope channel.
async fn handle_ws(State(state): State<AppState>, upgrade: WebSocketUpgrade) -> impl IntoResponse {
    let hub = Arc::clone(&state.hub);
    upgrade.on_upgrade(move |socket| ws::handle_socket(hub, socket))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "nodelink-hub",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
