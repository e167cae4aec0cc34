//! The NodeLink client.

use crate::errors::ClientError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use nodelink_protocol::ProtocolCodec;
use nodelink_types::{
    MessageType, NodeCredentials, RegisterRequest, RegistrationResponse, SecurityLevel, KEY_SIZE,
};
use std::time::Duration;
use tracing::{info, warn};

/// Default heartbeat cadence.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Client for connecting a node to the NodeLink hub.
///
/// Holds only the credential material the hub returns at registration;
/// the identity private key stays hub-side and the local private-key slot
/// remains empty.
pub struct NodeLinkClient {
    node_id: String,
    codename: String,
    hub_url: String,
    http: reqwest::Client,
    codec: ProtocolCodec,
    credentials: Option<NodeCredentials>,
}

impl NodeLinkClient {
    /// Create a client for the hub at `hub_url` (e.g. `http://host:8443`).
    pub fn new(
        node_id: impl Into<String>,
        codename: impl Into<String>,
        hub_url: impl Into<String>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            codename: codename.into(),
            hub_url: hub_url.into(),
            http: reqwest::Client::new(),
            codec: ProtocolCodec::new(),
            credentials: None,
        }
    }

    /// This node's id.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// True once registration has stored credentials.
    pub fn is_registered(&self) -> bool {
        self.credentials.is_some()
    }

    /// Credentials retained from registration, if any.
    pub fn credentials(&self) -> Option<&NodeCredentials> {
        self.credentials.as_ref()
    }

    /// Register with the hub and retain the returned credential material.
    pub async fn register(
        &mut self,
        role: &str,
        security_level: SecurityLevel,
        capabilities: Vec<String>,
    ) -> Result<(), ClientError> {
        let request = RegisterRequest {
            node_id: self.node_id.clone(),
            codename: self.codename.clone(),
            role: role.to_string(),
            endpoint: format!("node_{}", self.node_id),
            security_level: security_level.to_string(),
            capabilities,
        };

        let response = self
            .http
            .post(format!("{}/api/register", self.hub_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected { status, body });
        }

        let bundle: RegistrationResponse = response.json().await?;
        self.credentials = Some(credentials_from_response(&bundle, security_level)?);

        info!(node_id = %self.node_id, "registered with hub");
        Ok(())
    }

    /// Seal and send an encrypted message to a recipient via the hub.
    pub async fn send(
        &self,
        recipient_id: &str,
        message_type: MessageType,
        payload: serde_json::Map<String, serde_json::Value>,
        security_level: SecurityLevel,
    ) -> Result<(), ClientError> {
        let credentials = self.credentials.as_ref().ok_or(ClientError::NotRegistered)?;

        let envelope =
            self.codec
                .seal(credentials, recipient_id, message_type, payload, security_level)?;

        let response = self
            .http
            .post(format!("{}/api/message", self.hub_url))
            .json(&envelope)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Rejected { status, body });
        }
        Ok(())
    }

    /// Send a heartbeat to the hub's well-known id.
    pub async fn heartbeat(&self) -> Result<(), ClientError> {
        let mut payload = serde_json::Map::new();
        payload.insert("status".to_string(), "operational".into());
        payload.insert("timestamp".to_string(), Utc::now().to_rfc3339().into());

        self.send("hub", MessageType::Heartbeat, payload, SecurityLevel::Alpha)
            .await
    }

    /// Send heartbeats on a fixed cadence until the future is dropped.
    /// Failures are logged and do not stop the loop.
    pub async fn run_heartbeat_loop(&self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            if let Err(e) = self.heartbeat().await {
                warn!(node_id = %self.node_id, error = %e, "heartbeat failed");
            }
        }
    }
}

/// Decode the credential bundle the hub returns at registration.
///
/// The private-key slot stays empty: the hub never releases it.
fn credentials_from_response(
    bundle: &RegistrationResponse,
    security_level: SecurityLevel,
) -> Result<NodeCredentials, ClientError> {
    let decode_key = |name: &str, value: &str| -> Result<[u8; KEY_SIZE], ClientError> {
        BASE64
            .decode(value)
            .map_err(|e| ClientError::InvalidCredentials(format!("{name}: {e}")))?
            .try_into()
            .map_err(|_| ClientError::InvalidCredentials(format!("{name}: wrong length")))
    };

    Ok(NodeCredentials {
        node_id: bundle.node_id.clone(),
        public_key: BASE64
            .decode(&bundle.public_key)
            .map_err(|e| ClientError::InvalidCredentials(format!("public_key: {e}")))?,
        private_key: Vec::new(),
        symmetric_key: decode_key("symmetric_key", &bundle.symmetric_key)?,
        signature_key: decode_key("signature_key", &bundle.signature_key)?,
        key_version: bundle.key_version,
        expiry: bundle.expiry,
        security_clearance: security_level,
    })
}
