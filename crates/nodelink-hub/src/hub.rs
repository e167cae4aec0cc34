//! Hub core: registration, message intake, dispatch.

use crate::config::HubConfig;
use crate::errors::HubError;
use crate::ports::{BurnProcedure, IntelligenceSink, KeyValueStore};
use crate::push::PushRegistry;
use crate::registry::NodeRegistry;
use crate::store::{MessageLogRecord, NodeStore};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use nodelink_crypto::generate_credentials;
use nodelink_protocol::ProtocolCodec;
use nodelink_types::{
    Envelope, MessageType, NetworkNode, NodeRole, RegisterRequest, RegistrationResponse,
    SecureMessage, SecurityLevel, StatusResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Minimum clearance for threat-alert broadcasts.
const BROADCAST_CLEARANCE: SecurityLevel = SecurityLevel::Charlie;

/// The NodeLink communication hub.
///
/// One instance is authoritative for the nodes it knows about; request
/// handlers share it behind an `Arc`.
pub struct Hub {
    config: HubConfig,
    registry: NodeRegistry,
    store: NodeStore,
    codec: ProtocolCodec,
    push: PushRegistry,
    intel_sink: Arc<dyn IntelligenceSink>,
    burn_procedure: Arc<dyn BurnProcedure>,
}

impl Hub {
    /// Create a hub over the given storage adapter and collaborators,
    /// warm-loading the registry from the durable node table.
    pub fn new(
        config: HubConfig,
        kv: impl KeyValueStore + 'static,
        intel_sink: Arc<dyn IntelligenceSink>,
        burn_procedure: Arc<dyn BurnProcedure>,
    ) -> Result<Self, HubError> {
        let store = NodeStore::new(kv);
        let registry = NodeRegistry::new();

        let persisted = store.load_nodes()?;
        if !persisted.is_empty() {
            info!(nodes = persisted.len(), "restored node registry");
        }
        for node in persisted {
            registry.upsert(node);
        }

        Ok(Self {
            config,
            registry,
            store,
            codec: ProtocolCodec::new(),
            push: PushRegistry::new(),
            intel_sink,
            burn_procedure,
        })
    }

    /// Hub configuration.
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// The push registry for WebSocket delivery.
    pub fn push_registry(&self) -> &PushRegistry {
        &self.push
    }

    /// The in-memory node registry.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// The durable store.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Register a node: issue credentials, persist node + credential
    /// records atomically, and return the material the node needs.
    ///
    /// A malformed role or clearance rejects the request before any state
    /// is touched. Re-registration under an existing id replaces both
    /// records wholesale.
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<RegistrationResponse, HubError> {
        if request.node_id.is_empty() {
            return Err(HubError::Registration("node_id must not be empty".into()));
        }
        let role: NodeRole = request.role.parse()?;
        let security_level: SecurityLevel = request.security_level.parse()?;

        // Keypair generation is CPU-bound; keep it off the request path.
        let node_id = request.node_id.clone();
        let credentials =
            tokio::task::spawn_blocking(move || generate_credentials(&node_id, security_level))
                .await
                .map_err(|e| HubError::Internal(e.to_string()))?;

        let node = NetworkNode {
            node_id: request.node_id.clone(),
            codename: request.codename,
            role,
            endpoint: request.endpoint,
            public_key: credentials.public_key.clone(),
            last_seen: Utc::now(),
            status: "active".to_string(),
            security_level,
            capabilities: request.capabilities,
            trust_score: 1.0,
        };

        // Durable first: a storage failure must leave no registry entry.
        self.store.put_registration(&node, &credentials)?;
        self.registry.upsert(node);

        info!(
            node_id = %request.node_id,
            role = %role,
            security_level = %security_level,
            "node registered"
        );

        Ok(RegistrationResponse {
            status: "registered".to_string(),
            node_id: credentials.node_id.clone(),
            public_key: BASE64.encode(&credentials.public_key),
            symmetric_key: BASE64.encode(credentials.symmetric_key),
            signature_key: BASE64.encode(credentials.signature_key),
            key_version: credentials.key_version,
            expiry: credentials.expiry,
        })
    }

    /// Process an inbound envelope: load the recipient's credentials,
    /// open it, dispatch by type, and append to the message log.
    pub async fn receive(&self, envelope: &Envelope) -> Result<SecureMessage, HubError> {
        let credentials = self
            .store
            .load_credentials(&envelope.recipient_id)?
            .ok_or_else(|| HubError::UnknownRecipient(envelope.recipient_id.clone()))?;

        let message = self.codec.open(envelope, &credentials)?;

        self.dispatch(&message, envelope).await?;
        self.store.log_message(&MessageLogRecord::processed(&message))?;

        Ok(message)
    }

    async fn dispatch(&self, message: &SecureMessage, envelope: &Envelope) -> Result<(), HubError> {
        match message.message_type {
            MessageType::Heartbeat => {
                if let Some(node) = self.registry.touch(&message.sender_id, Utc::now()) {
                    self.store.put_node(&node)?;
                    debug!(node_id = %message.sender_id, "heartbeat received");
                } else {
                    debug!(node_id = %message.sender_id, "heartbeat from unregistered node");
                }
            }
            MessageType::IntelReport => {
                info!(sender = %message.sender_id, "routing intel report");
                self.intel_sink.ingest(message).await;
            }
            MessageType::ThreatAlert => {
                warn!(sender = %message.sender_id, "threat alert received");
                self.broadcast_threat_alert(envelope)?;
            }
            MessageType::EmergencyBurn => {
                error!(sender = %message.sender_id, "emergency burn triggered");
                self.burn_procedure.execute(message).await;
            }
            other => {
                info!(
                    sender = %message.sender_id,
                    message_type = %other,
                    "message logged"
                );
            }
        }
        Ok(())
    }

    /// Forward a threat-alert envelope to every connected node cleared
    /// charlie or above.
    fn broadcast_threat_alert(&self, envelope: &Envelope) -> Result<(), HubError> {
        let recipients = self.registry.cleared_for(BROADCAST_CLEARANCE);
        if recipients.is_empty() {
            return Ok(());
        }

        let frame = serde_json::to_string(envelope)
            .map_err(|e| HubError::Internal(format!("broadcast frame: {e}")))?;
        let delivered = self.push.broadcast(&recipients, &frame);

        info!(
            eligible = recipients.len(),
            delivered, "threat alert broadcast"
        );
        Ok(())
    }

    /// Read-only service snapshot.
    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            status: "operational".to_string(),
            active_nodes: self.registry.len(),
            timestamp: Utc::now(),
            system_health: "green".to_string(),
        }
    }
}
