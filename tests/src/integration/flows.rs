//! # Integration Test Flows
//!
//! Exercises the hub, protocol codec, and client together over a real
//! HTTP/WebSocket listener:
//!
//! 1. **Registration → heartbeat**: a node registers, receives its
//!    credential bundle, and heartbeats; `last_seen` advances.
//! 2. **Replay defense over HTTP**: resubmitting an identical envelope is
//!    rejected even though all cryptographic material is still valid.
//! 3. **Last-write-wins registration**: re-registering a node id replaces
//!    the stored records and keeps the node count at 1.
//! 4. **WebSocket duplex frames**: envelope frames submitted over `/ws`
//!    run the same receive path and are acknowledged.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    use nodelink_client::NodeLinkClient;
    use nodelink_crypto::{SignatureKey, SymmetricKey};
    use nodelink_hub::{
        Hub, HubConfig, HubService, InMemoryKVStore, LoggingBurnProcedure, LoggingIntelSink,
    };
    use nodelink_protocol::ProtocolCodec;
    use nodelink_types::{
        MessageType, NodeCredentials, RegistrationResponse, SecurityLevel, StatusResponse,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Start an in-process hub on an ephemeral port.
    async fn spawn_hub() -> (Arc<Hub>, SocketAddr) {
        let hub = Arc::new(
            Hub::new(
                HubConfig::default(),
                InMemoryKVStore::new(),
                Arc::new(LoggingIntelSink),
                Arc::new(LoggingBurnProcedure),
            )
            .unwrap(),
        );

        let service = HubService::new(Arc::clone(&hub));
        let router = service.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (hub, addr)
    }

    /// Rebuild sealing credentials from a registration response, the way
    /// a node does (private key slot stays empty).
    fn credentials_from(bundle: &RegistrationResponse, level: SecurityLevel) -> NodeCredentials {
        let symmetric = BASE64.decode(&bundle.symmetric_key).unwrap();
        let signature = BASE64.decode(&bundle.signature_key).unwrap();
        NodeCredentials {
            node_id: bundle.node_id.clone(),
            public_key: BASE64.decode(&bundle.public_key).unwrap(),
            private_key: Vec::new(),
            symmetric_key: *SymmetricKey::from_slice(&symmetric).unwrap().as_bytes(),
            signature_key: *SignatureKey::from_slice(&signature).unwrap().as_bytes(),
            key_version: bundle.key_version,
            expiry: bundle.expiry,
            security_clearance: level,
        }
    }

    async fn register_over_http(
        addr: SocketAddr,
        node_id: &str,
        codename: &str,
        level: &str,
    ) -> RegistrationResponse {
        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/register"))
            .json(&serde_json::json!({
                "node_id": node_id,
                "codename": codename,
                "role": "operator",
                "endpoint": format!("node_{node_id}"),
                "security_level": level,
                "capabilities": ["recon"],
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    fn heartbeat_payload() -> serde_json::Map<String, serde_json::Value> {
        let mut payload = serde_json::Map::new();
        payload.insert("status".to_string(), "operational".into());
        payload
    }

    // =========================================================================
    // REGISTRATION → HEARTBEAT
    // =========================================================================

    #[tokio::test]
    async fn test_register_then_heartbeat_advances_last_seen() {
        let (hub, addr) = spawn_hub().await;

        let bundle = register_over_http(addr, "GHOST-01", "ghost", "bravo").await;
        assert_eq!(bundle.status, "registered");
        assert_eq!(BASE64.decode(&bundle.symmetric_key).unwrap().len(), 32);
        assert!(bundle.expiry > chrono::Utc::now());

        let before = hub.registry().get("GHOST-01").unwrap().last_seen;

        // Heartbeat envelope: the hub opens it with the recipient's stored
        // keys, so the deliverable path is the node's own credential pair.
        let creds = credentials_from(&bundle, SecurityLevel::Bravo);
        let codec = ProtocolCodec::new();
        let envelope = codec
            .seal(
                &creds,
                "GHOST-01",
                MessageType::Heartbeat,
                heartbeat_payload(),
                SecurityLevel::Alpha,
            )
            .unwrap();

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/message"))
            .json(&envelope)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "message_processed");

        let after = hub.registry().get("GHOST-01").unwrap().last_seen;
        assert!(after >= before);
    }

    #[tokio::test]
    async fn test_codec_round_trip_for_registered_node() {
        let (_hub, addr) = spawn_hub().await;

        let bundle = register_over_http(addr, "GHOST-01", "ghost", "bravo").await;
        let creds = credentials_from(&bundle, SecurityLevel::Bravo);

        let codec = ProtocolCodec::new();
        let envelope = codec
            .seal(
                &creds,
                "hub",
                MessageType::Heartbeat,
                heartbeat_payload(),
                SecurityLevel::Alpha,
            )
            .unwrap();

        let message = codec.open(&envelope, &creds).unwrap();
        assert_eq!(message.payload, heartbeat_payload());
        assert_eq!(message.sender_id, "GHOST-01");
        assert_eq!(message.recipient_id, "hub");
    }

    #[tokio::test]
    async fn test_client_register_and_self_addressed_send() {
        let (_hub, addr) = spawn_hub().await;

        let mut client = NodeLinkClient::new("GHOST-02", "wraith", format!("http://{addr}"));
        client
            .register("operator", SecurityLevel::Bravo, vec!["recon".to_string()])
            .await
            .unwrap();
        assert!(client.is_registered());
        assert!(client.credentials().unwrap().private_key.is_empty());

        client
            .send(
                "GHOST-02",
                MessageType::StatusUpdate,
                heartbeat_payload(),
                SecurityLevel::Alpha,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_heartbeat_to_unregistered_hub_id_is_rejected() {
        let (_hub, addr) = spawn_hub().await;

        let mut client = NodeLinkClient::new("GHOST-03", "shade", format!("http://{addr}"));
        client
            .register("operator", SecurityLevel::Alpha, vec![])
            .await
            .unwrap();

        // No credentials exist under the well-known "hub" id, so the
        // receive path fails the recipient lookup with a 400.
        let result = client.heartbeat().await;
        assert!(matches!(
            result,
            Err(nodelink_client::ClientError::Rejected { status: 400, .. })
        ));
    }

    // =========================================================================
    // REPLAY / VALIDATION OVER HTTP
    // =========================================================================

    #[tokio::test]
    async fn test_identical_envelope_rejected_as_replay() {
        let (_hub, addr) = spawn_hub().await;

        let bundle = register_over_http(addr, "GHOST-01", "ghost", "charlie").await;
        let creds = credentials_from(&bundle, SecurityLevel::Charlie);

        let codec = ProtocolCodec::new();
        let envelope = codec
            .seal(
                &creds,
                "GHOST-01",
                MessageType::IntelReport,
                heartbeat_payload(),
                SecurityLevel::Charlie,
            )
            .unwrap();

        let http = reqwest::Client::new();
        let url = format!("http://{addr}/api/message");

        let first = http.post(&url).json(&envelope).send().await.unwrap();
        assert_eq!(first.status(), 200);

        let second = http.post(&url).json(&envelope).send().await.unwrap();
        assert_eq!(second.status(), 400);
        let body: serde_json::Value = second.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("duplicate"));
    }

    #[tokio::test]
    async fn test_stale_envelope_rejected() {
        let (_hub, addr) = spawn_hub().await;

        let bundle = register_over_http(addr, "GHOST-01", "ghost", "bravo").await;
        let creds = credentials_from(&bundle, SecurityLevel::Bravo);

        let codec = ProtocolCodec::new();
        let mut envelope = codec
            .seal(
                &creds,
                "GHOST-01",
                MessageType::StatusUpdate,
                heartbeat_payload(),
                SecurityLevel::Alpha,
            )
            .unwrap();
        envelope.timestamp = chrono::Utc::now() - chrono::Duration::seconds(301);

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/message"))
            .json(&envelope)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_unknown_recipient_rejected() {
        let (_hub, addr) = spawn_hub().await;

        let bundle = register_over_http(addr, "GHOST-01", "ghost", "bravo").await;
        let creds = credentials_from(&bundle, SecurityLevel::Bravo);

        let codec = ProtocolCodec::new();
        let envelope = codec
            .seal(
                &creds,
                "NOBODY-99",
                MessageType::StatusUpdate,
                heartbeat_payload(),
                SecurityLevel::Alpha,
            )
            .unwrap();

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/message"))
            .json(&envelope)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("unknown recipient"));
    }

    #[tokio::test]
    async fn test_malformed_registration_rejected() {
        let (hub, addr) = spawn_hub().await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}/api/register"))
            .json(&serde_json::json!({
                "node_id": "GHOST-01",
                "codename": "ghost",
                "role": "admiral",
                "endpoint": "node_GHOST-01",
                "security_level": "bravo",
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(hub.registry().len(), 0);
    }

    // =========================================================================
    // LAST-WRITE-WINS REGISTRATION
    // =========================================================================

    #[tokio::test]
    async fn test_reregistration_keeps_node_count_at_one() {
        let (_hub, addr) = spawn_hub().await;

        let first = register_over_http(addr, "GHOST-01", "ghost", "alpha").await;
        let second = register_over_http(addr, "GHOST-01", "wraith", "delta").await;
        assert_ne!(first.symmetric_key, second.symmetric_key);

        let status: StatusResponse = reqwest::Client::new()
            .get(format!("http://{addr}/api/status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(status.status, "operational");
        assert_eq!(status.active_nodes, 1);
        assert_eq!(status.system_health, "green");
    }

    // =========================================================================
    // DURABLE STATE
    // =========================================================================

    #[tokio::test]
    async fn test_registry_restored_from_durable_store() {
        use nodelink_hub::FileBackedKVStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodelink.db");

        {
            let hub = Hub::new(
                HubConfig::default(),
                FileBackedKVStore::new(&path),
                Arc::new(LoggingIntelSink),
                Arc::new(LoggingBurnProcedure),
            )
            .unwrap();

            hub.register(nodelink_types::RegisterRequest {
                node_id: "GHOST-01".to_string(),
                codename: "ghost".to_string(),
                role: "operator".to_string(),
                endpoint: "node_GHOST-01".to_string(),
                security_level: "bravo".to_string(),
                capabilities: vec![],
            })
            .await
            .unwrap();
        }

        // A fresh hub over the same file sees the node and its credentials.
        let restarted = Hub::new(
            HubConfig::default(),
            FileBackedKVStore::new(&path),
            Arc::new(LoggingIntelSink),
            Arc::new(LoggingBurnProcedure),
        )
        .unwrap();

        assert_eq!(restarted.registry().len(), 1);
        assert!(restarted
            .store()
            .load_credentials("GHOST-01")
            .unwrap()
            .is_some());
    }

    // =========================================================================
    // WEBSOCKET DUPLEX FRAMES
    // =========================================================================

    #[tokio::test]
    async fn test_websocket_envelope_frame_acknowledged() {
        let (_hub, addr) = spawn_hub().await;

        let bundle = register_over_http(addr, "GHOST-01", "ghost", "bravo").await;
        let creds = credentials_from(&bundle, SecurityLevel::Bravo);

        let codec = ProtocolCodec::new();
        let envelope = codec
            .seal(
                &creds,
                "GHOST-01",
                MessageType::StatusUpdate,
                heartbeat_payload(),
                SecurityLevel::Alpha,
            )
            .unwrap();

        let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
            .await
            .unwrap();

        socket
            .send(WsMessage::text(serde_json::to_string(&envelope).unwrap()))
            .await
            .unwrap();

        let reply = socket.next().await.unwrap().unwrap();
        let body: serde_json::Value =
            serde_json::from_str(reply.into_text().unwrap().as_str()).unwrap();
        assert_eq!(body["status"], "message_processed");
    }

    #[tokio::test]
    async fn test_websocket_malformed_frame_answered_with_error() {
        let (_hub, addr) = spawn_hub().await;

        let (mut socket, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
            .await
            .unwrap();

        socket.send(WsMessage::text("not an envelope")).await.unwrap();

        let reply = socket.next().await.unwrap().unwrap();
        let body: serde_json::Value =
            serde_json::from_str(reply.into_text().unwrap().as_str()).unwrap();
        assert!(body["error"].as_str().unwrap().contains("malformed"));
    }
}
