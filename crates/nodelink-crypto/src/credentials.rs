//! Node credential issuance.

use crate::keys::{IdentityKeyPair, SignatureKey, SymmetricKey};
use chrono::Utc;
use nodelink_types::{NodeCredentials, SecurityLevel};

/// Generate complete cryptographic credentials for a node.
///
/// Issues a fresh Ed25519 identity keypair, a 256-bit symmetric key, and a
/// 256-bit signature key at key version 1. Expiry is `now + TTL` for the
/// clearance, so higher clearance yields shorter-lived credentials.
pub fn generate_credentials(node_id: &str, clearance: SecurityLevel) -> NodeCredentials {
    let identity = IdentityKeyPair::generate();
    let symmetric_key = SymmetricKey::generate();
    let signature_key = SignatureKey::generate();

    NodeCredentials {
        node_id: node_id.to_string(),
        public_key: identity.public_key_bytes().to_vec(),
        private_key: identity.seed_bytes().to_vec(),
        symmetric_key: *symmetric_key.as_bytes(),
        signature_key: *signature_key.as_bytes(),
        key_version: 1,
        expiry: Utc::now() + clearance.credential_ttl(),
        security_clearance: clearance,
    }
}
