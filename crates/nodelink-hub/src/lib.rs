//! # NodeLink Hub
//!
//! The network-facing communication hub for the NodeLink network. Owns
//! the node registry and credential store, routes decrypted messages by
//! type, and persists durable state.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         HUB                              │
//! ├──────────────────────────────────────────────────────────┤
//! │  POST /api/register   POST /api/message   GET /api/status│
//! │          │                   │                  │        │
//! │  ┌───────┴───────────────────┴──────────────────┴─────┐  │
//! │  │                       Hub core                     │  │
//! │  │   registry (in-memory)  ·  codec  ·  dispatch      │  │
//! │  └───────────────────────┬────────────────────────────┘  │
//! │                          │                               │
//! │  ┌───────────────────────┴────────────────────────────┐  │
//! │  │              NodeStore (KeyValueStore port)        │  │
//! │  │        nodes · credentials · message log           │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  GET /ws ── duplex envelope frames ── PushRegistry       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Collaborators outside this core (intelligence fusion, burn procedures)
//! are reached through the outbound ports in [`ports`].

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod config;
pub mod errors;
pub mod hub;
pub mod ports;
pub mod push;
pub mod registry;
pub mod service;
pub mod store;
pub mod ws;

// Re-exports for public API
pub use adapters::{FileBackedKVStore, InMemoryKVStore, LoggingBurnProcedure, LoggingIntelSink};
pub use config::HubConfig;
pub use errors::{HubError, StoreError};
pub use hub::Hub;
pub use ports::{BatchOperation, BurnProcedure, IntelligenceSink, KeyValueStore};
pub use service::HubService;
pub use store::NodeStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
