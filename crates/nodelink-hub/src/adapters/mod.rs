//! Adapter implementations for the hub's outbound ports.

pub mod collaborators;
pub mod file;
pub mod memory;

pub use collaborators::{LoggingBurnProcedure, LoggingIntelSink};
pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
