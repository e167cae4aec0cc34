//! Default collaborator adapters.
//!
//! The real intelligence-fusion and burn-procedure consumers live outside
//! this core and attach through the outbound ports; these adapters just
//! record the hand-off.

use crate::ports::{BurnProcedure, IntelligenceSink};
use async_trait::async_trait;
use nodelink_types::SecureMessage;
use tracing::{error, info};

/// Intelligence sink that logs each report.
#[derive(Debug, Default)]
pub struct LoggingIntelSink;

#[async_trait]
impl IntelligenceSink for LoggingIntelSink {
    async fn ingest(&self, message: &SecureMessage) {
        info!(
            sender = %message.sender_id,
            message_id = %message.message_id,
            "intel report received"
        );
    }
}

/// Burn procedure that logs the trigger at the highest severity.
#[derive(Debug, Default)]
pub struct LoggingBurnProcedure;

#[async_trait]
impl BurnProcedure for LoggingBurnProcedure {
    async fn execute(&self, message: &SecureMessage) {
        error!(
            sender = %message.sender_id,
            message_id = %message.message_id,
            "emergency burn initiated"
        );
    }
}
