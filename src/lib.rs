//! AgentLink Core Client Implementation
//! Connects marketplace exploration agents to the relay backend over a
//! persistent WebSocket: typed JSON envelopes, per-type handler dispatch,
//! and heartbeat-driven reconnection.

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod transport;

// Re-export commonly used types
pub use agent::AgentRole;
pub use client::{AgentClient, ConnectionState};
pub use config::{ClientConfig, HEARTBEAT_INTERVAL};
pub use error::{Error, Result};
pub use protocol::{FnHandler, Message, MessageHandler, MessageType};
pub use transport::{ConnectRequest, Transport, WsTransport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: &str = "1.0.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert!(!PROTOCOL_VERSION.is_empty());
    }
}
