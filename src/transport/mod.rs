//! Transport seam between the client and the relay.
//!
//! The client speaks to the relay through the [`Transport`] trait so the
//! connection lifecycle can be exercised against in-memory stubs. The
//! production implementation is [`WsTransport`], backed by
//! tokio-tungstenite. A successful connect yields a split write/read pair,
//! so sends and the receive loop never contend for the same handle.

mod ws;
pub use ws::WsTransport;

use crate::error::Result;
use async_trait::async_trait;

/// Connection request handed to a transport.
///
/// Identity and credential travel out-of-band on the connection request
/// itself (headers on the WebSocket upgrade), not in any message body.
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    /// Relay endpoint, `ws://host:port/path`-shaped
    pub uri: String,
    /// Bearer credential for the `Authorization` header
    pub api_key: String,
    /// Unique agent identifier
    pub agent_id: String,
    /// Wire form of the agent role
    pub agent_type: String,
}

/// Write half of an established connection.
#[async_trait]
pub trait MessageSink: Send {
    /// Writes one UTF-8 JSON payload to the connection.
    async fn send(&mut self, text: String) -> Result<()>;

    /// Closes the connection.
    async fn close(&mut self) -> Result<()>;
}

/// Read half of an established connection.
///
/// `None` means the stream has terminated; an `Err` item is a read error,
/// after which the source should not be polled again.
#[async_trait]
pub trait MessageSource: Send {
    async fn next(&mut self) -> Option<Result<String>>;
}

/// Factory for outbound relay connections.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Opens a connection described by `request`, returning the split
    /// write/read halves.
    async fn connect(
        &self,
        request: &ConnectRequest,
    ) -> Result<(Box<dyn MessageSink>, Box<dyn MessageSource>)>;
}
