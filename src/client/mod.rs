//! Connection manager for a single agent.
//!
//! This module provides functionality for:
//! - Opening an authenticated connection to the relay
//! - Sending typed JSON envelopes (observations, results, heartbeats)
//! - Dispatching inbound messages to registered handlers
//! - Heartbeat-driven reconnection
//!
//! One [`AgentClient`] is created per agent identity and held for the
//! process lifetime. Three tasks typically share it: the agent's own
//! workflow issuing sends, [`AgentClient::receive_messages`] consuming the
//! inbound stream, and [`AgentClient::maintain_connection`] keeping the
//! connection alive. Failures never escape as errors; they are logged and
//! reported as boolean outcomes, and the maintenance loop is the sole
//! recovery path.
//!
//! # Examples
//!
//! ```rust,no_run
//! use agentlink_core::agent::AgentRole;
//! use agentlink_core::client::AgentClient;
//! use agentlink_core::config::ClientConfig;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let config = ClientConfig::new(
//!     "ws://localhost:3002/api/v1/ws",
//!     "mcp_agent_example_001",
//!     "tech_enthusiast_1",
//!     AgentRole::TechEnthusiast,
//! );
//! let client = Arc::new(AgentClient::new(config));
//!
//! if client.connect().await {
//!     let receiver = client.clone();
//!     tokio::spawn(async move { receiver.receive_messages().await });
//!
//!     client
//!         .send_observation(json!({
//!             "category": "electronics",
//!             "finding": "filtering by specs is intuitive",
//!         }))
//!         .await;
//!     client.disconnect().await;
//! }
//! # }
//! ```

use crate::config::ClientConfig;
use crate::protocol::{Message, MessageHandler, MessageType};
use crate::transport::{ConnectRequest, MessageSink, MessageSource, Transport, WsTransport};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time;
use tracing::{debug, error, info, warn};

/// Connection lifecycle states.
///
/// There is no intermediate connecting or authenticating state; the
/// handshake is just the first message sent after the transport connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No live connection
    Disconnected,
    /// Transport is open and the handshake has been sent
    Connected,
}

/// Manages one outbound connection to the relay for one agent identity.
pub struct AgentClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    state: RwLock<ConnectionState>,
    sink: Mutex<Option<Box<dyn MessageSink>>>,
    source: Mutex<Option<Box<dyn MessageSource>>>,
    handlers: RwLock<HashMap<MessageType, Arc<dyn MessageHandler>>>,
}

impl AgentClient {
    /// Creates a client that connects over WebSockets.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(WsTransport))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            state: RwLock::new(ConnectionState::Disconnected),
            sink: Mutex::new(None),
            source: Mutex::new(None),
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the current connection state.
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Returns `true` while the connection is up.
    pub async fn is_connected(&self) -> bool {
        self.state().await == ConnectionState::Connected
    }

    /// Establishes the connection to the relay.
    ///
    /// On success the state becomes [`ConnectionState::Connected`] and the
    /// `agent_connect` handshake is sent immediately. Never raises: every
    /// failure is logged and reported as `false`, leaving the client
    /// disconnected with no transport handles.
    pub async fn connect(&self) -> bool {
        let request = ConnectRequest {
            uri: self.config.uri.clone(),
            api_key: self.config.api_key.clone(),
            agent_id: self.config.agent_id.clone(),
            agent_type: self.config.agent_type.as_str().to_string(),
        };

        info!(
            uri = %self.config.uri,
            agent_type = %self.config.agent_type,
            "connecting to relay"
        );

        match self.transport.connect(&request).await {
            Ok((sink, source)) => {
                *self.sink.lock().await = Some(sink);
                *self.source.lock().await = Some(source);
                *self.state.write().await = ConnectionState::Connected;
                info!("connected to relay");

                let handshake = Message::new(MessageType::AgentConnect)
                    .with_field("agent_id", json!(self.config.agent_id))
                    .with_field("agent_type", json!(self.config.agent_type.as_str()));
                self.send_message(handshake).await;

                true
            }
            Err(e) => {
                error!(error = %e, "connection failed");
                *self.state.write().await = ConnectionState::Disconnected;
                *self.sink.lock().await = None;
                *self.source.lock().await = None;
                false
            }
        }
    }

    /// Tears the connection down.
    ///
    /// No-op when not connected. Otherwise sends an `agent_disconnect`
    /// goodbye, then closes the transport even if the goodbye failed, and
    /// finally clears the handles and marks the client disconnected.
    pub async fn disconnect(&self) {
        if !self.is_connected().await {
            return;
        }

        let goodbye = Message::new(MessageType::AgentDisconnect)
            .with_field("agent_id", json!(self.config.agent_id));
        self.send_message(goodbye).await;

        if let Some(mut sink) = self.sink.lock().await.take() {
            if let Err(e) = sink.close().await {
                error!(error = %e, "error closing connection");
            }
        }
        *self.source.lock().await = None;
        *self.state.write().await = ConnectionState::Disconnected;
        info!("disconnected from relay");
    }

    /// Sends one message to the relay.
    ///
    /// Fails fast when not connected. `id` and `timestamp` are filled in
    /// when absent, so repeated sends carry distinct ids. Write errors are
    /// logged and converted to `false`, never propagated.
    pub async fn send_message(&self, mut message: Message) -> bool {
        if !self.is_connected().await {
            error!("cannot send message: not connected");
            return false;
        }

        let mut sink = self.sink.lock().await;
        let Some(sink) = sink.as_mut() else {
            error!("cannot send message: not connected");
            return false;
        };

        message.fill_defaults();
        let text = match serde_json::to_string(&message) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "failed to serialize message");
                return false;
            }
        };

        match sink.send(text).await {
            Ok(()) => {
                debug!(message_type = %message.message_type, "sent message");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to send message");
                false
            }
        }
    }

    /// Sends one observation made during exploration.
    pub async fn send_observation(&self, observation: Value) -> bool {
        let message = self
            .envelope(MessageType::AgentObservation)
            .with_field("observation", observation);
        self.send_message(message).await
    }

    /// Sends the complete results of an exploration run.
    pub async fn send_exploration_result(&self, result: Value) -> bool {
        let message = self
            .envelope(MessageType::ExplorationResult)
            .with_field("result", result);
        self.send_message(message).await
    }

    /// Sends a liveness heartbeat.
    pub async fn send_heartbeat(&self) -> bool {
        let message = self.envelope(MessageType::Heartbeat);
        self.send_message(message).await
    }

    fn envelope(&self, message_type: MessageType) -> Message {
        Message::new(message_type)
            .with_field("agent_id", json!(self.config.agent_id))
            .with_field("agent_type", json!(self.config.agent_type.as_str()))
    }

    /// Registers `handler` for inbound messages tagged `message_type`,
    /// replacing any handler registered earlier for that type.
    pub async fn register_message_handler<H>(&self, message_type: MessageType, handler: H)
    where
        H: MessageHandler + 'static,
    {
        debug!(message_type = %message_type, "registered message handler");
        self.handlers
            .write()
            .await
            .insert(message_type, Arc::new(handler));
    }

    /// Consumes the inbound stream until it terminates.
    ///
    /// Each inbound payload is parsed as JSON; parse failures are logged
    /// and skipped. Parsed messages are dispatched to the handler
    /// registered for their type, with a warning for unregistered types.
    /// When the peer closes the stream or a read error occurs, the client
    /// is marked disconnected and the call returns.
    pub async fn receive_messages(&self) {
        if !self.is_connected().await {
            error!("cannot receive messages: not connected");
            return;
        }
        let Some(mut source) = self.source.lock().await.take() else {
            error!("cannot receive messages: not connected");
            return;
        };

        while let Some(item) = source.next().await {
            let text = match item {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "error reading from connection");
                    break;
                }
            };

            let message: Message = match serde_json::from_str(&text) {
                Ok(message) => message,
                Err(e) => {
                    error!(error = %e, "failed to parse message");
                    continue;
                }
            };

            let handler = {
                let handlers = self.handlers.read().await;
                handlers.get(&message.message_type).cloned()
            };
            match handler {
                Some(handler) => {
                    debug!(message_type = %message.message_type, "dispatching message");
                    if let Err(e) = handler.handle_message(message).await {
                        error!(error = %e, "message handler failed");
                    }
                }
                None => {
                    warn!(message_type = %message.message_type, "no handler for message type");
                }
            }
        }

        info!("connection closed");
        *self.state.write().await = ConnectionState::Disconnected;
    }

    /// Keeps the connection alive.
    ///
    /// While connected, sends a heartbeat every `heartbeat_interval`; while
    /// disconnected, retries [`AgentClient::connect`] on the same fixed
    /// period. Runs until the task is cancelled externally.
    pub async fn maintain_connection(&self, heartbeat_interval: Duration) {
        loop {
            if self.is_connected().await {
                self.send_heartbeat().await;
            } else {
                info!("connection lost, attempting to reconnect");
                self.connect().await;
            }
            time::sleep(heartbeat_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRole;

    fn config() -> ClientConfig {
        ClientConfig::new(
            "ws://localhost:3002/api/v1/ws",
            "mcp_agent_test_123",
            "test_agent_1",
            AgentRole::TechEnthusiast,
        )
    }

    #[tokio::test]
    async fn test_client_starts_disconnected() {
        let client = AgentClient::new(config());
        assert_eq!(client.state().await, ConnectionState::Disconnected);
        assert!(!client.is_connected().await);
    }

    #[tokio::test]
    async fn test_send_message_fails_fast_when_disconnected() {
        let client = AgentClient::new(config());
        assert!(!client.send_message(Message::new(MessageType::Heartbeat)).await);
        assert!(!client.send_heartbeat().await);
    }

    #[tokio::test]
    async fn test_disconnect_is_noop_when_disconnected() {
        let client = AgentClient::new(config());
        client.disconnect().await;
        assert_eq!(client.state().await, ConnectionState::Disconnected);
    }
}
