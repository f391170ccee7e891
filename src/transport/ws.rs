use super::{ConnectRequest, MessageSink, MessageSource, Transport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, AUTHORIZATION};
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport backed by tokio-tungstenite.
///
/// Authentication rides on the upgrade request: a bearer `Authorization`
/// header plus `X-Agent-ID` and `X-Agent-Type` identity headers.
pub struct WsTransport;

#[async_trait]
impl Transport for WsTransport {
    async fn connect(
        &self,
        request: &ConnectRequest,
    ) -> Result<(Box<dyn MessageSink>, Box<dyn MessageSource>)> {
        let mut upgrade = request
            .uri
            .as_str()
            .into_client_request()
            .map_err(|e| Error::Connection(format!("invalid relay uri: {}", e)))?;

        let headers = upgrade.headers_mut();
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {}", request.api_key))?,
        );
        headers.insert("X-Agent-ID", header_value(&request.agent_id)?);
        headers.insert("X-Agent-Type", header_value(&request.agent_type)?);

        let (stream, response) = connect_async(upgrade)
            .await
            .map_err(|e| Error::Connection(format!("failed to connect: {}", e)))?;
        debug!(status = %response.status(), "websocket upgrade accepted");

        let (write, read) = stream.split();
        Ok((Box::new(WsSink { write }), Box::new(WsSource { read })))
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Validation(format!("invalid header value: {}", e)))
}

struct WsSink {
    write: SplitSink<WsStream, WsMessage>,
}

#[async_trait]
impl MessageSink for WsSink {
    async fn send(&mut self, text: String) -> Result<()> {
        self.write
            .send(WsMessage::Text(text))
            .await
            .map_err(|e| Error::Send(e.to_string()))
    }

    async fn close(&mut self) -> Result<()> {
        self.write
            .close()
            .await
            .map_err(|e| Error::Connection(format!("failed to close connection: {}", e)))
    }
}

struct WsSource {
    read: SplitStream<WsStream>,
}

#[async_trait]
impl MessageSource for WsSource {
    async fn next(&mut self) -> Option<Result<String>> {
        while let Some(item) = self.read.next().await {
            match item {
                Ok(WsMessage::Text(text)) => return Some(Ok(text)),
                Ok(WsMessage::Close(_)) => return None,
                // Ping/pong are answered by tungstenite; binary frames are
                // not part of the protocol.
                Ok(_) => continue,
                Err(e) => return Some(Err(Error::Connection(e.to_string()))),
            }
        }
        None
    }
}
