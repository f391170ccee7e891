mod types;
pub use types::{Message, MessageType};

use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// Callback invoked when an inbound message's type matches its registration.
///
/// At most one handler is registered per [`MessageType`]; registering again
/// for the same type replaces the earlier handler.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, message: Message) -> Result<()>;
}

/// Adapter lifting an async closure into a [`MessageHandler`].
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F, Fut> MessageHandler for FnHandler<F>
where
    F: Fn(Message) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    async fn handle_message(&self, message: Message) -> Result<()> {
        (self.0)(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MessageHandler for CountingHandler {
        async fn handle_message(&self, _message: Message) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_trait_handler_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler { calls: calls.clone() };

        let message = Message::new(MessageType::Other("command".to_string()))
            .with_field("action", json!("explore"));
        handler.handle_message(message).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fn_handler_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let handler = FnHandler(move |message: Message| {
            let seen = seen.clone();
            async move {
                assert_eq!(message.message_type, MessageType::Heartbeat);
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        handler
            .handle_message(Message::new(MessageType::Heartbeat))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
