//! Delivery of reply lines to a chat destination
//!
//! The aggregator never talks to the chat network itself; it hands each
//! reply to a [`DeliverySink`] and moves on.

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Fire-and-forget sink for reply lines
pub trait DeliverySink: Send + Sync {
    /// Send `text` to `destination` (channel or nick)
    fn deliver(&self, destination: &str, text: &str);
}

/// Prints replies as `[destination] text`
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl DeliverySink for StdoutSink {
    fn deliver(&self, destination: &str, text: &str) {
        println!("[{}] {}", destination, text);
    }
}

/// A reply queued for a connection task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub destination: String,
    pub text: String,
}

/// Forwards replies to a channel drained by the connection task
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<Delivery>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<Delivery>) -> Self {
        Self { tx }
    }
}

impl DeliverySink for ChannelSink {
    fn deliver(&self, destination: &str, text: &str) {
        let delivery = Delivery {
            destination: destination.to_string(),
            text: text.to_string(),
        };
        if self.tx.send(delivery).is_err() {
            warn!("Dropping reply to {}: receiver closed", destination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_channel_sink() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);

        sink.deliver("#archlinux", "hello");

        assert_eq!(
            rx.recv().await,
            Some(Delivery {
                destination: "#archlinux".to_string(),
                text: "hello".to_string(),
            })
        );
    }

    #[test]
    fn test_closed_channel_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        ChannelSink::new(tx).deliver("#archlinux", "hello");
    }
}
