use contracts::shared::changes::{ChangeEvent, ChangeKind};
use once_cell::sync::Lazy;
use tokio::sync::broadcast;

use super::cache;

/// Events buffered per subscriber before it starts lagging
const CHANNEL_CAPACITY: usize = 256;

/// Process-wide fan-out of table change notifications
pub struct ChangeHub {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send to every current subscriber; returns how many received it
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

static HUB: Lazy<ChangeHub> = Lazy::new(|| ChangeHub::new(CHANNEL_CAPACITY));

/// Announce a committed write. Call only after the transaction commits.
pub fn publish(table: &str, kind: ChangeKind, ids: Vec<i64>) {
    if table == cache::ORDERS_TABLE {
        cache::invalidate_orders();
    }
    let delivered = HUB.publish(ChangeEvent::new(table, kind, ids));
    tracing::debug!("Change on {} ({:?}) sent to {} subscriber(s)", table, kind, delivered);
}

pub fn subscribe() -> broadcast::Receiver<ChangeEvent> {
    HUB.subscribe()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::RecvError;

    #[tokio::test]
    async fn test_every_subscriber_receives_event() {
        let hub = ChangeHub::new(8);
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        let sent = hub.publish(ChangeEvent::new("colors", ChangeKind::Insert, vec![4]));
        assert_eq!(sent, 2);

        let a = first.recv().await.unwrap();
        let b = second.recv().await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.table, "colors");
        assert_eq!(a.ids, vec![4]);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_not_an_error() {
        let hub = ChangeHub::new(8);
        assert_eq!(
            hub.publish(ChangeEvent::new("orders", ChangeKind::Delete, vec![1])),
            0
        );
    }

    #[tokio::test]
    async fn test_slow_subscriber_lags() {
        let hub = ChangeHub::new(2);
        let mut rx = hub.subscribe();
        for id in 0..5 {
            hub.publish(ChangeEvent::new("orders", ChangeKind::Update, vec![id]));
        }
        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(_))));
        // After the lag the receiver continues with the newest events
        assert!(rx.recv().await.is_ok());
    }
}
