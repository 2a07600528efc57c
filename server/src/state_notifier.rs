use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::{GameId, SubscriptionId, log};
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub type StateChangeHandler = Arc<dyn Fn(&GameId) + Send + Sync>;

/// Subscriber list for "game changed" signals. Delivery is synchronous fan-out
/// at `notify` time with no queueing, so a handler registered afterwards never
/// sees earlier notifications.
#[derive(Clone)]
pub struct StateNotifier {
    handlers: Arc<Mutex<HashMap<SubscriptionId, StateChangeHandler>>>,
    channels: Arc<Mutex<HashMap<SubscriptionId, UnboundedSender<GameId>>>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for StateNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateNotifier").finish()
    }
}

impl Default for StateNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StateNotifier {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(HashMap::new())),
            channels: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    fn next_subscription_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub async fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&GameId) + Send + Sync + 'static,
    {
        let id = self.next_subscription_id();
        self.handlers.lock().await.insert(id, Arc::new(handler));
        log!("Subscriber {} registered", id);
        id
    }

    /// Forwards every notified id into an unbounded channel. The subscription
    /// is dropped by the first `notify` after the receiver goes away.
    pub async fn subscribe_channel(&self) -> (SubscriptionId, UnboundedReceiver<GameId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_subscription_id();
        self.channels.lock().await.insert(id, tx);
        log!("Channel subscriber {} registered", id);
        (id, rx)
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.lock().await.remove(&id).is_some()
            || self.channels.lock().await.remove(&id).is_some();
        if removed {
            log!("Subscriber {} removed", id);
        }
        removed
    }

    pub async fn subscriber_count(&self) -> usize {
        self.handlers.lock().await.len() + self.channels.lock().await.len()
    }

    /// Invokes every registered handler once, forwards to every open channel,
    /// and returns how many subscribers received the id.
    pub async fn notify(&self, game_id: &GameId) -> usize {
        let handlers: Vec<StateChangeHandler> =
            self.handlers.lock().await.values().cloned().collect();

        for handler in &handlers {
            handler(game_id);
        }

        let mut channels = self.channels.lock().await;
        channels.retain(|id, tx| match tx.send(*game_id) {
            Ok(()) => true,
            Err(e) => {
                log!("[game:{}] Dropping channel subscriber {}: {}", game_id, id, e);
                false
            }
        });
        handlers.len() + channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_handler(counter: &Arc<AtomicUsize>) -> impl Fn(&GameId) + Send + Sync + 'static {
        let counter = counter.clone();
        move |_: &GameId| {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_notify_invokes_every_subscriber_once() {
        let notifier = StateNotifier::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        notifier.subscribe(counting_handler(&first)).await;
        notifier.subscribe(counting_handler(&second)).await;

        let invoked = notifier.notify(&GameId::generate()).await;

        assert_eq!(invoked, 2);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handler_receives_notified_id() {
        let notifier = StateNotifier::new();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = seen.clone();
        notifier
            .subscribe(move |id: &GameId| sink.lock().unwrap().push(*id))
            .await;
        let game_id = GameId::generate();

        notifier.notify(&game_id).await;

        assert_eq!(*seen.lock().unwrap(), vec![game_id]);
    }

    #[tokio::test]
    async fn test_unsubscribed_handler_not_invoked() {
        let notifier = StateNotifier::new();
        let kept = Arc::new(AtomicUsize::new(0));
        let removed = Arc::new(AtomicUsize::new(0));
        notifier.subscribe(counting_handler(&kept)).await;
        let id = notifier.subscribe(counting_handler(&removed)).await;

        assert!(notifier.unsubscribe(id).await);
        notifier.notify(&GameId::generate()).await;

        assert_eq!(kept.load(Ordering::SeqCst), 1);
        assert_eq!(removed.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_id() {
        let notifier = StateNotifier::new();

        assert!(!notifier.unsubscribe(SubscriptionId::new(99)).await);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_notify() {
        let notifier = StateNotifier::new();
        notifier.notify(&GameId::generate()).await;

        let (_, mut rx) = notifier.subscribe_channel().await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_channel_subscription_receives_ids() {
        let notifier = StateNotifier::new();
        let (_, mut rx) = notifier.subscribe_channel().await;
        let game_id = GameId::generate();

        notifier.notify(&game_id).await;

        assert_eq!(rx.recv().await, Some(game_id));
    }

    #[tokio::test]
    async fn test_dropped_channel_receivers_are_removed_on_notify() {
        let notifier = StateNotifier::new();
        let mut receivers = Vec::new();
        for _ in 0..100 {
            receivers.push(notifier.subscribe_channel().await.1);
        }
        let (_, mut kept) = notifier.subscribe_channel().await;
        assert_eq!(notifier.subscriber_count().await, 101);
        drop(receivers);

        let game_id = GameId::generate();
        let delivered = notifier.notify(&game_id).await;

        assert_eq!(delivered, 1);
        assert_eq!(notifier.subscriber_count().await, 1);
        assert_eq!(kept.recv().await, Some(game_id));
    }

    #[tokio::test]
    async fn test_unsubscribe_channel() {
        let notifier = StateNotifier::new();
        let (id, mut rx) = notifier.subscribe_channel().await;

        assert!(notifier.unsubscribe(id).await);
        notifier.notify(&GameId::generate()).await;

        assert_eq!(notifier.subscriber_count().await, 0);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_subscription_ids_are_unique() {
        let notifier = StateNotifier::new();

        let first = notifier.subscribe(|_: &GameId| {}).await;
        let second = notifier.subscribe(|_: &GameId| {}).await;

        assert_ne!(first, second);
    }
}
