//! Realtime channel client.
//!
//! [`RealtimeClient`] is an explicitly constructed handle to topic-based
//! pub/sub channels. It is created at startup, passed down to whoever needs
//! it, and shut down on exit. There is no process-wide instance.
//!
//! Subscribing returns a [`Subscription`] that releases itself when dropped,
//! so leaving a scope is enough to unsubscribe.
//!
//! # Invariants
//!
//! - A dropped [`Subscription`] is removed from its topic before `drop`
//!   returns.
//! - After [`RealtimeClient::shutdown`], `subscribe` and `publish` fail with
//!   [`RealtimeError::Closed`] and every live subscription reaches end of
//!   stream.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use tokio::sync::mpsc;

use crate::RealtimeError;

/// Handle to realtime channels carrying messages of type `T`.
///
/// Cloning yields another handle to the same channels.
pub struct RealtimeClient<T> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for RealtimeClient<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

struct Registry<T> {
    /// Topic -> subscriber ID -> sender.
    topics: HashMap<String, HashMap<u64, mpsc::UnboundedSender<T>>>,
    next_id: u64,
    closed: bool,
}

impl<T> Registry<T> {
    fn remove(&mut self, topic: &str, id: u64) -> bool {
        let Some(subscribers) = self.topics.get_mut(topic) else {
            return false;
        };
        let removed = subscribers.remove(&id).is_some();
        if subscribers.is_empty() {
            self.topics.remove(topic);
        }
        removed
    }
}

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + Send + 'static> RealtimeClient<T> {
    /// Create an open client with no topics.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                topics: HashMap::new(),
                next_id: 0,
                closed: false,
            })),
        }
    }

    /// Subscribe to `topic`.
    pub fn subscribe(&self, topic: &str) -> Result<Subscription<T>, RealtimeError> {
        if topic.is_empty() {
            return Err(RealtimeError::InvalidTopic(topic.to_string()));
        }

        let mut registry = lock(&*self.inner);
        if registry.closed {
            return Err(RealtimeError::Closed);
        }

        let id = registry.next_id;
        registry.next_id += 1;

        let (tx, rx) = mpsc::unbounded_channel();
        registry.topics.entry(topic.to_string()).or_default().insert(id, tx);
        drop(registry);

        tracing::debug!(topic, id, "subscribed");
        Ok(Subscription { id, topic: topic.to_string(), rx, registry: Arc::downgrade(&self.inner) })
    }

    /// Deliver `message` to every subscriber of `topic`.
    ///
    /// Returns the number of subscribers that received it. Zero subscribers is
    /// not an error.
    pub fn publish(&self, topic: &str, message: T) -> Result<usize, RealtimeError> {
        let mut registry = lock(&*self.inner);
        if registry.closed {
            return Err(RealtimeError::Closed);
        }

        let Some(subscribers) = registry.topics.get_mut(topic) else {
            return Ok(0);
        };

        // Receivers dropped without going through Subscription::drop
        subscribers.retain(|_, tx| !tx.is_closed());

        let delivered =
            subscribers.values().filter(|tx| tx.send(message.clone()).is_ok()).count();
        Ok(delivered)
    }

    /// Number of live subscriptions on `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        lock(&*self.inner).topics.get(topic).map_or(0, HashMap::len)
    }

    /// Close the client. Live subscriptions observe end of stream.
    pub fn shutdown(&self) {
        let mut registry = lock(&*self.inner);
        if registry.closed {
            return;
        }
        registry.closed = true;
        let topics = registry.topics.len();
        registry.topics.clear();
        drop(registry);

        tracing::info!(topics, "realtime client shut down");
    }

    /// Client has been shut down.
    pub fn is_closed(&self) -> bool {
        lock(&*self.inner).closed
    }
}

impl<T: Clone + Send + 'static> Default for RealtimeClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Live subscription to one topic. Unsubscribes on drop.
pub struct Subscription<T> {
    id: u64,
    topic: String,
    rx: mpsc::UnboundedReceiver<T>,
    registry: Weak<Mutex<Registry<T>>>,
}

impl<T> Subscription<T> {
    /// Topic this subscription listens on.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next message. `None` once the client shut down.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Next message if one is queued.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if lock(&*registry).remove(&self.topic, self.id) {
            tracing::debug!(topic = %self.topic, id = self.id, "unsubscribed");
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).field("topic", &self.topic).finish()
    }
}

impl<T> std::fmt::Debug for RealtimeClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = lock(&*self.inner);
        f.debug_struct("RealtimeClient")
            .field("topics", &registry.topics.len())
            .field("closed", &registry.closed)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_every_subscriber() {
        let client = RealtimeClient::<u32>::new();
        let mut a = client.subscribe("call:1").unwrap();
        let mut b = client.subscribe("call:1").unwrap();

        assert_eq!(client.publish("call:1", 7).unwrap(), 2);
        assert_eq!(a.recv().await, Some(7));
        assert_eq!(b.recv().await, Some(7));
    }

    #[test]
    fn publish_without_subscribers_delivers_nothing() {
        let client = RealtimeClient::<u32>::new();
        assert_eq!(client.publish("call:1", 7), Ok(0));
    }

    #[test]
    fn drop_unsubscribes() {
        let client = RealtimeClient::<u32>::new();
        {
            let _sub = client.subscribe("call:1").unwrap();
            assert_eq!(client.subscriber_count("call:1"), 1);
        }
        assert_eq!(client.subscriber_count("call:1"), 0);
        assert_eq!(client.publish("call:1", 1), Ok(0));
    }

    #[test]
    fn topics_are_isolated() {
        let client = RealtimeClient::<u32>::new();
        let mut other = client.subscribe("call:2").unwrap();

        assert_eq!(client.publish("call:1", 1), Ok(0));
        assert_eq!(other.try_recv(), None);
    }

    #[test]
    fn empty_topic_rejected() {
        let client = RealtimeClient::<u32>::new();
        assert!(matches!(client.subscribe(""), Err(RealtimeError::InvalidTopic(_))));
    }

    #[tokio::test]
    async fn shutdown_closes_client_and_ends_subscriptions() {
        let client = RealtimeClient::<u32>::new();
        let mut sub = client.subscribe("call:1").unwrap();

        client.shutdown();

        assert!(client.is_closed());
        assert_eq!(sub.recv().await, None);
        assert!(matches!(client.subscribe("call:1"), Err(RealtimeError::Closed)));
        assert_eq!(client.publish("call:1", 1), Err(RealtimeError::Closed));
    }

    #[test]
    fn subscription_outliving_client_drops_cleanly() {
        let client = RealtimeClient::<u32>::new();
        let sub = client.subscribe("call:1").unwrap();
        drop(client);
        drop(sub);
    }
}
