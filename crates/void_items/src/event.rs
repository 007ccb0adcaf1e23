//! Registry notifications
//!
//! Fire-and-forget: listeners run synchronously after the registry mutation
//! completes, channel subscribers receive a copy on an unbounded queue.

use crate::definition::ItemKey;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};

/// Registry events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// `initialize` finished loading the default items
    Initialized,
    /// A definition was accepted
    DefinitionRegistered { key: ItemKey },
}

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

type Listener = Box<dyn Fn(&RegistryEvent) + Send + Sync>;

/// Observer list and channel fan-out for [`RegistryEvent`]s
pub struct RegistryEvents {
    listeners: RwLock<Vec<(SubscriberId, Listener)>>,
    channels: Mutex<Vec<Sender<RegistryEvent>>>,
    next_subscriber_id: AtomicU64,
}

impl RegistryEvents {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            channels: Mutex::new(Vec::new()),
            next_subscriber_id: AtomicU64::new(1),
        }
    }

    /// Register a listener.
    ///
    /// Listeners must not subscribe or unsubscribe from inside the callback.
    pub fn subscribe<F>(&self, listener: F) -> SubscriberId
    where
        F: Fn(&RegistryEvent) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sub_id, _)| *sub_id != id);
        listeners.len() != before
    }

    /// Open a channel receiving every subsequent event.
    ///
    /// Dropping the receiver unsubscribes it on the next emit.
    pub fn channel(&self) -> Receiver<RegistryEvent> {
        let (tx, rx) = unbounded();
        self.channels.lock().push(tx);
        rx
    }

    /// Number of closure listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Remove all listeners and channels
    pub fn clear(&self) {
        self.listeners.write().clear();
        self.channels.lock().clear();
    }

    pub(crate) fn emit(&self, event: RegistryEvent) {
        for (_, listener) in self.listeners.read().iter() {
            listener(&event);
        }

        self.channels
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for RegistryEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegistryEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEvents")
            .field("listeners", &self.listeners.read().len())
            .field("channels", &self.channels.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    #[test]
    fn test_listener() {
        let events = RegistryEvents::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        events.subscribe(move |event| {
            if let RegistryEvent::DefinitionRegistered { .. } = event {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        events.emit(RegistryEvent::DefinitionRegistered { key: "rope".into() });
        events.emit(RegistryEvent::Initialized);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let events = RegistryEvents::new();
        let id = events.subscribe(|_| {});

        assert_eq!(events.listener_count(), 1);
        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_channel() {
        let events = RegistryEvents::new();
        let rx = events.channel();

        events.emit(RegistryEvent::DefinitionRegistered { key: "flint".into() });
        events.emit(RegistryEvent::Initialized);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                RegistryEvent::DefinitionRegistered { key: "flint".into() },
                RegistryEvent::Initialized,
            ]
        );
    }

    #[test]
    fn test_dropped_channel_is_pruned() {
        let events = RegistryEvents::new();
        drop(events.channel());
        let kept = events.channel();

        events.emit(RegistryEvent::Initialized);

        assert_eq!(events.channels.lock().len(), 1);
        assert_eq!(kept.try_recv(), Ok(RegistryEvent::Initialized));
    }
}
