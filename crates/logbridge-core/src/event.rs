//! Event emitters and disposable subscriptions
//!
//! Listeners are registered with [`Emitter::subscribe`], which hands back a
//! [`Subscription`]. Releasing the subscription (explicitly or on drop) removes
//! the listener; a released listener is never invoked again, even by a `fire`
//! already in progress.

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T> {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Listener<T>,
}

struct EmitterInner<T> {
    listeners: RwLock<Vec<Entry<T>>>,
    next_id: AtomicU64,
}

/// Synchronous, ordered event emitter
pub struct Emitter<T> {
    inner: Arc<EmitterInner<T>>,
}

impl<T: 'static> Emitter<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(EmitterInner {
                listeners: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a listener; it stays registered until the subscription is released
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let active = Arc::new(AtomicBool::new(true));
        self.inner.listeners.write().push(Entry {
            id,
            active: active.clone(),
            listener: Arc::new(listener),
        });

        let weak: Weak<EmitterInner<T>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            active.store(false, Ordering::SeqCst);
            if let Some(inner) = weak.upgrade() {
                inner.listeners.write().retain(|entry| entry.id != id);
            }
        })
    }

    /// Deliver `event` to every live listener, in subscription order
    pub fn fire(&self, event: &T) {
        // Snapshot so listeners may subscribe or release without deadlocking
        let snapshot: Vec<(Arc<AtomicBool>, Listener<T>)> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|entry| (entry.active.clone(), entry.listener.clone()))
            .collect();

        for (active, listener) in snapshot {
            if active.load(Ordering::SeqCst) {
                listener(event);
            }
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Disposer token for a registered listener
///
/// Releasing is idempotent and also happens on drop.
#[must_use = "dropping a subscription releases its listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wrap a release action
    pub fn new<F>(release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release
    pub fn empty() -> Self {
        Self { release: None }
    }

    pub fn dispose(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.release.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Owned set of subscriptions released together, exactly once
pub struct DisposableStore {
    disposed: AtomicBool,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl DisposableStore {
    pub fn new() -> Self {
        Self {
            disposed: AtomicBool::new(false),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Take ownership of a subscription
    ///
    /// Adding to a store that is already disposed releases the subscription
    /// immediately.
    pub fn add(&self, mut subscription: Subscription) {
        let mut subscriptions = self.subscriptions.lock();
        if self.is_disposed() {
            drop(subscriptions);
            tracing::warn!("subscription added to a disposed store; releasing it");
            subscription.dispose();
            return;
        }
        subscriptions.push(subscription);
    }

    /// Release every owned subscription
    ///
    /// Returns `true` on the first call and `false` afterwards.
    pub fn dispose(&self) -> bool {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return false;
        }
        let subscriptions = std::mem::take(&mut *self.subscriptions.lock());
        for mut subscription in subscriptions {
            subscription.dispose();
        }
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DisposableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DisposableStore {
    fn drop(&mut self) {
        self.dispose();
    }
}
