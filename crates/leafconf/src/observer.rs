//! Observer / subject protocol used to broadcast config changes.
//!
//! A schema type becomes a [`Subject`] by holding an [`Observers`] registry
//! (usually a `#[serde(skip)]` field) and exposing it through two accessors.
//! The store then calls [`Subject::notify`] after every load, revert, or
//! explicit modification.
//!
//! # Lifetimes (for beginners)
//!
//! The registry stores [`Weak`] references.  It never keeps an observer alive:
//! the code that created the `Arc<dyn Observer>` owns it.  Once the last `Arc`
//! is dropped the registration simply stops firing and is cleaned up on the
//! next subscribe/unsubscribe, so there is no way to call into a destroyed
//! observer.

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::trace;

/// Why the live configuration values changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigEvent {
    /// Values were (re)loaded from disk, or defaults applied because no file exists.
    Loaded,
    /// Values were reset to the compiled-in defaults.
    Reverted,
    /// Values were changed through [`crate::Config::modify`].
    Modified,
}

impl fmt::Display for ConfigEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigEvent::Loaded => "loaded",
            ConfigEvent::Reverted => "reverted",
            ConfigEvent::Modified => "modified",
        };
        f.write_str(name)
    }
}

/// Receives change notifications from a [`Subject`].
///
/// `update` takes `&self`; observers that record state use interior
/// mutability (atomics, `Mutex`).
#[cfg_attr(test, mockall::automock)]
pub trait Observer: Send + Sync {
    fn update(&self, event: ConfigEvent);
}

struct FnObserver<F>(F);

impl<F> Observer for FnObserver<F>
where
    F: Fn(ConfigEvent) + Send + Sync,
{
    fn update(&self, event: ConfigEvent) {
        (self.0)(event)
    }
}

/// Wraps a closure as an observer.
///
/// ```rust
/// use leafconf::{observer_fn, ConfigEvent, Observers};
///
/// let observer = observer_fn(|event| println!("config {event}"));
/// let mut observers = Observers::default();
/// assert!(observers.subscribe(&observer));
/// observers.notify(ConfigEvent::Loaded);
/// ```
pub fn observer_fn<F>(f: F) -> Arc<dyn Observer>
where
    F: Fn(ConfigEvent) + Send + Sync + 'static,
{
    Arc::new(FnObserver(f))
}

/// Registry of weakly-held observers, kept in registration order.
///
/// Cloning shares the registrations.  Two registries always compare equal:
/// who is listening is not part of a configuration's value, so a schema type
/// can derive `PartialEq` with an `Observers` field.
#[derive(Clone, Default)]
pub struct Observers {
    entries: Vec<Weak<dyn Observer>>,
}

impl Observers {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer`.  Returns `false` if it was already registered.
    pub fn subscribe(&mut self, observer: &Arc<dyn Observer>) -> bool {
        self.prune();
        let weak = Arc::downgrade(observer);
        if self.entries.iter().any(|existing| Weak::ptr_eq(existing, &weak)) {
            return false;
        }
        self.entries.push(weak);
        true
    }

    /// Removes `observer`.  Returns `false` (and does nothing) if it was not
    /// registered.
    pub fn unsubscribe(&mut self, observer: &Arc<dyn Observer>) -> bool {
        self.prune();
        let weak = Arc::downgrade(observer);
        let before = self.entries.len();
        self.entries.retain(|existing| !Weak::ptr_eq(existing, &weak));
        self.entries.len() != before
    }

    /// Calls every live observer with `event`, in registration order.
    ///
    /// The live set is snapshotted first, so an observer that drops another
    /// observer during the pass does not disturb iteration.
    pub fn notify(&self, event: ConfigEvent) {
        let live: Vec<Arc<dyn Observer>> = self.entries.iter().filter_map(Weak::upgrade).collect();
        trace!(%event, observers = live.len(), "notifying observers");
        for observer in live {
            observer.update(event);
        }
    }

    /// Number of registered observers that are still alive.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn prune(&mut self) {
        self.entries.retain(|w| w.strong_count() > 0);
    }
}

impl PartialEq for Observers {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("live", &self.len()).finish()
    }
}

/// A type that broadcasts [`ConfigEvent`]s to registered observers.
///
/// Implementors only provide access to their [`Observers`] registry; the
/// subscribe/unsubscribe/notify operations are provided.
pub trait Subject {
    fn observers(&self) -> &Observers;

    fn observers_mut(&mut self) -> &mut Observers;

    fn subscribe(&mut self, observer: &Arc<dyn Observer>) -> bool {
        self.observers_mut().subscribe(observer)
    }

    fn unsubscribe(&mut self, observer: &Arc<dyn Observer>) -> bool {
        self.observers_mut().unsubscribe(observer)
    }

    fn notify(&self, event: ConfigEvent) {
        self.observers().notify(event)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::predicate::eq;

    use super::*;

    fn recording(log: &Arc<Mutex<Vec<String>>>, name: &'static str) -> Arc<dyn Observer> {
        let log = Arc::clone(log);
        observer_fn(move |event| {
            log.lock().unwrap().push(format!("{name}:{event}"));
        })
    }

    #[test]
    fn test_registry_starts_empty() {
        let observers = Observers::new();
        assert!(observers.is_empty());
        assert_eq!(observers.len(), 0);
    }

    #[test]
    fn test_notify_calls_mock_observer_once_with_payload() {
        // Arrange
        let mut mock = MockObserver::new();
        mock.expect_update()
            .with(eq(ConfigEvent::Reverted))
            .times(1)
            .return_const(());
        let observer: Arc<dyn Observer> = Arc::new(mock);
        let mut observers = Observers::new();
        observers.subscribe(&observer);

        // Act
        observers.notify(ConfigEvent::Reverted);

        // Assert – expectations are verified when `observer` is dropped.
    }

    #[test]
    fn test_notify_runs_in_registration_order() {
        // Arrange
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = recording(&log, "first");
        let second = recording(&log, "second");
        let third = recording(&log, "third");
        let mut observers = Observers::new();
        observers.subscribe(&first);
        observers.subscribe(&second);
        observers.subscribe(&third);

        // Act
        observers.notify(ConfigEvent::Loaded);

        // Assert
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:loaded", "second:loaded", "third:loaded"]
        );
    }

    #[test]
    fn test_duplicate_subscription_is_ignored() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let observer = recording(&log, "dup");
        let mut observers = Observers::new();

        assert!(observers.subscribe(&observer));
        assert!(!observers.subscribe(&observer));
        observers.notify(ConfigEvent::Modified);

        assert_eq!(observers.len(), 1);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unsubscribe_removes_observer() {
        // Arrange
        let log = Arc::new(Mutex::new(Vec::new()));
        let kept = recording(&log, "kept");
        let removed = recording(&log, "removed");
        let mut observers = Observers::new();
        observers.subscribe(&kept);
        observers.subscribe(&removed);

        // Act
        let was_registered = observers.unsubscribe(&removed);
        observers.notify(ConfigEvent::Loaded);

        // Assert
        assert!(was_registered);
        assert_eq!(*log.lock().unwrap(), vec!["kept:loaded"]);
    }

    #[test]
    fn test_unsubscribe_unknown_observer_is_noop() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stranger = recording(&log, "stranger");
        let mut observers = Observers::new();
        assert!(!observers.unsubscribe(&stranger));
        assert!(observers.is_empty());
    }

    #[test]
    fn test_dropped_observer_is_skipped_and_pruned() {
        // Arrange
        let log = Arc::new(Mutex::new(Vec::new()));
        let survivor = recording(&log, "survivor");
        let mut observers = Observers::new();
        {
            let transient = recording(&log, "transient");
            observers.subscribe(&transient);
        }
        observers.subscribe(&survivor);

        // Act
        observers.notify(ConfigEvent::Loaded);

        // Assert
        assert_eq!(observers.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["survivor:loaded"]);
    }

    #[test]
    fn test_registries_always_compare_equal() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let observer = recording(&log, "x");
        let mut a = Observers::new();
        a.subscribe(&observer);
        assert_eq!(a, Observers::new());
    }

    #[test]
    fn test_clone_shares_registrations() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let observer = recording(&log, "shared");
        let mut original = Observers::new();
        original.subscribe(&observer);

        let copy = original.clone();
        copy.notify(ConfigEvent::Loaded);

        assert_eq!(copy.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["shared:loaded"]);
    }

    #[test]
    fn test_clear_removes_everything() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let observer = recording(&log, "x");
        let mut observers = Observers::new();
        observers.subscribe(&observer);
        observers.clear();
        assert!(observers.is_empty());
    }

    #[test]
    fn test_config_event_display() {
        assert_eq!(ConfigEvent::Loaded.to_string(), "loaded");
        assert_eq!(ConfigEvent::Reverted.to_string(), "reverted");
        assert_eq!(ConfigEvent::Modified.to_string(), "modified");
    }
}
