//! Language toggle: page initialization, switching, and change notification.
//!
//! The controller owns the language store and the document. Listeners learn
//! about switches through a broadcast channel; an optional refresh hook runs
//! after a short delay so layout-dependent collaborators can re-measure.

use crate::applicator::Applicator;
use crate::dom::DomPort;
use crate::error::I18nError;
use crate::i18n::{Language, PassReport, TranslationTable};
use crate::store::{LanguageStore, StoragePort};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Name of the change notification.
pub const LANGUAGE_CHANGED_EVENT: &str = "langchange";

/// Delay between a toggle and the refresh hook.
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(100);

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Published after a toggle has finished rewriting the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageChanged {
    pub language: Language,
    pub changed_at: DateTime<Utc>,
}

impl LanguageChanged {
    pub fn name(&self) -> &'static str {
        LANGUAGE_CHANGED_EVENT
    }
}

/// Collaborator re-run after a toggle, once the refresh delay has elapsed.
pub trait RefreshHook: Send + Sync {
    fn refresh(&self);
}

/// Clears the in-flight flag when dropped, including when a hook panics.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Entry point for page scripts: init, toggle, current language, resolve.
pub struct ToggleController<S, D> {
    store: LanguageStore<S>,
    dom: D,
    table: Arc<TranslationTable>,
    events: broadcast::Sender<LanguageChanged>,
    refresh: Option<Arc<dyn RefreshHook>>,
    refresh_delay: Duration,
    in_flight: Arc<AtomicBool>,
    initialized: bool,
}

impl<S: StoragePort, D: DomPort> ToggleController<S, D> {
    pub fn new(store: LanguageStore<S>, dom: D, table: Arc<TranslationTable>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            dom,
            table,
            events,
            refresh: None,
            refresh_delay: DEFAULT_REFRESH_DELAY,
            in_flight: Arc::new(AtomicBool::new(false)),
            initialized: false,
        }
    }

    pub fn with_refresh_hook(mut self, hook: Arc<dyn RefreshHook>) -> Self {
        self.refresh = Some(hook);
        self
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Receive a `LanguageChanged` for every completed toggle.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    pub fn current_language(&self) -> Language {
        self.store.get()
    }

    pub fn resolve(&self, key: &str, language: Language) -> Option<&str> {
        self.table.resolve(key, language)
    }

    /// Translate the document into the stored language.
    ///
    /// Only the first call runs a pass; later calls return `None`.
    pub fn init(&mut self) -> Option<PassReport> {
        if self.initialized {
            debug!("Localization already initialized, skipping");
            return None;
        }
        self.initialized = true;

        let language = self.store.get();
        info!("Initializing page in '{}'", language);
        Some(Applicator::new(&self.table).apply(&mut self.dom, language))
    }

    /// Switch to the other language, persist it, retranslate the document and
    /// notify listeners.
    ///
    /// A toggle requested before the previous one's refresh delay has elapsed
    /// is rejected with `I18nError::ToggleInFlight` and changes nothing.
    pub fn toggle(&mut self) -> Result<PassReport, I18nError> {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Ignoring language toggle while another is in progress");
            return Err(I18nError::ToggleInFlight);
        };

        let next = self.store.get().other();
        if let Err(e) = self.store.set(next) {
            warn!("Failed to persist language '{}': {}", next, e);
        }

        let report = Applicator::new(&self.table).apply(&mut self.dom, next);
        self.initialized = true;

        let event = LanguageChanged {
            language: next,
            changed_at: Utc::now(),
        };
        match self.events.send(event) {
            Ok(listeners) => debug!("Notified {} listeners of '{}'", listeners, next),
            Err(_) => debug!("No listeners for language change"),
        }

        self.schedule_refresh(guard);
        info!("Language switched to '{}'", next);
        Ok(report)
    }

    /// Whether a toggle is still waiting for its refresh delay.
    pub fn is_toggle_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn schedule_refresh(&self, guard: InFlightGuard) {
        let hook = self.refresh.clone();
        let delay = self.refresh_delay;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    run_refresh(hook);
                    drop(guard);
                });
            }
            Err(_) => {
                debug!("No async runtime, running refresh immediately");
                run_refresh(hook);
                drop(guard);
            }
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn store(&self) -> &LanguageStore<S> {
        &self.store
    }
}

/// Run the refresh hook, containing any panic so a toggle still completes.
fn run_refresh(hook: Option<Arc<dyn RefreshHook>>) {
    let Some(hook) = hook else {
        return;
    };
    if panic::catch_unwind(AssertUnwindSafe(|| hook.refresh())).is_err() {
        warn!("Refresh hook panicked, continuing without refresh");
    }
}
