use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::seq::IndexedRandom;
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::models::{Hint, HintOverlay, Page};
use crate::network;
use crate::store::DismissedHints;

/// The two ways this subsystem can degrade. Neither reaches the user: the
/// catalog or the dismissal list just ends up empty.
#[derive(Debug, Error)]
pub enum HintError {
    #[error("hint provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("persisted hint state unreadable: {0}")]
    StoreCorrupt(String),
}

#[derive(Clone, Copy, Debug)]
pub struct HintTiming {
    /// Delay before the first automatic hint after the catalog loads.
    pub initial_delay: Duration,
    /// Interval between automatic hint attempts.
    pub rotation_every: Duration,
    /// How long an automatic hint stays on screen.
    pub dwell: Duration,
}

impl Default for HintTiming {
    fn default() -> Self {
        HintTiming {
            initial_delay: Duration::from_secs(5),
            rotation_every: Duration::from_secs(120),
            dwell: Duration::from_secs(10),
        }
    }
}

impl HintTiming {
    pub fn from_secs(initial_delay: u64, rotation_every: u64, dwell: u64) -> Self {
        HintTiming {
            initial_delay: Duration::from_secs(initial_delay),
            rotation_every: Duration::from_secs(rotation_every),
            dwell: Duration::from_secs(dwell),
        }
    }
}

/// Everything the controller owns: the catalog for the current page, the
/// dismissal set and the overlay display session. Shared between the event
/// loop and the rotation task behind one mutex.
pub struct HintState {
    pub page: Page,
    catalog: HashMap<String, Vec<Hint>>,
    pub loaded: bool,
    pub dismissed: DismissedHints,
    pub overlay: HintOverlay,
}

impl HintState {
    fn new(page: Page, dismissed: DismissedHints) -> Self {
        HintState {
            page,
            catalog: HashMap::new(),
            loaded: false,
            dismissed,
            overlay: HintOverlay::default(),
        }
    }

    /// Replaces the catalog wholesale. An empty list is the degraded case
    /// after a provider failure; rotation then simply never shows anything.
    pub fn apply_catalog(&mut self, hints: Vec<Hint>) {
        self.catalog.clear();
        if !hints.is_empty() {
            self.catalog.insert("page".to_string(), hints);
        }
        self.loaded = true;
    }

    pub fn find_hint(&self, id: &str) -> Option<&Hint> {
        self.catalog
            .values()
            .flatten()
            .find(|h| h.id == id && h.applies_to(self.page.key()))
    }

    /// Uniform choice among hints tagged for the current page and not
    /// dismissed. The eligible subset shrinks as hints get dismissed.
    pub fn pick_random_eligible(&self) -> Option<&Hint> {
        let eligible: Vec<&Hint> = self
            .catalog
            .values()
            .flatten()
            .filter(|h| h.applies_to(self.page.key()) && !self.dismissed.contains(&h.id))
            .collect();
        eligible.choose(&mut rand::rng()).copied()
    }

    /// No-op for dismissed ids. Automatic hints get a hide deadline `dwell`
    /// from now; user-triggered ones stay until closed.
    pub fn show_hint(&mut self, hint: &Hint, user_triggered: bool, now: Instant, dwell: Duration) {
        if self.dismissed.contains(&hint.id) {
            return;
        }
        let hide_at = (!user_triggered).then(|| now + dwell);
        self.overlay.show(hint, user_triggered, hide_at);
    }

    pub fn hide_hint(&mut self) {
        self.overlay.hide();
    }

    /// One automatic rotation attempt. Not-yet-loaded means nothing to
    /// show; a tick while a hint is visible is skipped, not queued.
    pub fn rotation_tick(&mut self, now: Instant, dwell: Duration) {
        if !self.loaded || self.overlay.visible {
            return;
        }
        if let Some(hint) = self.pick_random_eligible().cloned() {
            self.show_hint(&hint, false, now, dwell);
        }
    }

    /// Applies the auto-hide deadline. Returns true when the overlay state
    /// changed.
    pub fn apply_deadlines(&mut self, now: Instant) -> bool {
        if self.overlay.visible {
            if let Some(hide_at) = self.overlay.hide_at {
                if now >= hide_at {
                    self.overlay.hide();
                    return true;
                }
            }
        }
        false
    }
}

/// The hint rotation controller. Constructed once per page view and handed
/// to whatever needs it; there is no ambient instance.
pub struct HintSystem {
    state: Arc<Mutex<HintState>>,
    timing: HintTiming,
    rotation: CancellationToken,
}

impl HintSystem {
    pub fn new(page: Page, dismissed: DismissedHints, timing: HintTiming) -> Self {
        HintSystem {
            state: Arc::new(Mutex::new(HintState::new(page, dismissed))),
            timing,
            rotation: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> Arc<Mutex<HintState>> {
        self.state.clone()
    }

    pub fn page(&self) -> Page {
        self.state.lock().unwrap().page
    }

    /// Kicks off the one-shot catalog fetch. When it resolves, success or
    /// failure, the rotation loop starts against whatever catalog remains.
    pub fn spawn_fetch(&self, rt: &Runtime, base_url: String) {
        let state = self.state.clone();
        let timing = self.timing;
        let token = self.rotation.clone();
        let page = self.page();
        rt.spawn(async move {
            match network::fetch_hints(&base_url, page.key()).await {
                Ok(hints) => {
                    debug!(page = page.key(), count = hints.len(), "hint catalog loaded");
                    state.lock().unwrap().apply_catalog(hints);
                }
                Err(e) => {
                    warn!(page = page.key(), "{e}, continuing without hints");
                    state.lock().unwrap().apply_catalog(Vec::new());
                }
            }
            run_rotation(state, timing, token).await;
        });
    }

    /// Shows a specific hint, bypassing the random rotation. Unknown ids
    /// and ids not tagged for the current page are silently ignored.
    pub fn show_hint_by_id(&self, id: &str, user_triggered: bool) {
        let mut state = self.state.lock().unwrap();
        if let Some(hint) = state.find_hint(id).cloned() {
            state.show_hint(&hint, user_triggered, Instant::now(), self.timing.dwell);
        }
    }

    pub fn toggle_dont_show_again(&self) {
        let mut state = self.state.lock().unwrap();
        if state.overlay.visible {
            state.overlay.dont_show_again = !state.overlay.dont_show_again;
        }
    }

    /// Explicit close. Honors the opt-out checkbox: the visible hint id is
    /// added to the dismissal set and persisted before the overlay hides.
    pub fn close_visible(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.overlay.visible {
            return;
        }
        if state.overlay.dont_show_again {
            if let Some(id) = state.overlay.current_id.clone() {
                state.dismissed.insert(&id);
            }
        }
        state.hide_hint();
    }

    pub fn dismiss_permanently(&self, id: &str) {
        self.state.lock().unwrap().dismissed.insert(id);
    }

    /// Body of the visible hint, for the clipboard.
    pub fn visible_text(&self) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.overlay.visible.then(|| state.overlay.text.clone())
    }

    /// Main-loop tick: expires the auto-hide deadline.
    pub fn tick(&self, now: Instant) -> bool {
        self.state.lock().unwrap().apply_deadlines(now)
    }

    /// Cancels the rotation task and clears the overlay. Required before
    /// discarding the controller; also run by Drop as a backstop.
    pub fn teardown(&self) {
        self.rotation.cancel();
        self.state.lock().unwrap().hide_hint();
    }
}

impl Drop for HintSystem {
    fn drop(&mut self) {
        self.rotation.cancel();
    }
}

async fn run_rotation(state: Arc<Mutex<HintState>>, timing: HintTiming, token: CancellationToken) {
    tokio::select! {
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(timing.initial_delay) => {}
    }
    state.lock().unwrap().rotation_tick(Instant::now(), timing.dwell);
    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(timing.rotation_every) => {}
        }
        state.lock().unwrap().rotation_tick(Instant::now(), timing.dwell);
    }
}
