use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastKind {
    Info,
    Success,
    Error,
    Event,
}

pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

/// Corner notification stack. At most `max_visible` entries at a time, the
/// oldest evicted early; every entry expires `ttl` after creation.
pub struct Toasts {
    items: VecDeque<Toast>,
    max_visible: usize,
    ttl: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Toasts {
            items: VecDeque::new(),
            max_visible: 3,
            ttl: Duration::from_secs(5),
        }
    }
}

impl Toasts {
    pub fn new() -> Self {
        Toasts::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.items.push_back(Toast {
            message: message.into(),
            kind,
            created: now,
        });
        while self.items.len() > self.max_visible {
            self.items.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Info, message, now);
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Success, message, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Error, message, now);
    }

    pub fn event(&mut self, message: impl Into<String>, now: Instant) {
        self.push(ToastKind::Event, message, now);
    }

    /// Drops expired toasts. Returns true when anything changed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items.retain(|t| now.duration_since(t.created) < ttl);
        self.items.len() != before
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
