use std::time::Instant;

/// Marker page every fetched hint is additionally tagged with.
pub const GLOBAL_PAGE: &str = "global";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Page {
    Dashboard,
    Guilds,
    Inventory,
    Shop,
    Investments,
    Events,
    Home,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Guilds,
        Page::Inventory,
        Page::Shop,
        Page::Investments,
        Page::Events,
        Page::Home,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Guilds => "guilds",
            Page::Inventory => "inventory",
            Page::Shop => "shop",
            Page::Investments => "investments",
            Page::Events => "events",
            Page::Home => "home",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Guilds => "Guilds",
            Page::Inventory => "Inventory",
            Page::Shop => "Shop",
            Page::Investments => "Investments",
            Page::Events => "Events",
            Page::Home => "Home",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Pages with region-specific hint triggers. The rest get a one-shot
    /// navigation hint a while after they become active.
    pub fn has_region_triggers(&self) -> bool {
        matches!(
            self,
            Page::Shop | Page::Inventory | Page::Investments | Page::Events
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hint {
    pub id: String,
    pub title: Option<String>,
    pub text: String,
    pub pages: Vec<String>,
}

impl Hint {
    pub fn applies_to(&self, page: &str) -> bool {
        self.pages.iter().any(|p| p == page)
    }
}

/// Ephemeral display session for the hint overlay. Reset on every show and
/// hide; the struct itself is created once and reused.
#[derive(Default)]
pub struct HintOverlay {
    pub visible: bool,
    pub title: Option<String>,
    pub text: String,
    pub user_triggered: bool,
    /// Id of the hint on screen, the candidate for permanent dismissal.
    pub current_id: Option<String>,
    /// "Don't show this tip again" checkbox state.
    pub dont_show_again: bool,
    /// Armed only for automatic hints. A newer show replaces or clears it,
    /// so a stale deadline never hides a hint shown after it was armed.
    pub hide_at: Option<Instant>,
}

impl HintOverlay {
    pub fn show(&mut self, hint: &Hint, user_triggered: bool, hide_at: Option<Instant>) {
        self.visible = true;
        self.title = hint.title.clone();
        self.text = hint.text.clone();
        self.user_triggered = user_triggered;
        self.current_id = Some(hint.id.clone());
        self.dont_show_again = false;
        self.hide_at = hide_at;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_at = None;
    }
}
