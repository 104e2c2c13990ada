use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use arboard::Clipboard;
use crossterm::event::KeyCode;
use tokio::runtime::Runtime;

use crate::config;
use crate::events::EconomyEvents;
use crate::hints::{HintSystem, HintTiming};
use crate::models::Page;
use crate::pages;
use crate::store::DismissedHints;
use crate::toast::Toasts;

/// Handles one key press. Returns false when the app should quit.
pub fn handle_key(
    key: KeyCode,
    page: &mut Page,
    selected_row: &mut usize,
    nav_hint_at: &mut Option<Instant>,
    hints: &mut HintSystem,
    toasts: &mut Toasts,
    events: &mut EconomyEvents,
    timing: HintTiming,
    base_url: &str,
    dismissed_path: &Path,
    rt: &Runtime,
) -> Result<bool> {
    match key {
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            switch_page(
                Page::ALL[index],
                page,
                selected_row,
                nav_hint_at,
                hints,
                timing,
                base_url,
                dismissed_path,
                rt,
            );
        }
        KeyCode::Tab => {
            let current = Page::ALL.iter().position(|p| p == page).unwrap_or(0);
            let next = Page::ALL[(current + 1) % Page::ALL.len()];
            switch_page(
                next,
                page,
                selected_row,
                nav_hint_at,
                hints,
                timing,
                base_url,
                dismissed_path,
                rt,
            );
        }
        KeyCode::BackTab => {
            let current = Page::ALL.iter().position(|p| p == page).unwrap_or(0);
            let previous = Page::ALL[(current + Page::ALL.len() - 1) % Page::ALL.len()];
            switch_page(
                previous,
                page,
                selected_row,
                nav_hint_at,
                hints,
                timing,
                base_url,
                dismissed_path,
                rt,
            );
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if *selected_row > 0 {
                *selected_row -= 1;
                trigger_region_hint(*page, *selected_row, hints);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let rows = pages::row_count(*page, events.active().len());
            if rows > 0 && *selected_row < rows - 1 {
                *selected_row += 1;
                trigger_region_hint(*page, *selected_row, hints);
            }
        }
        KeyCode::Char('?') => {
            hints.show_hint_by_id("navigation-help", true);
        }
        KeyCode::Char('d') => {
            hints.toggle_dont_show_again();
        }
        KeyCode::Char('c') => {
            // Copy the visible tip, like any other popup text
            if let Some(text) = hints.visible_text() {
                let mut clipboard = Clipboard::new().ok();
                if let Some(cb) = clipboard.as_mut() {
                    let _ = cb.set_text(text);
                }
            }
        }
        KeyCode::Char('x') => {
            if *page == Page::Events && !events.active().is_empty() {
                events.clear();
                *selected_row = 0;
                toasts.info("Active events cleared", Instant::now());
            }
        }
        KeyCode::Char('S') => {
            let now = Instant::now();
            match config::save_default_page(page.key()) {
                Ok(()) => toasts.success(format!("{} is now the startup page", page.label()), now),
                Err(e) => toasts.error(format!("Could not save config: {}", e), now),
            }
        }
        KeyCode::Esc => {
            hints.close_visible();
        }
        KeyCode::Char('q') => return Ok(false),
        _ => {}
    }
    Ok(true)
}

/// Fresh page view: the old controller is torn down (cancelling its
/// rotation task) and a new one fetches the catalog for the new page.
fn switch_page(
    next: Page,
    page: &mut Page,
    selected_row: &mut usize,
    nav_hint_at: &mut Option<Instant>,
    hints: &mut HintSystem,
    timing: HintTiming,
    base_url: &str,
    dismissed_path: &Path,
    rt: &Runtime,
) {
    if next == *page {
        return;
    }
    *page = next;
    *selected_row = 0;
    hints.teardown();
    *hints = HintSystem::new(next, DismissedHints::load(dismissed_path.to_path_buf()), timing);
    hints.spawn_fetch(rt, base_url.to_string());
    *nav_hint_at = nav_hint_deadline(next, Instant::now());
}

/// Pages without their own trigger regions get the navigation hint a
/// little while after they open.
pub fn nav_hint_deadline(page: Page, now: Instant) -> Option<Instant> {
    if page.has_region_triggers() {
        None
    } else {
        Some(now + std::time::Duration::from_secs(10))
    }
}

/// The terminal stand-in for the original's hover listeners: landing the
/// selection on a notable region requests that region's hint directly.
fn trigger_region_hint(page: Page, row: usize, hints: &HintSystem) {
    match page {
        Page::Shop => {
            if row < pages::SHOP_CATEGORIES.len() {
                hints.show_hint_by_id("shop-categories", true);
            } else if let Some(item) = pages::SHOP_ITEMS.get(row - pages::SHOP_CATEGORIES.len()) {
                if item.tags.contains(&"limited") {
                    hints.show_hint_by_id("limited-items", true);
                }
            }
        }
        Page::Inventory => {
            if let Some(item) = pages::INVENTORY_ITEMS.get(row) {
                if item.tags.contains(&"consumable") {
                    hints.show_hint_by_id("consumable-items", true);
                }
            }
        }
        Page::Investments => {
            hints.show_hint_by_id("investment-duration", true);
        }
        Page::Events => {
            hints.show_hint_by_id("event-effects", true);
        }
        Page::Dashboard | Page::Guilds | Page::Home => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GLOBAL_PAGE;
    use crate::models::Hint;

    fn system_for(page: Page, hints: Vec<Hint>) -> HintSystem {
        let dir = tempfile::tempdir().unwrap();
        let system = HintSystem::new(
            page,
            DismissedHints::load(dir.path().join("d.json")),
            HintTiming::default(),
        );
        system.state().lock().unwrap().apply_catalog(hints);
        system
    }

    fn hint(id: &str) -> Hint {
        Hint {
            id: id.to_string(),
            title: None,
            text: "body".to_string(),
            pages: vec!["shop".to_string(), GLOBAL_PAGE.to_string()],
        }
    }

    #[test]
    fn shop_category_row_requests_the_category_hint() {
        let system = system_for(Page::Shop, vec![hint("shop-categories")]);
        trigger_region_hint(Page::Shop, 0, &system);

        let state = system.state();
        let state = state.lock().unwrap();
        assert!(state.overlay.visible);
        assert!(state.overlay.user_triggered);
        assert_eq!(state.overlay.current_id.as_deref(), Some("shop-categories"));
    }

    #[test]
    fn untagged_shop_item_triggers_nothing() {
        let system = system_for(Page::Shop, vec![hint("limited-items")]);
        // "Color Role" carries no limited tag.
        let untagged_row = pages::SHOP_CATEGORIES.len() + 1;
        trigger_region_hint(Page::Shop, untagged_row, &system);
        assert!(!system.state().lock().unwrap().overlay.visible);
    }

    #[test]
    fn limited_shop_item_requests_the_limited_hint() {
        let system = system_for(Page::Shop, vec![hint("limited-items")]);
        let limited_row = pages::SHOP_CATEGORIES.len()
            + pages::SHOP_ITEMS
                .iter()
                .position(|i| i.tags.contains(&"limited"))
                .unwrap();
        trigger_region_hint(Page::Shop, limited_row, &system);

        let state = system.state();
        let state = state.lock().unwrap();
        assert_eq!(state.overlay.current_id.as_deref(), Some("limited-items"));
    }

    #[test]
    fn nav_hint_is_scheduled_only_without_region_triggers() {
        let now = Instant::now();
        assert!(nav_hint_deadline(Page::Home, now).is_some());
        assert!(nav_hint_deadline(Page::Dashboard, now).is_some());
        assert!(nav_hint_deadline(Page::Shop, now).is_none());
        assert!(nav_hint_deadline(Page::Events, now).is_none());
    }
}
