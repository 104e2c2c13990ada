// src/main.rs
mod config;
mod events;
mod hints;
mod input;
mod models;
mod network;
mod pages;
mod store;
mod theme;
mod toast;
mod ui;
mod utils;

use std::fs;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    terminal,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::events::EconomyEvents;
use crate::hints::HintSystem;
use crate::models::Page;
use crate::store::DismissedHints;
use crate::theme::Theme;
use crate::toast::Toasts;

#[derive(Parser, Debug)]
#[command(name = "ecodash")]
#[command(about = "Terminal dashboard for a Discord economy bot, with contextual hints")]
struct Args {
    /// Page to open: dashboard, guilds, inventory, shop, investments, events or home
    #[arg(short, long)]
    page: Option<String>,

    /// Override the dashboard API base URL
    #[arg(long)]
    api_base: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::new()?;

    let data_dir = settings.resolved_data_dir();
    fs::create_dir_all(&data_dir)?;

    // stderr belongs to the TUI, so logs go to a file in the data dir
    let log_file = fs::File::create(data_dir.join("ecodash.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let base_url = args
        .api_base
        .clone()
        .unwrap_or_else(|| settings.api_base_url.clone());
    let mut page = args
        .page
        .as_deref()
        .or(settings.default_page.as_deref())
        .and_then(Page::from_key)
        .unwrap_or(Page::Home);
    let timing = settings.hint_timing();
    let dismissed_path = data_dir.join("dismissed_hints.json");
    let events_path = data_dir.join("active_events.json");

    info!(page = page.key(), %base_url, "starting ecodash");

    let rt = tokio::runtime::Runtime::new()?;

    let mut hints = HintSystem::new(page, DismissedHints::load(dismissed_path.clone()), timing);
    hints.spawn_fetch(&rt, base_url.clone());
    let mut nav_hint_at = input::nav_hint_deadline(page, Instant::now());

    let mut toasts = Toasts::new();
    let mut events = EconomyEvents::load(events_path);
    events.check_for_events(&mut toasts, Instant::now());

    let mut selected_row = 0usize;
    let theme = Theme::default();

    terminal::enable_raw_mode()?;
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        let now = Instant::now();
        hints.tick(now);
        toasts.prune(now);
        if let Some(at) = nav_hint_at {
            if now >= at {
                hints.show_hint_by_id("navigation-help", false);
                nav_hint_at = None;
            }
        }

        let hint_state = hints.state();
        terminal.draw(|f| {
            ui::render(f, page, selected_row, &hint_state, &toasts, &events, &theme);
        })?;

        if event::poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key_event) = event::read()? {
                let keep_running = input::handle_key(
                    key_event.code,
                    &mut page,
                    &mut selected_row,
                    &mut nav_hint_at,
                    &mut hints,
                    &mut toasts,
                    &mut events,
                    timing,
                    &base_url,
                    &dismissed_path,
                    &rt,
                )?;
                if !keep_running {
                    break;
                }
            }
        }
    }

    hints.teardown();
    terminal::disable_raw_mode()?;
    Ok(())
}
