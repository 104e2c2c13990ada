use std::sync::{Arc, Mutex};

use chrono::Utc;
use once_cell::sync::Lazy;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use regex::Regex;

use crate::events::EconomyEvents;
use crate::hints::HintState;
use crate::models::Page;
use crate::pages;
use crate::theme::Theme;
use crate::toast::{ToastKind, Toasts};
use crate::utils::{format_coins, format_countdown, time_ago};

// Compile the coin-amount regex once for all uses
static COIN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[0-9][0-9,]*").unwrap());

/// Splits `text` into spans with coin amounts highlighted.
fn highlight_coins(text: &str, base: Style, amount: Style) -> Line<'static> {
    let mut spans = vec![];
    let mut last = 0;
    for m in COIN_REGEX.find_iter(text) {
        if m.start() > last {
            spans.push(Span::styled(text[last..m.start()].to_owned(), base));
        }
        spans.push(Span::styled(text[m.start()..m.end()].to_owned(), amount));
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span::styled(text[last..].to_owned(), base));
    }
    Line::from(spans)
}

fn tag_style(tag: &str, theme: &Theme) -> Style {
    match tag {
        "limited" => theme.tag_limited,
        "consumable" => theme.tag_consumable,
        _ => Style::default().fg(theme.text_secondary),
    }
}

fn tag_spans(tags: &[&str], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = vec![];
    for tag in tags {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("[{}]", tag), tag_style(tag, theme)));
    }
    spans
}

/// Renders the whole screen: page sidebar, content panel, footer, toasts
/// and the hint overlay.
pub fn render(
    f: &mut Frame,
    page: Page,
    selected_row: usize,
    hint_state: &Arc<Mutex<HintState>>,
    toasts: &Toasts,
    events: &EconomyEvents,
    theme: &Theme,
) {
    let area = f.area();
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(1)])
        .split(vertical_chunks[0]);

    render_sidebar(f, columns[0], page, theme);
    render_page(f, columns[1], page, selected_row, events, theme);
    render_footer(f, vertical_chunks[1], theme);
    render_toasts(f, area, toasts, theme);
    render_hint_overlay(f, area, hint_state, theme);
}

fn render_sidebar(f: &mut Frame, area: Rect, page: Page, theme: &Theme) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let style = if *p == page {
                theme.page_label_active
            } else {
                theme.page_label
            };
            ListItem::new(Line::from(vec![Span::styled(
                format!("{} {}", i + 1, p.label()),
                style,
            )]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Page::ALL.iter().position(|p| *p == page));
    let block = Block::default()
        .title("Pages [Tab]")
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.focus_border));
    f.render_stateful_widget(
        List::new(items).highlight_symbol("→").block(block),
        area,
        &mut state,
    );
}

fn render_page(
    f: &mut Frame,
    area: Rect,
    page: Page,
    selected_row: usize,
    events: &EconomyEvents,
    theme: &Theme,
) {
    let block = Block::default()
        .title(page.label())
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.focus_border));

    match page {
        Page::Dashboard => {
            let lines = vec![
                Line::from(""),
                Line::from(vec![
                    Span::raw("  Wallet       "),
                    Span::styled(format_coins(pages::WALLET_BALANCE), theme.stat_value),
                ]),
                Line::from(vec![
                    Span::raw("  Bank         "),
                    Span::styled(format_coins(pages::BANK_BALANCE), theme.stat_value),
                ]),
                Line::from(vec![
                    Span::raw("  Daily streak "),
                    Span::styled(format!("{} days", pages::DAILY_STREAK), theme.stat_value),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::raw("  Active economy events: "),
                    Span::styled(events.active().len().to_string(), theme.stat_value),
                ]),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
        }
        Page::Home => {
            let text = "Welcome to the economy dashboard.\n\n\
                Browse the shop, check your inventory, keep an eye on your \
                investments and the current economy events.\n\n\
                Tips show up in the corner now and then; dismiss the ones \
                you are done with.";
            f.render_widget(
                Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
                area,
            );
        }
        Page::Guilds => {
            let items: Vec<ListItem> = pages::GUILDS
                .iter()
                .map(|g| {
                    let mut spans = vec![
                        Span::styled(g.name.to_owned(), Style::default().fg(theme.text)),
                        Span::styled(
                            format!("  {} members  ", g.members),
                            Style::default().fg(theme.text_secondary),
                        ),
                        Span::styled(format_coins(g.balance), theme.coin_amount),
                    ];
                    spans.insert(0, Span::raw("  "));
                    ListItem::new(Line::from(spans))
                })
                .collect();
            render_selectable_list(f, area, block, items, selected_row, theme);
        }
        Page::Inventory => {
            let items: Vec<ListItem> = pages::INVENTORY_ITEMS
                .iter()
                .map(|item| {
                    let mut spans = vec![
                        Span::raw("  "),
                        Span::styled(item.name.to_owned(), Style::default().fg(theme.text)),
                        Span::styled(
                            format!(" x{}", item.quantity),
                            Style::default().fg(theme.text_secondary),
                        ),
                    ];
                    spans.extend(tag_spans(item.tags, theme));
                    ListItem::new(Line::from(spans))
                })
                .collect();
            render_selectable_list(f, area, block, items, selected_row, theme);
        }
        Page::Shop => {
            let mut items: Vec<ListItem> = pages::SHOP_CATEGORIES
                .iter()
                .map(|cat| {
                    ListItem::new(Line::from(vec![
                        Span::raw("  » "),
                        Span::styled(
                            cat.to_string(),
                            Style::default().fg(theme.focus_border).add_modifier(Modifier::BOLD),
                        ),
                    ]))
                })
                .collect();
            for item in pages::SHOP_ITEMS {
                let mut spans = vec![
                    Span::raw("  "),
                    Span::styled(format!("{:<16}", item.name), Style::default().fg(theme.text)),
                    Span::styled(format!("{:>10}", format_coins(item.price)), theme.coin_amount),
                    Span::styled(
                        format!("  {}", item.category),
                        Style::default().fg(theme.text_secondary),
                    ),
                ];
                spans.extend(tag_spans(item.tags, theme));
                items.push(ListItem::new(Line::from(spans)));
            }
            render_selectable_list(f, area, block, items, selected_row, theme);
        }
        Page::Investments => {
            let items: Vec<ListItem> = pages::INVESTMENTS
                .iter()
                .map(|inv| {
                    ListItem::new(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(format!("{:<14}", inv.name), Style::default().fg(theme.text)),
                        Span::styled(format_coins(inv.invested), theme.coin_amount),
                        Span::styled(
                            format!("  {}/day  ", format_coins(inv.daily_return)),
                            Style::default().fg(theme.text_secondary),
                        ),
                        Span::styled(
                            format!("{} days left", inv.days_left),
                            Style::default().fg(theme.selection_fg),
                        ),
                    ]))
                })
                .collect();
            render_selectable_list(f, area, block, items, selected_row, theme);
        }
        Page::Events => {
            if events.active().is_empty() {
                let placeholder = Paragraph::new("No active economy events. Check back later.")
                    .block(block)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.text_secondary));
                f.render_widget(placeholder, area);
            } else {
                let now = Utc::now();
                let items: Vec<ListItem> = events
                    .active()
                    .iter()
                    .map(|event| {
                        ListItem::new(Line::from(vec![
                            Span::raw("  "),
                            Span::styled(event.message.clone(), Style::default().fg(theme.text)),
                            Span::styled(
                                format!(
                                    "  started {}, ends in {}",
                                    time_ago(event.started, now),
                                    format_countdown(event.remaining(now))
                                ),
                                Style::default().fg(theme.text_secondary),
                            ),
                        ]))
                    })
                    .collect();
                render_selectable_list(f, area, block, items, selected_row, theme);
            }
        }
    }
}

fn render_selectable_list(
    f: &mut Frame,
    area: Rect,
    block: Block,
    items: Vec<ListItem>,
    selected_row: usize,
    theme: &Theme,
) {
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(selected_row.min(items.len() - 1)));
    }
    let list = List::new(items)
        .highlight_symbol("→")
        .highlight_style(Style::default().fg(theme.selection_fg).add_modifier(Modifier::BOLD))
        .block(block);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let footer = Paragraph::new(
        "Tab/Shift+Tab or 1-7 Pages | ↑/↓ or j/k Navigate | ? Tip | d Don't show again | c Copy Tip | Esc Close Tip | x Clear Events | S Save Page | q Quit",
    )
    .block(Block::default().borders(Borders::ALL))
    .style(theme.footer);
    f.render_widget(footer, area);
}

fn render_toasts(f: &mut Frame, area: Rect, toasts: &Toasts, theme: &Theme) {
    let width = 44.min(area.width.saturating_sub(2));
    if width < 10 {
        return;
    }
    for (i, toast) in toasts.visible().enumerate() {
        let y = 1 + (i as u16) * 3;
        if y + 3 > area.height {
            break;
        }
        let rect = Rect {
            x: area.width.saturating_sub(width + 1),
            y,
            width,
            height: 3,
        };
        let (symbol, style) = match toast.kind {
            ToastKind::Info => ("i", theme.toast_info),
            ToastKind::Success => ("✔", theme.toast_success),
            ToastKind::Error => ("✖", theme.toast_error),
            ToastKind::Event => ("★", theme.toast_event),
        };
        f.render_widget(Clear, rect);
        let para = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", symbol), style),
            Span::styled(toast.message.clone(), Style::default().fg(theme.text)),
        ]))
        .block(Block::default().borders(Borders::ALL).style(style));
        f.render_widget(para, rect);
    }
}

fn render_hint_overlay(f: &mut Frame, area: Rect, hint_state: &Arc<Mutex<HintState>>, theme: &Theme) {
    let state = hint_state.lock().unwrap();
    if !state.overlay.visible {
        return;
    }

    let width = 46.min(area.width.saturating_sub(2));
    let height = 9.min(area.height.saturating_sub(2));
    if width < 12 || height < 5 {
        return;
    }
    let rect = Rect {
        x: area.width.saturating_sub(width + 1),
        y: area.height.saturating_sub(height + 4),
        width,
        height,
    };

    let title = match &state.overlay.title {
        Some(t) => format!("💡 {}", t),
        None => "💡 Helpful Tip".to_string(),
    };
    let border = if state.overlay.user_triggered {
        theme.hint_border_pulse
    } else {
        theme.hint_border
    };

    f.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(title, theme.hint_title))
        .borders(Borders::ALL)
        .style(border);
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(highlight_coins(
        &state.overlay.text,
        theme.hint_text,
        theme.coin_amount,
    ))
    .wrap(Wrap { trim: true });
    f.render_widget(body, chunks[0]);

    let checkbox = if state.overlay.dont_show_again { "[x]" } else { "[ ]" };
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        format!("{} [d] Don't show this tip again  Esc Close", checkbox),
        theme.hint_footer,
    )]));
    f.render_widget(footer, chunks[1]);
}
