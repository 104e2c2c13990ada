use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub focus_border: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub selection_fg: Color,

    // Specific components
    pub page_label: Style,
    pub page_label_active: Style,
    pub stat_value: Style,
    pub coin_amount: Style,
    pub tag_limited: Style,
    pub tag_consumable: Style,
    pub footer: Style,
    pub hint_title: Style,
    pub hint_border: Style,
    pub hint_border_pulse: Style,
    pub hint_text: Style,
    pub hint_footer: Style,
    pub toast_info: Style,
    pub toast_success: Style,
    pub toast_error: Style,
    pub toast_event: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            text: Color::White,
            text_secondary: Color::Gray,
            selection_fg: Color::Yellow,

            page_label: Style::default().fg(Color::White),
            page_label_active: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            stat_value: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            coin_amount: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            tag_limited: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            tag_consumable: Style::default().fg(Color::Green),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            hint_title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            hint_border: Style::default().fg(Color::Blue).bg(Color::Black),
            hint_border_pulse: Style::default().fg(Color::Yellow).bg(Color::Black),
            hint_text: Style::default().fg(Color::White),
            hint_footer: Style::default().fg(Color::DarkGray),
            toast_info: Style::default().fg(Color::Cyan),
            toast_success: Style::default().fg(Color::Green),
            toast_error: Style::default().fg(Color::Red),
            toast_event: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        }
    }
}
