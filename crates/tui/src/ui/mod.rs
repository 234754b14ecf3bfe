pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ledger::{Bill, Summary};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Focus};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, bills: &[Bill], summary: &Summary, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], summary, state, &theme);
    screens::bills::render(frame, layout[1], bills, summary, state);
    render_bottom_bar(frame, layout[2], state, &theme);

    components::confirm::render(frame, area, state.confirm.as_ref());
    components::keyboard::render(frame, area, &state.keyboard);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: &Summary,
    state: &AppState,
    theme: &Theme,
) {
    let mut line = vec![
        Span::styled(
            "Khata",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Bills", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", summary.count)),
        Span::styled("Time", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.clock)),
    ];

    if state.syncing {
        line.push(Span::styled(
            "SYNCING…",
            Style::default().fg(theme.accent),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let bar = Paragraph::new(Line::from(context_hints(state, theme)));
    frame.render_widget(bar, area);
}

/// Returns context-specific keyboard hints based on the current focus.
fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    if state.confirm.is_some() {
        return vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" confirm  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ];
    }

    match state.focus {
        Focus::Table => vec![
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" add  "),
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" delete  "),
            Span::styled("c", Style::default().fg(theme.accent)),
            Span::raw(" clear  "),
            Span::styled("s", Style::default().fg(theme.accent)),
            Span::raw(" sync  "),
            Span::styled("j/k", Style::default().fg(theme.accent)),
            Span::raw(" select  "),
            Span::styled("q", Style::default().fg(theme.accent)),
            Span::raw(" quit"),
        ],
        Focus::Name | Focus::Amount => vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" add  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" done  "),
            Span::raw("click the keypad to type"),
        ],
        Focus::Mode => vec![
            Span::styled("←/→", Style::default().fg(theme.accent)),
            Span::raw(" toggle  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" add  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" done"),
        ],
    }
}
