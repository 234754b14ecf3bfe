use ledger::{Bill, Summary};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, Focus},
    keyboard::{BoundField, FieldBuffer},
    ui::{components::card::StatCard, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, bills: &[Bill], summary: &Summary, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Entry form
            Constraint::Length(3), // Summary tiles
            Constraint::Min(0),    // Bills table
        ])
        .split(area);

    render_form(frame, layout[0], state, &theme);
    render_summary(frame, layout[1], summary, &theme);
    render_table(frame, layout[2], bills, state, &theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let in_form = !matches!(state.focus, Focus::Table);
    let border = if in_form { theme.accent } else { theme.border };
    let block = Block::default()
        .title(" new bill ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Min(0),
        ])
        .split(inner);

    render_input(
        frame,
        cells[0],
        "Item",
        state.keyboard.buffer(BoundField::Name),
        state.focus == Focus::Name,
        theme,
    );
    render_input(
        frame,
        cells[1],
        "Amount",
        state.keyboard.buffer(BoundField::Amount),
        state.focus == Focus::Amount,
        theme,
    );
    render_mode(frame, cells[2], state, theme);
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    buffer: &FieldBuffer,
    focused: bool,
    theme: &Theme,
) {
    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let value = input_display(buffer, focused);
    let line = Line::from(vec![
        Span::styled(format!("{label} "), Style::default().fg(theme.dim)),
        Span::styled(value, value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// The field text with the cursor bar inserted at the cursor position.
fn input_display(buffer: &FieldBuffer, focused: bool) -> String {
    if !focused {
        return buffer.value().to_string();
    }

    let at = buffer
        .value()
        .char_indices()
        .nth(buffer.cursor())
        .map(|(at, _)| at)
        .unwrap_or(buffer.value().len());
    let mut out = buffer.value().to_string();
    out.insert(at, '│');
    out
}

fn render_mode(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Mode;
    let value = if focused {
        format!("‹ {} ›", state.mode.as_str())
    } else {
        state.mode.as_str().to_string()
    };
    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled("Mode ", Style::default().fg(theme.dim)),
        Span::styled(value, value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, summary: &Summary, theme: &Theme) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    StatCard::new("Total", summary.total.to_string(), theme).render(frame, tiles[0]);
    StatCard::new("Bills", summary.count.to_string(), theme).render(frame, tiles[1]);
    StatCard::new("Cash", summary.cash.to_string(), theme).render(frame, tiles[2]);
    StatCard::new("Online", summary.online.to_string(), theme).render(frame, tiles[3]);
}

/// One table row: name, formatted amount, mode, creation time.
pub fn bill_row(bill: &Bill) -> String {
    format!(
        "{:<20} {:>10} {:<8} {}",
        bill.name,
        bill.amount.to_string(),
        bill.mode,
        bill.time
    )
}

fn render_table(frame: &mut Frame<'_>, area: Rect, bills: &[Bill], state: &AppState, theme: &Theme) {
    let focused = state.focus == Focus::Table;
    let border = if focused { theme.accent } else { theme.border };
    let block = Block::default()
        .title(" bills ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    if bills.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "No bills yet. Press a to add one.",
                Style::default().fg(theme.dim),
            )))
            .block(block)
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = format!("  {:<20} {:>10} {:<8} {}", "ITEM", "AMOUNT", "MODE", "TIME");
    let mut items = vec![
        ListItem::new(Line::from(Span::styled(
            header,
            Style::default().fg(theme.dim),
        ))),
    ];
    items.extend(
        bills
            .iter()
            .map(|bill| ListItem::new(Line::from(bill_row(bill)))),
    );

    let mut list_state = ListState::default();
    // Row 0 is the header.
    list_state.select(Some(state.selected + 1));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger::Money;

    fn bill(name: &str, paise: i64, mode: &str) -> Bill {
        Bill {
            name: name.to_string(),
            amount: Money::new(paise),
            mode: mode.to_string(),
            time: "10:30:15 AM".to_string(),
        }
    }

    #[test]
    fn bill_row_formats_the_amount_in_rupees() {
        let row = bill_row(&bill("Tea", 1500, "cash"));
        assert!(row.contains("Tea"));
        assert!(row.contains("₹15.00"));
        assert!(row.contains("cash"));
        assert!(row.contains("10:30:15 AM"));
    }

    #[test]
    fn input_display_places_the_cursor() {
        let mut buffer = FieldBuffer::default();
        buffer.insert('H');
        buffer.insert('I');

        assert_eq!(input_display(&buffer, false), "HI");
        assert_eq!(input_display(&buffer, true), "HI│");

        buffer.move_left();
        assert_eq!(input_display(&buffer, true), "H│I");
    }
}
