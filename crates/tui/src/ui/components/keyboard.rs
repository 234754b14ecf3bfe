use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    keyboard::{KEY_ROWS, Key, VirtualKeyboard},
    ui::theme::Theme,
};

/// Screen columns per key cap. Shared by rendering and hit-testing.
const KEY_WIDTH: u16 = 4;

/// Where the overlay sits: centered, one row above the bottom bar.
pub fn overlay_area(area: Rect) -> Rect {
    let width = (10 * KEY_WIDTH + 2).min(area.width);
    let height = (KEY_ROWS.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height + 1);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn row_origin(inner: Rect, row: usize) -> u16 {
    let row_width = KEY_ROWS[row].len() as u16 * KEY_WIDTH;
    inner.x + inner.width.saturating_sub(row_width) / 2
}

/// Maps a screen position inside the overlay to a key-grid position.
pub fn hit_test(overlay: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
    let inner = overlay.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });
    if y < inner.y || y >= inner.y + inner.height {
        return None;
    }

    let row = (y - inner.y) as usize;
    let keys = KEY_ROWS.get(row)?;
    let origin = row_origin(inner, row);
    if x < origin {
        return None;
    }

    let col = ((x - origin) / KEY_WIDTH) as usize;
    (col < keys.len()).then_some((row, col))
}

pub fn render(frame: &mut Frame<'_>, area: Rect, keyboard: &VirtualKeyboard) {
    if !keyboard.is_open() {
        return;
    }
    let theme = Theme::default();
    let overlay = overlay_area(area);

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .title(" keypad ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    for (row, keys) in KEY_ROWS.iter().enumerate() {
        if row as u16 >= inner.height {
            break;
        }
        let origin = row_origin(inner, row);
        let width = (keys.len() as u16 * KEY_WIDTH)
            .min((inner.x + inner.width).saturating_sub(origin));
        let line_area = Rect {
            x: origin,
            y: inner.y + row as u16,
            width,
            height: 1,
        };

        let spans: Vec<Span<'_>> = keys
            .iter()
            .enumerate()
            .map(|(col, key)| {
                let style = if keyboard.pressed() == Some((row, col)) {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::REVERSED)
                } else if *key == Key::Close {
                    Style::default().fg(theme.error)
                } else {
                    Style::default().fg(theme.text)
                };
                Span::styled(
                    format!("{:^width$}", key.label(), width = KEY_WIDTH as usize),
                    style,
                )
            })
            .collect();

        frame.render_widget(Paragraph::new(Line::from(spans)), line_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn overlay_fits_inside_the_screen() {
        let overlay = overlay_area(SCREEN);
        assert!(overlay.x + overlay.width <= SCREEN.width);
        assert!(overlay.y + overlay.height <= SCREEN.height);
        assert_eq!(overlay.height, KEY_ROWS.len() as u16 + 2);
    }

    #[test]
    fn hit_test_finds_the_first_digit() {
        let overlay = overlay_area(SCREEN);
        let inner = overlay.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        let origin = row_origin(inner, 0);

        assert_eq!(hit_test(overlay, origin + 1, inner.y), Some((0, 0)));
        assert_eq!(
            hit_test(overlay, origin + KEY_WIDTH, inner.y),
            Some((0, 1))
        );
    }

    #[test]
    fn hit_test_misses_outside_the_grid() {
        let overlay = overlay_area(SCREEN);

        assert_eq!(hit_test(overlay, 0, 0), None);
        // Bottom row has three keys; far right of that row is empty space.
        let inner = overlay.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        let last_row = KEY_ROWS.len() - 1;
        let y = inner.y + last_row as u16;
        let beyond = row_origin(inner, last_row) + KEY_ROWS[last_row].len() as u16 * KEY_WIDTH;
        assert_eq!(hit_test(overlay, beyond, y), None);
    }

    #[test]
    fn every_grid_cell_round_trips() {
        let overlay = overlay_area(SCREEN);
        let inner = overlay.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });

        for (row, keys) in KEY_ROWS.iter().enumerate() {
            for col in 0..keys.len() {
                let x = row_origin(inner, row) + col as u16 * KEY_WIDTH + 1;
                let y = inner.y + row as u16;
                assert_eq!(hit_test(overlay, x, y), Some((row, col)));
            }
        }
    }
}
