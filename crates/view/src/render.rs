//! Drawing the screen with ratatui.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use bufnav_core::{Geometry, ViewSystem};

use crate::screen::Screen;
use crate::text_panel::TextPanel;

/// Terminal area covered by a panel frame.
pub fn frame_rect(geometry: Geometry) -> Rect {
    Rect::new(
        geometry.x0,
        geometry.y0,
        geometry.x1.saturating_sub(geometry.x0).saturating_add(1),
        geometry.y1.saturating_sub(geometry.y0).saturating_add(1),
    )
}

/// Draw all panels bottom to top, clipped to `area`.
pub fn render_screen(screen: &Screen, area: Rect, buf: &mut Buffer) {
    let selected = Style::default()
        .fg(screen.selected_fg())
        .add_modifier(Modifier::BOLD);

    for role in screen.stack() {
        let Some(panel) = screen.panel(*role) else {
            continue;
        };
        let rect = frame_rect(panel.geometry()).intersection(area);
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        let focused = screen.current_panel() == Some(*role);
        render_panel(panel, rect, buf, focused, selected);
    }
}

fn render_panel(panel: &TextPanel, area: Rect, buf: &mut Buffer, focused: bool, selected: Style) {
    let border_style = if focused { selected } else { Style::default() };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(panel.options().title.clone(), border_style));

    let inner = block.inner(area);
    Clear.render(area, buf);
    block.render(area, buf);

    let height = inner.height as usize;
    let origin = panel.scroll_origin(height);
    let highlighted = panel.options().highlight.then(|| panel.cursor()).flatten();

    let lines: Vec<Line> = panel
        .view_rows()
        .into_iter()
        .skip(origin)
        .take(height)
        .map(|row| {
            if Some(row.line) == highlighted {
                Line::styled(row.text, selected)
            } else {
                Line::raw(row.text)
            }
        })
        .collect();

    Paragraph::new(lines).render(inner, buf);
}
