//! Text buffer of a single panel.
//!
//! A panel stores the raw text written to it and derives everything else
//! (buffer lines, wrapped rows, scroll origin) on demand.

use unicode_width::UnicodeWidthChar;

use bufnav_core::{Geometry, LineStats, PanelOptions};

/// Split a line into rows of at most `width` columns.
///
/// Breaks between characters; a character wider than the row still gets a
/// row of its own. An empty line occupies one empty row.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in line.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}

/// One displayed row and the buffer line it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub line: usize,
    pub text: String,
}

/// A named text surface with an optional highlighted line.
#[derive(Debug, Clone)]
pub struct TextPanel {
    options: PanelOptions,
    geometry: Geometry,
    content: String,
    cursor: Option<usize>,
}

impl TextPanel {
    pub fn new(geometry: Geometry, options: PanelOptions) -> Self {
        Self {
            options,
            geometry,
            content: String::new(),
            cursor: None,
        }
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    /// Raw buffer content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Highlighted buffer line.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Append text to the buffer.
    pub fn write(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Empty the buffer; nothing is highlighted afterwards.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = None;
    }

    /// Logical buffer lines.
    pub fn buffer_lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }

    /// Displayed rows after wrapping, top to bottom.
    pub fn view_rows(&self) -> Vec<ViewRow> {
        let width = self.wrap_width();
        self.content
            .lines()
            .enumerate()
            .flat_map(|(line, text)| {
                let rows = match width {
                    Some(width) => wrap_line(text, width),
                    None => vec![text.to_string()],
                };
                rows.into_iter().map(move |text| ViewRow { line, text })
            })
            .collect()
    }

    pub fn line_stats(&self) -> LineStats {
        LineStats {
            line_index: self.cursor,
            buffer_lines: self.content.lines().count(),
            view_lines: self.view_rows().len(),
        }
    }

    /// Highlight the next line; stays on the last line.
    pub fn step_line_down(&mut self) {
        let count = self.content.lines().count();
        if count == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            None => 0,
            Some(line) => (line + 1).min(count - 1),
        });
    }

    /// Highlight the previous line; from the first line nothing stays highlighted.
    pub fn step_line_up(&mut self) {
        self.cursor = match self.cursor {
            None | Some(0) => None,
            Some(line) => Some(line - 1),
        };
    }

    /// First displayed row shown, chosen so the highlighted line is visible.
    pub fn scroll_origin(&self, height: usize) -> usize {
        let Some(cursor) = self.cursor else {
            return 0;
        };
        let rows = self.view_rows();
        let last_row = rows
            .iter()
            .rposition(|row| row.line == cursor)
            .unwrap_or(0);
        (last_row + 1).saturating_sub(height)
    }

    /// Buffer line displayed at a content row, taking scrolling into account.
    pub fn line_at_row(&self, row: u16) -> Option<usize> {
        let height = self.geometry.inner_height() as usize;
        let origin = self.scroll_origin(height);
        self.view_rows()
            .get(origin + row as usize)
            .map(|view_row| view_row.line)
    }

    /// Highlight the line shown at a content row. Rows past the end are ignored.
    pub fn pick_row(&mut self, row: u16) -> bool {
        match self.line_at_row(row) {
            Some(line) => {
                self.cursor = Some(line);
                true
            }
            None => false,
        }
    }

    fn wrap_width(&self) -> Option<usize> {
        self.options
            .wrap
            .then(|| self.geometry.inner_width() as usize)
    }
}
