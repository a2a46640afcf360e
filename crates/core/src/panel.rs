//! Panel identity and geometry.
//!
//! The viewer has a fixed set of panels, so they are addressed by a closed
//! `PanelRole` enum instead of string names.

use std::fmt;

/// The three panels of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelRole {
    /// Scrollable list whose selection drives the other panels
    Master,
    /// Fields of the selected record
    Detail,
    /// Line position and line counts of the master panel
    Stats,
}

impl PanelRole {
    /// All roles in layout order.
    pub const ALL: [PanelRole; 3] = [PanelRole::Master, PanelRole::Detail, PanelRole::Stats];

    /// Stable lowercase name, used in logs and config keys.
    pub fn name(self) -> &'static str {
        match self {
            PanelRole::Master => "master",
            PanelRole::Detail => "detail",
            PanelRole::Stats => "stats",
        }
    }
}

impl fmt::Display for PanelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Panel frame position in terminal cells.
///
/// Corners are inclusive: the frame occupies columns `x0..=x1` and rows
/// `y0..=y1`, and the content area is everything inside the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Geometry {
    /// Create geometry from frame corners.
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A frame needs at least one content cell inside its border.
    pub fn is_valid(&self) -> bool {
        self.x1 >= self.x0.saturating_add(2) && self.y1 >= self.y0.saturating_add(2)
    }

    /// Content width (inside the border).
    pub fn inner_width(&self) -> u16 {
        self.x1.saturating_sub(self.x0).saturating_sub(1)
    }

    /// Content height (inside the border).
    pub fn inner_height(&self) -> u16 {
        self.y1.saturating_sub(self.y0).saturating_sub(1)
    }

    /// Whether the cell lies on or inside the frame.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        (self.x0..=self.x1).contains(&column) && (self.y0..=self.y1).contains(&row)
    }

    /// Content row for a terminal row, if the row is inside the border.
    pub fn content_row(&self, column: u16, row: u16) -> Option<u16> {
        let inside_x = column > self.x0 && column < self.x1;
        let inside_y = row > self.y0 && row < self.y1;
        (inside_x && inside_y).then(|| row - self.y0 - 1)
    }
}

impl From<[u16; 4]> for Geometry {
    fn from([x0, y0, x1, y1]: [u16; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Presentation flags applied when a panel is first created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelOptions {
    /// Title shown in the frame
    pub title: String,
    /// Highlight the current line
    pub highlight: bool,
    /// Wrap long lines at the content width
    pub wrap: bool,
}

impl PanelOptions {
    /// Options with a title and everything else off.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Enable current-line highlighting.
    pub fn highlight(mut self) -> Self {
        self.highlight = true;
        self
    }

    /// Enable line wrapping.
    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }
}

/// Outcome of placing a panel during a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The panel did not exist and was just created
    Created,
    /// The panel already existed; only its geometry was updated
    Existing,
}

impl Placement {
    pub fn is_created(self) -> bool {
        self == Placement::Created
    }
}

/// Line position and line counts of a panel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineStats {
    /// Highlighted buffer line, `None` when nothing is selected
    pub line_index: Option<usize>,
    /// Logical lines in the buffer
    pub buffer_lines: usize,
    /// Rows the buffer occupies after wrapping
    pub view_lines: usize,
}
