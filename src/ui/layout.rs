use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Fixed frame of the portal: one-line header, sidebar and page content, a
/// three-line message panel, one-line status bar. The message panel keeps its
/// space while empty so the content never jumps when a notice appears.
pub struct Layout {
    pub header: Rect,
    pub sidebar: Rect,
    pub page: Rect,
    pub message: Rect,
    pub status: Rect,
}

impl Layout {
    pub fn new(area: Rect) -> Self {
        let rows = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(10),   // Sidebar + page
                Constraint::Length(3), // Message panel
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let columns = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(rows[1]);

        Self {
            header: rows[0],
            sidebar: columns[0],
            page: columns[1],
            message: rows[2],
            status: rows[3],
        }
    }

    /// Rect of the given size centered inside `area`, clamped to fit.
    pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        Rect::new(x, y, width, height)
    }
}
