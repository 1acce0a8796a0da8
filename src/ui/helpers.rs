use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::error::ShelfError;
use crate::models::ItemKind;

/// Colored tag shown next to each item.
pub(crate) fn kind_badge(kind: ItemKind) -> Span<'static> {
    let color = match kind {
        ItemKind::Book => Color::Green,
        ItemKind::Magazine => Color::Magenta,
        ItemKind::Comic => Color::Cyan,
    };
    Span::styled(
        format!("[{kind}]"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Label for the kind filter indicator.
pub(crate) fn filter_label(kind: Option<ItemKind>) -> &'static str {
    match kind {
        None => "All items",
        Some(ItemKind::Book) => "Books",
        Some(ItemKind::Magazine) => "Magazines",
        Some(ItemKind::Comic) => "Comics",
    }
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant message from a shelf error. Storage failures carry
/// a context chain; the innermost cause is what the user needs to see.
pub(crate) fn surface_error(err: &ShelfError) -> String {
    match err {
        ShelfError::Validation(inner) => inner.to_string(),
        ShelfError::Storage(inner) => inner
            .chain()
            .last()
            .map(|cause| cause.to_string())
            .unwrap_or_else(|| inner.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use anyhow::anyhow;

    #[test]
    fn surface_error_picks_innermost_storage_cause() {
        let err = ShelfError::Storage(anyhow!("disk is full").context("failed to insert item"));
        assert_eq!(surface_error(&err), "disk is full");
    }

    #[test]
    fn surface_error_keeps_validation_message() {
        let err = ShelfError::Validation(ValidationError::NonPositivePages(0));
        assert_eq!(surface_error(&err), "Page count must be positive (got 0).");
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
    }
}
