//! Utilities - overlay and layout helpers

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw help overlay
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" - Start investigation (welcome screen)"),
        ]),
        Line::from(vec![
            Span::styled("Tab / ↑ / ↓", Style::default().fg(Color::Cyan)),
            Span::raw(" - Move between fields"),
        ]),
        Line::from(vec![
            Span::styled("← / →", Style::default().fg(Color::Cyan)),
            Span::raw(" - Change a selector value"),
        ]),
        Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" - Toggle a pattern or checkbox"),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+N / Ctrl+P", Style::default().fg(Color::Cyan)),
            Span::raw(" - Next / previous step"),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+T", Style::default().fg(Color::Cyan)),
            Span::raw(" - Stop / resume the timer"),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+E", Style::default().fg(Color::Cyan)),
            Span::raw(" - Export JSON (final step)"),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+C", Style::default().fg(Color::Cyan)),
            Span::raw(" - Exit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press F1 to close",
            Style::default().fg(Color::Gray),
        )),
    ];

    // Center the help box
    let help_area = centered_rect(60, 60, area);

    let help_block = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().bg(Color::Black));

    f.render_widget(help_block, help_area);
}

/// Create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
