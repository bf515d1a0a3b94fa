use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render keybindings help popup
pub fn render_keybindings_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    // Clear background
    frame.render_widget(Clear, popup_area);

    let help_text = Paragraph::new(keybindings_content())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keybindings Help ")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_text, popup_area);

    // Close hint on the bottom border
    let hint_area = Rect {
        x: popup_area.x + 1,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width.saturating_sub(2),
        height: 1,
    };

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "? ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("or ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "ESC ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("to close", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(footer, hint_area);
}

fn keybindings_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let section = |title: &str| -> Line<'static> {
        Line::from(vec![Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )])
    };

    let key = |k: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("  {:12}", k),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(desc.to_string()),
        ])
    };

    lines.push(section("Views"));
    lines.push(Line::from(""));
    lines.push(key("a", "Show all outfits"));
    lines.push(key("c / C", "Next / previous category"));
    lines.push(key("t / T", "Next / previous tag"));
    lines.push(key("f", "Show favorites"));
    lines.push(key("/", "Search titles, categories and tags"));
    lines.push(Line::from(""));

    lines.push(section("Gallery"));
    lines.push(Line::from(""));
    lines.push(key("h j k l", "Move between cards (arrows work too)"));
    lines.push(key("Space / s", "Toggle favorite"));
    lines.push(key("ENTER", "Open the outfit image"));
    lines.push(Line::from(""));

    lines.push(section("Search"));
    lines.push(Line::from(""));
    lines.push(key("Backspace", "Delete character"));
    lines.push(key("ESC / ENTER", "Back to the gallery"));
    lines.push(Line::from(""));

    lines.push(section("Global"));
    lines.push(Line::from(""));
    lines.push(key("?", "Toggle this help"));
    lines.push(key("q", "Quit"));

    lines
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
