// UI rendering logic - draws the gallery page the controller produced
use crate::{App, InputMode};
use lookbook_core::render::{Card, Control, EMPTY_MESSAGE};
use lookbook_core::FavoritesSlot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows each card takes, borders included
const CARD_HEIGHT: u16 = 6;

const ACCENT: Color = Color::Rgb(249, 226, 175);
const HEART: Color = Color::Rgb(243, 139, 168);

pub fn render<S: FavoritesSlot>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + subtitle
            Constraint::Length(3), // Filter buttons
            Constraint::Length(3), // Tag buttons
            Constraint::Length(3), // Search box
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_controls(frame, app.gallery.page().filters(), " Aesthetic ", chunks[1]);
    render_controls(frame, app.gallery.page().tags(), " Tags ", chunks[2]);
    render_search_input(frame, app, chunks[3]);
    render_gallery(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[5]);

    if app.input_mode == InputMode::Help {
        crate::help_ui::render_keybindings_help(frame, area);
    }
}

fn render_header<S: FavoritesSlot>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let page = app.gallery.page();
    let mut spans = vec![Span::styled(
        page.title.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if !page.subtitle.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            page.subtitle.clone(),
            Style::default().fg(Color::Gray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 👗 Lookbook ")
            .border_style(Style::default().fg(ACCENT)),
    );
    frame.render_widget(header, area);
}

fn render_controls(frame: &mut Frame, controls: &[Control], title: &str, area: Rect) {
    let mut spans = Vec::new();
    for (i, control) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if control.active {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", control.label), style));
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(bar, area);
}

fn render_search_input<S: FavoritesSlot>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let searching = app.input_mode == InputMode::Searching;
    let mut spans = vec![
        Span::styled("🔍 ", Style::default()),
        Span::styled(app.search_text().to_string(), Style::default().fg(Color::Yellow)),
    ];
    if searching {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    } else if app.search_text().is_empty() {
        spans.push(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let border = if searching { Color::Yellow } else { Color::Gray };
    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, area);
}

fn render_gallery<S: FavoritesSlot>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    if let Some(error) = app.gallery.page().load_error() {
        let msg = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(msg, area);
        return;
    }

    if app.gallery.page().empty_state_visible() {
        let msg = Paragraph::new(EMPTY_MESSAGE)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(msg, area);
        return;
    }

    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    app.ensure_visible(visible_rows);

    let columns = app.columns;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    let col_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    for (screen_row, row_area) in row_areas.iter().enumerate() {
        let row = app.scroll_row + screen_row;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints.clone())
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            if let Some(card) = app.cards().get(index) {
                render_card(frame, card, index == app.selected_index, *cell);
            }
        }
    }
}

fn render_card(frame: &mut Frame, card: &Card, selected: bool, area: Rect) {
    let heart_style = if card.favorited {
        Style::default().fg(HEART)
    } else {
        Style::default().fg(Color::Gray)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(card.heart(), heart_style),
            Span::raw("  "),
            Span::styled(card.category.clone(), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(Span::styled(
            card.tags_line.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            card.image.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let border = if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", card.title))
            .border_style(border),
    );
    frame.render_widget(widget, area);
}

fn render_status_bar<S: FavoritesSlot>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let status = if let Some(msg) = &app.status_message {
        Span::styled(msg.clone(), Style::default().fg(Color::Red))
    } else {
        match app.input_mode {
            InputMode::Searching => Span::styled(
                "SEARCH | type to filter | ESC/ENTER: done",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Help => Span::styled("HELP | ESC: close", Style::default().fg(Color::Cyan)),
            InputMode::Normal => Span::raw(
                "hjkl: move | a: all | c/C: category | t/T: tag | f: favorites | /: search | space: ♥ | ENTER: open | ?: help | q: quit",
            ),
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}
