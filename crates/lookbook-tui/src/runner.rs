// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lookbook_core::{FavoritesSlot, UiEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::debug;

/// What the loop has to do after a key was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    OpenImage(String),
}

pub fn run_tui<S: FavoritesSlot>(mut app: App<S>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal, even if the loop bailed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<S: FavoritesSlot>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let KeyOutcome::OpenImage(url) = handle_key(app, key.code) {
                debug!("Opening {}", url);
                if let Err(e) = open::that(&url) {
                    app.status_message = Some(format!("Failed to open browser: {}", e));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Map one key press onto the app
pub fn handle_key<S: FavoritesSlot>(app: &mut App<S>, code: KeyCode) -> KeyOutcome {
    app.clear_status();

    match app.input_mode {
        InputMode::Searching => match code {
            KeyCode::Char(c) => app.push_search_char(c),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Esc | KeyCode::Enter => app.enter_normal_mode(),
            _ => {}
        },
        InputMode::Help => match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.toggle_help(),
            _ => {}
        },
        InputMode::Normal => match code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char('?') => app.toggle_help(),
            KeyCode::Char('/') => app.enter_search_mode(),
            KeyCode::Char('a') => app.dispatch(UiEvent::ShowAll),
            KeyCode::Char('f') => app.dispatch(UiEvent::ShowFavorites),
            KeyCode::Char('c') => app.cycle_category(true),
            KeyCode::Char('C') => app.cycle_category(false),
            KeyCode::Char('t') => app.cycle_tag(true),
            KeyCode::Char('T') => app.cycle_tag(false),
            KeyCode::Char(' ') | KeyCode::Char('s') => app.toggle_selected_favorite(),
            KeyCode::Char('l') | KeyCode::Right => app.next_card(),
            KeyCode::Char('h') | KeyCode::Left => app.previous_card(),
            KeyCode::Char('j') | KeyCode::Down => app.card_below(),
            KeyCode::Char('k') | KeyCode::Up => app.card_above(),
            KeyCode::Enter => {
                if let Some(target) = app.selected_image_target() {
                    return KeyOutcome::OpenImage(target);
                }
            }
            _ => {}
        },
    }

    KeyOutcome::Continue
}
