use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::app::App;
use super::processing::SessionOutcome;
use super::rendering::ui;
use crate::executor::ChangeExecutor;
use crate::rename_engine::RenameOperation;

pub fn run_tui(
    root: PathBuf,
    series_name: String,
    operations: Vec<RenameOperation>,
    executor: ChangeExecutor,
) -> io::Result<SessionOutcome> {
    // Log lines would corrupt the alternate screen.
    let log_level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(root, series_name, operations, executor.is_dry_run());
    let res = run_app(&mut terminal, &mut app, &executor);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    log::set_max_level(log_level);

    res?;
    Ok(app.outcome())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    executor: &ChangeExecutor,
) -> io::Result<()> {
    loop {
        app.clear_status_message_if_expired();
        terminal.draw(|f| ui(f, app))?;

        // One step per frame: an operation is drawn as processing before it is applied.
        if app.is_executing() {
            app.process_next(executor);
            continue;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if app.show_help {
                    app.toggle_help();
                } else {
                    return Ok(());
                }
            }
            KeyCode::Char('h') | KeyCode::F(1) => app.toggle_help(),
            KeyCode::Char('p') => app.toggle_preview(),
            KeyCode::Char('t') => app.toggle_view(),
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Enter | KeyCode::Char('y') => {
                if app.finished {
                    return Ok(());
                }
                app.confirm();
            }
            _ => {}
        }
    }
}
