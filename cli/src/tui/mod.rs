pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use taskdesk_core::{HttpTaskApi, TaskClient};

use crate::config::AppConfig;
use crate::tui::app::{Action, App};

pub async fn run(client: TaskClient<HttpTaskApi>, config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    let res = run_app(&mut terminal, &mut app, config.poll_timeout).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

async fn run_app(
    terminal: &mut Term,
    app: &mut App<HttpTaskApi>,
    poll_timeout: Duration,
) -> Result<()> {
    dispatch(terminal, app, Action::Reload).await?;

    loop {
        app.client.messages_mut().expire();
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(poll_timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Some(Action::Quit) => return Ok(()),
            Some(action) => dispatch(terminal, app, action).await?,
            None => {}
        }
    }
}

/// Runs one API-backed action with the controls disabled: the busy state
/// is drawn first, and keys pressed while the request was in flight are
/// thrown away afterwards.
async fn dispatch(terminal: &mut Term, app: &mut App<HttpTaskApi>, action: Action) -> Result<()> {
    app.busy = true;
    terminal.draw(|f| ui::draw(f, app))?;

    app.perform(action).await;

    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    app.busy = false;
    Ok(())
}
