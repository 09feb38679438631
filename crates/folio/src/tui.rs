//! Terminal UI event loop.

use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// How often the key reader checks whether the loop has gone away.
const READER_POLL: Duration = Duration::from_millis(100);

/// Takes over the terminal and runs `app` until the user quits.
pub async fn run_tui(app: App) -> Result<()> {
    info!("Starting folio TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    info!("TUI closed");
    res
}

/// Draws, then waits for whichever comes first: a key or the next deadline.
#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let reader = tokio::task::spawn_blocking(move || read_events(event_tx));

    while app.is_running() {
        terminal.draw(|f| ui::draw(f, &app))?;

        let deadline = app.next_deadline();
        let sleep = async move {
            match deadline {
                Some(due) => tokio::time::sleep_until(tokio::time::Instant::from_std(due)).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            event = event_rx.recv() => match event {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let now = Instant::now();
                    app.tick(now);
                    app.handle_key(key, now);
                }
                Some(_) => {}
                None => {
                    warn!("Key reader stopped");
                    break;
                }
            },
            () = sleep => {
                debug!("Deadline reached");
                app.tick(Instant::now());
            }
        }
    }

    drop(event_rx);
    match reader.await {
        Ok(Err(e)) => warn!(error = %e, "Key reader failed"),
        Err(e) => warn!(error = %e, "Key reader panicked"),
        Ok(Ok(())) => {}
    }
    Ok(())
}

/// Forwards terminal events until the receiving side is dropped.
fn read_events(tx: mpsc::UnboundedSender<Event>) -> io::Result<()> {
    while !tx.is_closed() {
        if event::poll(READER_POLL)? && tx.send(event::read()?).is_err() {
            break;
        }
    }
    Ok(())
}
