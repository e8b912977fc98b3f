use roster::app::{App, AppMessage, RunOutcome};
use roster::config::Config;
use roster::connectivity::ConnectivityState;
use roster::directory::DirectoryClient;
use roster::{logging, ui};

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    // Handle --version flag before any initialization
    if std::env::args().any(|arg| arg == "--version") {
        println!("roster {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    logging::init();

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let config = Config::from_env();
    tracing::info!(base_url = %config.base_url, "starting roster");

    let runtime = tokio::runtime::Runtime::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Session loop. A restart requested from the disconnected screen tears
    // the session down and builds a fresh one - new gate, new machine - so
    // the health probe runs again.
    let result = runtime.block_on(async {
        loop {
            let client = Arc::new(DirectoryClient::new(&config));
            let mut app = App::new(client);
            app.start_probe();

            match run_app(&mut terminal, &mut app).await? {
                RunOutcome::Quit => break,
                RunOutcome::Restart => {
                    tracing::info!("session restart requested");
                    terminal.clear()?;
                }
            }
        }
        Ok::<(), color_eyre::Report>(())
    });

    restore_terminal(&mut terminal)?;
    result?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<RunOutcome>
where
    B::Error: Send + Sync + 'static,
{
    // Create async event stream for keyboard input
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        // Draw the UI only when needed (dirty flag)
        if app.needs_redraw {
            terminal.draw(|f| {
                ui::render(f, &*app);
            })?;
            app.needs_redraw = false;
        }

        // Poll keyboard events, the message channel and a UI tick.
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(100));

        tokio::select! {
            // Spinner animation tick
            _ = timeout => {
                app.tick();
            }

            // Keyboard events
            event_result = event_stream.next() => {
                if let Some(Ok(event)) = event_result {
                    match event {
                        Event::Resize(_, _) => {
                            app.mark_dirty();
                        }
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            match key.code {
                                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                                    return Ok(RunOutcome::Quit);
                                }
                                KeyCode::Char('q') => {
                                    return Ok(RunOutcome::Quit);
                                }
                                KeyCode::Char('r') => match app.gate.state() {
                                    // Reconnect is a hard recovery: restart the session.
                                    ConnectivityState::Disconnected => {
                                        return Ok(RunOutcome::Restart);
                                    }
                                    // Retry is a soft recovery: re-enter the fetch.
                                    ConnectivityState::Connected => {
                                        app.request_refresh();
                                    }
                                    // Probe still outstanding.
                                    ConnectivityState::Unknown => {}
                                },
                                _ => {}
                            }
                        }
                        _ => {}
                    }
                }
            }

            // Messages from the probe and fetch tasks
            message = recv_message(&mut message_rx) => {
                if let Some(message) = message {
                    app.handle_message(message);
                }
            }
        }
    }
}

/// Await the next app message, or park forever when the receiver is gone.
async fn recv_message(
    rx: &mut Option<mpsc::UnboundedReceiver<AppMessage>>,
) -> Option<AppMessage> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = execute!(io::stdout(), Show);
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
