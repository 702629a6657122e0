//! Event Loop - Main TUI entry point and event handling

use super::input;
use super::render::draw_ui;
use super::state::WizardTuiState;
use super::timer::TickHandle;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use shrink_common::ShrinkConfig;
use std::io;
use tokio::sync::mpsc;

/// TUI message types
#[derive(Debug)]
pub enum TuiMessage {
    /// One elapsed second from the tick task
    TimerTick,
}

/// Run the wizard TUI
pub async fn run(config: ShrinkConfig) -> Result<()> {
    // Setup terminal with error recovery
    enable_raw_mode().map_err(|e| {
        anyhow::anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode(); // Cleanup attempt
        anyhow::anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = WizardTuiState::new(&config);

    // Channel for tick messages from the timer task
    let (tx, mut rx) = mpsc::channel(32);
    let mut ticker = TickHandle::default();

    let result = run_event_loop(&mut terminal, &mut state, &mut ticker, tx, &mut rx).await;

    // No tick survives the loop; stop before the terminal is restored
    ticker.stop();

    let cleanup_result = restore_terminal(&mut terminal);
    result.and(cleanup_result)
}

/// Separate cleanup function so every exit path restores the terminal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut WizardTuiState,
    ticker: &mut TickHandle,
    tx: mpsc::Sender<TuiMessage>,
    rx: &mut mpsc::Receiver<TuiMessage>,
) -> Result<()> {
    loop {
        // Apply queued ticks; the session discards them while stopped
        while let Ok(msg) = rx.try_recv() {
            match msg {
                TuiMessage::TimerTick => state.session.tick(),
            }
        }

        // Draw UI
        terminal.draw(|f| draw_ui(f, state))?;

        // Handle events with timeout
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    // Ctrl+C - exit
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                        break;
                    }
                    // F1 - toggle help
                    (KeyCode::F(1), _) => {
                        state.show_help = !state.show_help;
                    }
                    _ => {
                        if input::handle_key(state, ticker, &tx, key) {
                            break; // Exit requested
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
