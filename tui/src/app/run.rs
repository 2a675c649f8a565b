use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::AppConfig;
use crate::ui::screens::{menu, Action, Screen};

/// Interval between animation frames.
const TICK: Duration = Duration::from_millis(60);

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Runs the TUI application.
///
/// The screen is only redrawn after something visible changed.
///
/// # Errors
/// Returns an error if terminal setup or rendering fails.
pub fn run(config: AppConfig) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut screen = Screen::Menu(menu::MenuState::new(config));
    let mut dirty = true;
    let mut last_tick = Instant::now();

    loop {
        if dirty {
            terminal.draw(|f| screen.draw(f))?;
            dirty = false;
        }

        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => screen.handle_key(k.code),
                Event::Mouse(m) => screen.handle_mouse(m),
                Event::Resize(cols, rows) => {
                    log::debug!("terminal resized to {cols}x{rows}");
                    dirty |= screen.resize(ratatui::layout::Rect::new(0, 0, cols, rows));
                    Action::None
                }
                _ => Action::None,
            };

            match action {
                Action::Quit => break,
                Action::Transition(next) => {
                    screen = next;
                    screen.resize(terminal.size()?);
                    dirty = true;
                }
                Action::Redraw => dirty = true,
                Action::None => {}
            }
        }

        if last_tick.elapsed() >= TICK {
            dirty |= screen.tick();
            last_tick = Instant::now();
        }
    }

    terminal.show_cursor()?;
    log::info!("bye");
    Ok(())
}
