use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::config::GameConfig;
use crate::game::GameSnapshot;
use crate::renderer;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode plus alternate screen for the lifetime of one game session.
///
/// Terminal state is restored best-effort on drop, and on any failure while
/// entering.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = execute!(io::stdout(), EnterAlternateScreen, Hide)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())))
            .inspect_err(|_| {
                let _ = restore_terminal();
            })?;

        Ok(Self { terminal })
    }

    /// Draws one snapshot.
    pub fn draw(&mut self, snapshot: &GameSnapshot, config: &GameConfig) -> io::Result<()> {
        draw_snapshot(&mut self.terminal, snapshot, config)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Renders `snapshot` as one full frame on any ratatui backend.
pub fn draw_snapshot<B: Backend>(
    terminal: &mut Terminal<B>,
    snapshot: &GameSnapshot,
    config: &GameConfig,
) -> io::Result<()> {
    terminal.draw(|frame| renderer::render(frame, snapshot, config))?;
    Ok(())
}

/// Chains a panic hook that leaves raw mode before the default hook prints.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}
