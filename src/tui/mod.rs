//! Interactive explorer for a loaded metrics report.
//!
//! The explorer owns the terminal for its lifetime: raw mode and the
//! alternate screen are enabled on construction and restored on exit or drop.
//! Input is keyboard only, so mouse reporting stays off and the terminal keeps
//! its own text selection.
//!
//! ```rust,no_run
//! use metrics_viewer::model::DedupeKey;
//! use metrics_viewer::prefs::MemoryStore;
//! use metrics_viewer::tui::{app::ExplorerApp, Explorer};
//!
//! # fn run(dataset: metrics_viewer::model::Dataset) -> anyhow::Result<()> {
//! let app = ExplorerApp::new(dataset, DedupeKey::Name, Box::new(MemoryStore::default()));
//! Explorer::new(app)?.run()?;
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod app;
pub mod navigation;
pub mod theme;
pub mod views;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use app::ExplorerApp;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Explorer TUI manager
pub struct Explorer {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: ExplorerApp,
    restored: bool,
}

impl Explorer {
    pub fn new(app: ExplorerApp) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        enter_screen(&mut stdout)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app,
            restored: false,
        })
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.terminal.draw(|f| self.app.render(f))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.app.handle_key(key)? {
                        break;
                    }
                }
            }
        }

        self.cleanup()?;
        Ok(())
    }

    pub fn app(&self) -> &ExplorerApp {
        &self.app
    }

    /// Restore the terminal.
    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        leave_screen(self.terminal.backend_mut())?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn enter_screen<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen)
}

fn leave_screen<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen)
}

impl Drop for Explorer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_setup_leaves_mouse_reporting_off() {
        let mut out = Vec::new();
        enter_screen(&mut out).unwrap();
        leave_screen(&mut out).unwrap();
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("\x1b[?1049h"));
        assert!(written.contains("\x1b[?1049l"));
        for mode in ["?1000h", "?1002h", "?1003h", "?1006h"] {
            assert!(!written.contains(mode), "mouse mode {mode} enabled");
        }
    }
}
