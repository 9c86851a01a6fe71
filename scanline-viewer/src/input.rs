//! Terminal key handling for runtime toggles.
//!
//! The viewer reads single keys between drain cycles via crossterm's
//! non-blocking event poll. Raw mode is enabled for the lifetime of
//! the handle and restored on drop (including unwinds).

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Commands a user can issue while the viewer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    /// `q`, Esc, or Ctrl-C: clean shutdown.
    Quit,
    /// `b`: flip the bit-to-pixel mapping within each wire byte.
    ToggleBitOrder,
    /// `i`: flip display inversion.
    ToggleInvert,
    /// `s`: save the currently displayed buffer to disk.
    SaveSnapshot,
}

/// Raw-mode terminal key reader.
pub struct KeyInput {
    _private: (),
}

impl KeyInput {
    /// Enable raw mode and return the handle.
    ///
    /// Fails when stdin is not a terminal; the caller should degrade to
    /// running without runtime toggles in that case.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }

    /// Return the next pending command without blocking, or `None`.
    ///
    /// Non-command keys are consumed and ignored.
    pub fn poll(&mut self) -> io::Result<Option<ViewerCommand>> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let cmd = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(ViewerCommand::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(ViewerCommand::Quit)
                }
                KeyCode::Char('b') => Some(ViewerCommand::ToggleBitOrder),
                KeyCode::Char('i') => Some(ViewerCommand::ToggleInvert),
                KeyCode::Char('s') => Some(ViewerCommand::SaveSnapshot),
                _ => None,
            };
            if cmd.is_some() {
                return Ok(cmd);
            }
        }
        Ok(None)
    }
}

impl Drop for KeyInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
