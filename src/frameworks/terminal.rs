// Terminal I/O: raw mode lifetime, keyboard signals and frame presentation.

use crate::domain::{EntityKind, InputSignal, Position, SignalSource, Surface};
use crate::interface_adapters::render::{AsciiGrid, status_line};
use crate::use_cases::{GameStatus, RenderTarget};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// Set while the game owns the screen; stderr output would land on the playfield.
static SCREEN_OWNED: AtomicBool = AtomicBool::new(false);

/// True while a [`RawModeGuard`] holds the terminal.
pub fn screen_owned() -> bool {
    SCREEN_OWNED.load(Ordering::Acquire)
}

/// Leaves the alternate screen and raw mode. Safe to call more than once.
pub fn restore_terminal() {
    if SCREEN_OWNED.swap(false, Ordering::AcqRel) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Keeps the terminal in raw mode on the alternate screen until dropped.
///
/// Dropping restores the terminal, including while unwinding from a panic.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(error) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }
        SCREEN_OWNED.store(true, Ordering::Release);
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Maps a key press to a player signal.
pub fn signal_for_key(key: KeyEvent) -> Option<InputSignal> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputSignal::Quit)
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(InputSignal::Fire),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputSignal::Quit),
        _ => None,
    }
}

/// Keyboard input read through crossterm's event queue.
#[derive(Debug, Default)]
pub struct KeyboardSignals;

impl SignalSource for KeyboardSignals {
    fn wait_for_signal(&mut self, timeout: Duration) -> io::Result<Option<InputSignal>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(signal_for_key(key)),
            _ => Ok(None),
        }
    }
}

/// Presents the ASCII grid on stdout, followed by the status line.
pub struct TerminalScreen {
    grid: AsciiGrid,
    out: Stdout,
}

impl TerminalScreen {
    pub fn new(grid: AsciiGrid) -> Self {
        Self {
            grid,
            out: io::stdout(),
        }
    }
}

impl Surface for TerminalScreen {
    fn draw(&mut self, kind: EntityKind, at: Position) {
        self.grid.draw(kind, at);
    }
}

impl RenderTarget for TerminalScreen {
    fn clear(&mut self) {
        self.grid.clear();
    }

    fn present(&mut self, status: &GameStatus) -> io::Result<()> {
        let (columns, _rows) = terminal::size().unwrap_or((u16::MAX, u16::MAX));
        let visible = usize::from(columns);

        queue!(self.out, Clear(ClearType::All))?;
        let mut row: u16 = 0;
        for line in self.grid.lines() {
            let clipped: String = line.chars().take(visible).collect();
            queue!(self.out, MoveTo(0, row), Print(clipped))?;
            row = row.saturating_add(1);
        }
        let hud: String = status_line(status).chars().take(visible).collect();
        queue!(self.out, MoveTo(0, row), Print(hud))?;
        self.out.flush()
    }
}
