use super::entity::EntityKind;
use super::kinematics::Position;
use std::io;
use std::time::Duration;

// Port for drawing entity shapes; the renderer decides which glyphs each kind gets.
pub trait Surface {
    fn draw(&mut self, kind: EntityKind, at: Position);
}

/// A discrete signal read from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    Fire,
    Quit,
}

// Port for the player's input device.
pub trait SignalSource: Send {
    /// Waits at most `timeout` for the next signal.
    ///
    /// `Ok(None)` means the timeout elapsed without input. An `UnexpectedEof` error
    /// means the device is gone and no more signals will arrive.
    fn wait_for_signal(&mut self, timeout: Duration) -> io::Result<Option<InputSignal>>;
}
