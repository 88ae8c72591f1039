use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::{EntityKind, InputSignal, Position, SignalSource, Surface};
use crate::use_cases::types::{GameStatus, RenderTarget};

// One presented frame as seen by the render collaborator.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub drawn: Vec<(EntityKind, Position)>,
    pub status: GameStatus,
}

impl Frame {
    pub(crate) fn count_of(&self, kind: EntityKind) -> usize {
        self.drawn.iter().filter(|(k, _)| *k == kind).count()
    }
}

// Render target that records every frame; clones share the same frame log.
#[derive(Clone, Default)]
pub(crate) struct RecordingTarget {
    pending: Vec<(EntityKind, Position)>,
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingTarget {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn frames(&self) -> Vec<Frame> {
        self.frames.lock().expect("frames mutex poisoned").clone()
    }
}

impl Surface for RecordingTarget {
    fn draw(&mut self, kind: EntityKind, at: Position) {
        self.pending.push((kind, at));
    }
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn present(&mut self, status: &GameStatus) -> io::Result<()> {
        let frame = Frame {
            drawn: std::mem::take(&mut self.pending),
            status: *status,
        };
        self.frames.lock().expect("frames mutex poisoned").push(frame);
        Ok(())
    }
}

// Input device that replays a fixed script, then idles until the timeout each call.
pub(crate) struct ScriptedSignals {
    script: VecDeque<io::Result<Option<InputSignal>>>,
}

impl ScriptedSignals {
    pub(crate) fn new(script: impl IntoIterator<Item = io::Result<Option<InputSignal>>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub(crate) fn idle() -> Self {
        Self::new([])
    }
}

impl SignalSource for ScriptedSignals {
    fn wait_for_signal(&mut self, timeout: Duration) -> io::Result<Option<InputSignal>> {
        match self.script.pop_front() {
            Some(next) => next,
            None => {
                std::thread::sleep(timeout);
                Ok(None)
            }
        }
    }
}
