use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{
    BoardGeometry, GameState, InputFrame, InputSink, PlayerId, RenderError, Renderer, SendError,
};

pub(crate) type SentFrames = Arc<Mutex<Vec<(PlayerId, InputFrame)>>>;

// Outbound port fake that records every frame handed to it.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    sent: SentFrames,
    failure: Option<SendError>,
}

impl RecordingSink {
    pub(crate) fn failing_with(mut self, failure: SendError) -> Self {
        self.failure = Some(failure);
        self
    }

    pub(crate) fn sent(&self) -> Vec<(PlayerId, InputFrame)> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

impl InputSink for RecordingSink {
    fn send_input(&mut self, player_id: &PlayerId, frame: &InputFrame) -> Result<(), SendError> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        let mut guard = self.sent.lock().expect("sent mutex poisoned");
        guard.push((player_id.clone(), frame.clone()));
        Ok(())
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct RenderFailures {
    pub init: bool,
    pub draw: bool,
    pub panic_on_first_draw: bool,
}

// Renderer fake. Counters are atomics so a panicking draw never poisons them.
#[derive(Clone, Default)]
pub(crate) struct RecordingRenderer {
    geometry: Arc<Mutex<Option<BoardGeometry>>>,
    clears: Arc<AtomicU64>,
    draws: Arc<AtomicU64>,
    last_piece_count: Arc<AtomicU64>,
    panicked: Arc<AtomicBool>,
    failures: RenderFailures,
}

impl RecordingRenderer {
    pub(crate) fn with_failures(mut self, failures: RenderFailures) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn init_geometry(&self) -> Option<BoardGeometry> {
        *self.geometry.lock().expect("geometry mutex poisoned")
    }

    pub(crate) fn frames_drawn(&self) -> u64 {
        self.draws.load(Ordering::SeqCst)
    }

    pub(crate) fn clears(&self) -> u64 {
        self.clears.load(Ordering::SeqCst)
    }

    pub(crate) fn last_piece_count(&self) -> u64 {
        self.last_piece_count.load(Ordering::SeqCst)
    }
}

impl Renderer for RecordingRenderer {
    fn init_grid(&mut self, geometry: &BoardGeometry) -> Result<(), RenderError> {
        if self.failures.init {
            return Err(RenderError::Other("init failed".to_string()));
        }
        *self.geometry.lock().expect("geometry mutex poisoned") = Some(*geometry);
        Ok(())
    }

    fn clear_board(&mut self) -> Result<(), RenderError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn draw_pieces(&mut self, state: &GameState) -> Result<(), RenderError> {
        if self.failures.panic_on_first_draw && !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("renderer blew up");
        }
        if self.failures.draw {
            return Err(RenderError::Other("draw failed".to_string()));
        }
        self.last_piece_count
            .store(state.pieces.len() as u64, Ordering::SeqCst);
        self.draws.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
