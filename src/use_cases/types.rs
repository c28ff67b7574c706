// Use-case level inputs/outputs for the frame loop.

use crate::domain::RenderError;
use std::fmt;

/// Proof that the transport has opened and outbound sends are valid.
/// Produced once per connection by the transport adapter.
#[derive(Debug)]
pub struct TransportReady;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    WaitingForTransport,
    Running,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    /// Keys held during this tick.
    pub keys: usize,
    /// Whether the input frame was handed to the transport.
    pub sent: bool,
    pub render_ok: bool,
}

#[derive(Debug)]
pub enum FrameError {
    // Renderer refused the grid during setup.
    InitGrid(RenderError),
    // Transport went away before signalling readiness; no tick ran.
    TransportClosedBeforeReady,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::InitGrid(err) => write!(f, "failed to initialize grid: {err}"),
            FrameError::TransportClosedBeforeReady => {
                write!(f, "transport closed before signalling readiness")
            }
        }
    }
}

impl std::error::Error for FrameError {}
