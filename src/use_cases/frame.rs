use super::session::SessionContext;
use super::throttle::{should_log, throttle_start};
use super::types::{FrameError, SchedulerPhase, TickReport, TransportReady};
use crate::domain::{
    GameState, InputCapture, InputFrame, InputSink, KeyDisposition, KeyId, Renderer, SendError,
};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Notify, mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, trace, warn};

/// Frame loop before the transport is ready. Holds everything a tick needs but
/// cannot tick; [`FrameScheduler::start`] is the only way to a running loop.
pub struct FrameScheduler<S, R> {
    session: Arc<SessionContext>,
    input: InputCapture,
    key_rx: mpsc::Receiver<KeyId>,
    sink: S,
    renderer: R,
}

impl<S, R> FrameScheduler<S, R>
where
    S: InputSink,
    R: Renderer,
{
    /// Builds the scheduler and lays out the renderer's grid.
    pub fn new(
        session: Arc<SessionContext>,
        input: InputCapture,
        key_rx: mpsc::Receiver<KeyId>,
        sink: S,
        mut renderer: R,
    ) -> Result<Self, FrameError> {
        renderer
            .init_grid(session.geometry())
            .map_err(FrameError::InitGrid)?;

        Ok(Self {
            session,
            input,
            key_rx,
            sink,
            renderer,
        })
    }

    pub fn phase(&self) -> SchedulerPhase {
        SchedulerPhase::WaitingForTransport
    }

    /// The single WaitingForTransport -> Running transition.
    pub fn start(mut self, _ready: TransportReady) -> RunningScheduler<S, R> {
        // Keys pressed while waiting belong to no tick.
        let mut stale = 0u64;
        while self.key_rx.try_recv().is_ok() {
            stale += 1;
        }
        info!(stale_keys = stale, "transport ready; frame loop running");
        let now = throttle_start();
        RunningScheduler {
            session: self.session,
            input: self.input,
            key_rx: self.key_rx,
            sink: self.sink,
            renderer: self.renderer,
            ticks: 0,
            frames_sent: 0,
            last_send_log: now,
            last_render_log: now,
        }
    }
}

pub struct RunningScheduler<S, R> {
    session: Arc<SessionContext>,
    input: InputCapture,
    key_rx: mpsc::Receiver<KeyId>,
    sink: S,
    renderer: R,
    ticks: u64,
    frames_sent: u64,
    last_send_log: Instant,
    last_render_log: Instant,
}

impl<S, R> RunningScheduler<S, R>
where
    S: InputSink,
    R: Renderer,
{
    pub fn phase(&self) -> SchedulerPhase {
        SchedulerPhase::Running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Runs one input -> send -> render cycle.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;

        // Key events that arrived since the previous tick belong to this one.
        while let Ok(key) = self.key_rx.try_recv() {
            if self.input.record_key_down(key.clone()) == KeyDisposition::PassThrough {
                trace!(key = %key, "key is not a captured game key");
            }
        }
        // The capture is empty from here on, whether or not the frame is sent.
        let frame = self.input.consume_frame();

        // One snapshot per tick: resolution and drawing see the same state.
        let snapshot = self.session.store().snapshot();
        let sent = self.send_if_controlling(&snapshot, &frame);
        let render_ok = self.render(&snapshot);

        let report = TickReport {
            tick: self.ticks,
            keys: frame.len(),
            sent,
            render_ok,
        };
        trace!(?report, "tick");
        report
    }

    fn send_if_controlling(&mut self, state: &GameState, frame: &InputFrame) -> bool {
        let Some(player_id) = self.session.my_player_id() else {
            return false;
        };
        // No piece yet (waiting to spawn): nothing goes out this tick.
        let Some(piece) = state.resolve_controlled_piece(player_id) else {
            return false;
        };

        // The owner id carries the form the server issued it in.
        match self.sink.send_input(&piece.owner_id, frame) {
            Ok(()) => {
                self.frames_sent += 1;
                true
            }
            Err(SendError::Full) => {
                if should_log(&mut self.last_send_log) {
                    warn!(player_id = %player_id, "outbound queue full; dropping input");
                }
                false
            }
            Err(SendError::Closed) => {
                if should_log(&mut self.last_send_log) {
                    warn!(player_id = %player_id, "transport closed; input not sent");
                }
                false
            }
        }
    }

    fn render(&mut self, state: &GameState) -> bool {
        let result = self
            .renderer
            .clear_board()
            .and_then(|()| self.renderer.draw_pieces(state));

        match result {
            Ok(()) => true,
            Err(e) => {
                if should_log(&mut self.last_render_log) {
                    warn!(error = %e, tick = self.ticks, "render failed; skipping frame");
                }
                false
            }
        }
    }
}

/// Waits for the transport, then ticks every `tick_interval` until `shutdown`
/// is notified. Returns how many ticks ran.
pub async fn run_frame_loop<S, R>(
    scheduler: FrameScheduler<S, R>,
    ready_rx: oneshot::Receiver<TransportReady>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) -> Result<u64, FrameError>
where
    S: InputSink,
    R: Renderer,
{
    let ready = tokio::select! {
        _ = shutdown.notified() => {
            info!("shutdown before transport became ready");
            return Ok(0);
        }
        ready = ready_rx => ready.map_err(|_| FrameError::TransportClosedBeforeReady)?,
    };

    let mut running = scheduler.start(ready);

    let mut interval = tokio::time::interval(tick_interval);
    // A missed display refresh is dropped, not replayed in a burst.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_panic_log = throttle_start();
    let mut panicked = 0u64;

    loop {
        tokio::select! {
            _ = shutdown.notified() => break,
            _ = interval.tick() => {}
        }

        // A bad frame must not end the session.
        if catch_unwind(AssertUnwindSafe(|| running.tick())).is_err() {
            panicked += 1;
            if should_log(&mut last_panic_log) {
                error!(
                    tick = running.ticks(),
                    panicked,
                    "tick panicked; continuing with next frame"
                );
            }
        }
    }

    debug!(
        ticks = running.ticks(),
        frames_sent = running.frames_sent(),
        panicked,
        "frame loop stopped"
    );
    Ok(running.ticks())
}
