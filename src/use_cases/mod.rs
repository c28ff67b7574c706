// Use cases layer: the per-frame client workflow and the state it reads.

pub mod frame;
pub mod session;
pub mod store;
pub mod throttle;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use frame::{FrameScheduler, RunningScheduler, run_frame_loop};
pub use session::SessionContext;
pub use store::GameStateStore;
pub use types::{FrameError, SchedulerPhase, TickReport, TransportReady};
