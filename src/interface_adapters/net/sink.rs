use crate::domain::{InputFrame, InputSink, PlayerId, SendError};
use crate::interface_adapters::protocol::InputMessageDto;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Outbound port backed by the connection task's queue. `try_send` only:
/// a full queue drops the frame instead of stalling the tick.
#[derive(Debug, Clone)]
pub struct ChannelInputSink {
    outbound_tx: mpsc::Sender<InputMessageDto>,
}

impl ChannelInputSink {
    pub fn new(outbound_tx: mpsc::Sender<InputMessageDto>) -> Self {
        Self { outbound_tx }
    }
}

impl InputSink for ChannelInputSink {
    fn send_input(&mut self, player_id: &PlayerId, frame: &InputFrame) -> Result<(), SendError> {
        match self.outbound_tx.try_send(InputMessageDto::new(player_id, frame)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_msg)) => Err(SendError::Full),
            Err(TrySendError::Closed(_msg)) => Err(SendError::Closed),
        }
    }
}
