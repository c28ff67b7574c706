// Decoding and application of inbound server frames.

use crate::domain::{InboundUpdate, PlayerId, UpdateError};
use crate::interface_adapters::protocol::{ProtocolError, ServerMessage};
use crate::use_cases::SessionContext;
use std::fmt;
use tracing::debug;

#[derive(Debug)]
pub enum InboundError {
    Decode(serde_json::Error),
    Protocol(ProtocolError),
    Rejected(UpdateError),
}

impl fmt::Display for InboundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InboundError::Decode(err) => write!(f, "invalid server message: {err}"),
            InboundError::Protocol(err) => write!(f, "malformed server message: {err}"),
            InboundError::Rejected(err) => write!(f, "update rejected: {err}"),
        }
    }
}

impl std::error::Error for InboundError {}

/// What an inbound frame did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Identity { player_id: PlayerId, accepted: bool },
    State,
}

/// Decodes one text frame and applies it. Anything malformed is refused here,
/// before the store is touched.
pub fn apply_server_text(session: &SessionContext, text: &str) -> Result<Applied, InboundError> {
    let message = serde_json::from_str::<ServerMessage>(text).map_err(InboundError::Decode)?;

    match message {
        ServerMessage::Init(init) => {
            let player_id = PlayerId::from(init.player_id);
            debug!(player_id = %player_id, piece_type = ?init.piece_type, "init received");
            let accepted = session.assign_identity(player_id.clone());
            Ok(Applied::Identity {
                player_id,
                accepted,
            })
        }
        ServerMessage::GameState(payload) => {
            let update = InboundUpdate::try_from(payload).map_err(InboundError::Protocol)?;
            session
                .store()
                .apply_inbound_update(update)
                .map_err(InboundError::Rejected)?;
            Ok(Applied::State)
        }
    }
}
