// Network adapter modules: the WebSocket connection task, inbound decoding, outbound queue.

pub mod connection;
pub mod inbound;
pub mod sink;

pub use connection::{TransportError, spawn_transport};
pub use inbound::{Applied, InboundError, apply_server_text};
pub use sink::ChannelInputSink;
