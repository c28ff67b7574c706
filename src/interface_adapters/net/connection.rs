use crate::interface_adapters::net::inbound::apply_server_text;
use crate::interface_adapters::protocol::InputMessageDto;
use crate::use_cases::SessionContext;
use crate::use_cases::TransportReady;
use crate::use_cases::throttle::{should_log, throttle_start};

use futures_util::{SinkExt, StreamExt};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{Instrument, debug, error, info, info_span, warn};

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

#[derive(Debug)]
pub enum TransportError {
    // Categorizes connection failures so callers can decide policy.
    Connect(WsError),
    ConnectTimeout,
    Serialization(serde_json::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connect(err) => write!(f, "websocket connect failed: {err}"),
            TransportError::ConnectTimeout => write!(f, "websocket connect timed out"),
            TransportError::Serialization(err) => write!(f, "failed to encode input: {err}"),
        }
    }
}

impl std::error::Error for TransportError {}

enum LoopControl {
    Continue,
    Disconnect,
}

#[derive(Debug, Default)]
struct ConnStats {
    msgs_in: u64,
    msgs_out: u64,
    bytes_in: u64,
    bytes_out: u64,
    invalid_json: u32,
}

fn next_conn_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Connects to `url` in a background task.
///
/// The returned receiver resolves exactly once, right after the WebSocket
/// handshake succeeds. If the connection cannot be opened the sender is
/// dropped instead, so the frame loop never starts.
pub fn spawn_transport(
    url: String,
    session: Arc<SessionContext>,
    outbound_rx: mpsc::Receiver<InputMessageDto>,
    connect_timeout: Duration,
) -> (
    oneshot::Receiver<TransportReady>,
    JoinHandle<Result<(), TransportError>>,
) {
    let (ready_tx, ready_rx) = oneshot::channel();
    let span = info_span!("conn", conn_id = next_conn_id(), url = %url);
    let handle = tokio::spawn(
        run_transport(url, session, outbound_rx, connect_timeout, ready_tx).instrument(span),
    );
    (ready_rx, handle)
}

async fn run_transport(
    url: String,
    session: Arc<SessionContext>,
    mut outbound_rx: mpsc::Receiver<InputMessageDto>,
    connect_timeout: Duration,
    ready_tx: oneshot::Sender<TransportReady>,
) -> Result<(), TransportError> {
    let mut socket = match timeout(connect_timeout, connect_async(url.as_str())).await {
        Ok(Ok((socket, _response))) => socket,
        Ok(Err(e)) => {
            error!(error = %e, "failed to connect");
            return Err(TransportError::Connect(e));
        }
        Err(_) => {
            error!(timeout_ms = connect_timeout.as_millis(), "connect timed out");
            return Err(TransportError::ConnectTimeout);
        }
    };

    info!("connected");
    // The frame loop may already be gone (shutdown); nothing to signal then.
    let _ = ready_tx.send(TransportReady);

    let mut stats = ConnStats::default();
    let mut last_invalid_log = throttle_start();
    let mut fatal: Option<TransportError> = None;

    loop {
        let disconnect = tokio::select! {
            incoming = socket.next() => {
                matches!(
                    handle_incoming(incoming, &session, &mut stats, &mut last_invalid_log),
                    LoopControl::Disconnect
                )
            }

            outbound = outbound_rx.recv() => match outbound {
                Some(msg) => match send_input(&mut socket, &msg).await {
                    Ok(bytes) => {
                        stats.msgs_out += 1;
                        stats.bytes_out += bytes as u64;
                        false
                    }
                    Err(SendFailure::Encode(e)) => {
                        fatal = Some(TransportError::Serialization(e));
                        true
                    }
                    Err(SendFailure::Ws(e)) => {
                        warn!(error = %e, "failed to send input");
                        true
                    }
                },
                None => {
                    info!("outbound queue closed; closing connection");
                    true
                }
            }
        };

        if disconnect {
            if let Err(e) = socket.close(None).await {
                debug!(error = %e, "socket close error");
            }
            break;
        }
    }

    debug!(
        msgs_in = stats.msgs_in,
        msgs_out = stats.msgs_out,
        bytes_in = stats.bytes_in,
        bytes_out = stats.bytes_out,
        invalid_json = stats.invalid_json,
        "connection stats"
    );
    info!("disconnected");

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

enum SendFailure {
    Encode(serde_json::Error),
    Ws(WsError),
}

async fn send_input(socket: &mut Socket, msg: &InputMessageDto) -> Result<usize, SendFailure> {
    let txt = serde_json::to_string(msg).map_err(SendFailure::Encode)?;
    let bytes = txt.len();
    socket
        .send(Message::Text(txt.into()))
        .await
        .map_err(SendFailure::Ws)?;
    Ok(bytes)
}

fn handle_incoming(
    incoming: Option<Result<Message, WsError>>,
    session: &SessionContext,
    stats: &mut ConnStats,
    last_invalid_log: &mut Instant,
) -> LoopControl {
    match incoming {
        Some(Ok(Message::Text(text))) => {
            stats.msgs_in += 1;
            stats.bytes_in += text.len() as u64;

            if let Err(e) = apply_server_text(session, &text) {
                // Malformed updates are dropped; the loop and the store carry on.
                stats.invalid_json += 1;
                if should_log(last_invalid_log) {
                    warn!(error = %e, bytes = text.len(), "dropping server message");
                }
            }
            LoopControl::Continue
        }
        Some(Ok(Message::Binary(data))) => {
            stats.msgs_in += 1;
            stats.bytes_in += data.len() as u64;
            if should_log(last_invalid_log) {
                warn!(bytes = data.len(), "binary messages not supported; ignoring");
            }
            LoopControl::Continue
        }
        Some(Ok(Message::Close(frame))) => {
            info!(?frame, "server closed connection");
            LoopControl::Disconnect
        }
        // Ping/pong are answered by tungstenite itself.
        Some(Ok(_)) => LoopControl::Continue,
        Some(Err(e)) => {
            warn!(error = %e, "websocket recv error");
            LoopControl::Disconnect
        }
        None => {
            info!("websocket closed");
            LoopControl::Disconnect
        }
    }
}
