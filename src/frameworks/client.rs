// Framework bootstrap for the game client runtime.

use crate::domain::{BoardGeometry, GeometryError, InputCapture, KeyId, PlayerId, Renderer};
use crate::frameworks::config::{
    self, ClientConfig, KEY_EVENT_CHANNEL_CAPACITY, OUTBOUND_CHANNEL_CAPACITY, RendererKind,
};
use crate::interface_adapters::keys::spawn_stdin_keys;
use crate::interface_adapters::net::{ChannelInputSink, TransportError, spawn_transport};
use crate::interface_adapters::protocol::InputMessageDto;
use crate::interface_adapters::render::{HeadlessRenderer, TextRenderer};
use crate::use_cases::{FrameError, FrameScheduler, SessionContext, TransportReady, run_frame_loop};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, mpsc, oneshot};

// How long a clean shutdown waits for the socket to close.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub enum ClientError {
    Geometry(GeometryError),
    Frame(FrameError),
    Transport(TransportError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Geometry(err) => write!(f, "invalid board geometry: {err}"),
            ClientError::Frame(err) => write!(f, "frame loop failed: {err}"),
            ClientError::Transport(err) => write!(f, "transport failed: {err}"),
        }
    }
}

impl std::error::Error for ClientError {}

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout belongs to the text renderer.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Builds the session context from config. Fails if the canvas cannot be split
/// evenly into blocks.
pub fn build_session(config: &ClientConfig) -> Result<Arc<SessionContext>, ClientError> {
    let geometry = BoardGeometry::new(
        config.board_width,
        config.board_height,
        config.canvas_width,
        config.canvas_height,
    )
    .map_err(ClientError::Geometry)?;

    tracing::debug!(
        board_width = geometry.board_width,
        board_height = geometry.board_height,
        block_width = geometry.block_width,
        block_height = geometry.block_height,
        "board geometry"
    );

    let session = match &config.player_id {
        Some(id) => SessionContext::with_identity(geometry, PlayerId::new(id.clone())),
        None => SessionContext::new(geometry),
    };
    Ok(Arc::new(session))
}

/// Runs one client session until `shutdown` is notified or the transport
/// fails to open. Key-down events are read from `key_rx`. Returns the number
/// of ticks run.
pub async fn run(
    config: ClientConfig,
    key_rx: mpsc::Receiver<KeyId>,
    shutdown: Arc<Notify>,
) -> Result<u64, ClientError> {
    let session = build_session(&config)?;

    let (outbound_tx, outbound_rx) = mpsc::channel::<InputMessageDto>(OUTBOUND_CHANNEL_CAPACITY);

    tracing::info!(url = %config.server_url, "connecting");
    let (ready_rx, transport) = spawn_transport(
        config.server_url.clone(),
        session.clone(),
        outbound_rx,
        config.connect_timeout,
    );

    let input = InputCapture::new(config.captured_keys.iter().cloned());
    let sink = ChannelInputSink::new(outbound_tx);
    let tick_interval = config.tick_interval;

    let result = match config.renderer {
        RendererKind::Text => {
            let renderer = TextRenderer::terminal(std::io::stdout());
            drive(session, input, key_rx, sink, renderer, ready_rx, tick_interval, shutdown).await
        }
        RendererKind::Headless => {
            let renderer = HeadlessRenderer::default();
            drive(session, input, key_rx, sink, renderer, ready_rx, tick_interval, shutdown).await
        }
    };

    match result {
        Ok(ticks) => {
            // The sink is gone with the scheduler, so the connection task is closing.
            let _ = tokio::time::timeout(CLOSE_GRACE, transport).await;
            tracing::info!(ticks, "session ended");
            Ok(ticks)
        }
        Err(FrameError::TransportClosedBeforeReady) => {
            // Surface the underlying connect error rather than the missing signal.
            match transport.await {
                Ok(Err(e)) => Err(ClientError::Transport(e)),
                _ => Err(ClientError::Frame(FrameError::TransportClosedBeforeReady)),
            }
        }
        Err(e) => Err(ClientError::Frame(e)),
    }
}

#[allow(clippy::too_many_arguments)]
async fn drive<R: Renderer>(
    session: Arc<SessionContext>,
    input: InputCapture,
    key_rx: mpsc::Receiver<KeyId>,
    sink: ChannelInputSink,
    renderer: R,
    ready_rx: oneshot::Receiver<TransportReady>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) -> Result<u64, FrameError> {
    let scheduler = FrameScheduler::new(session, input, key_rx, sink, renderer)?;
    run_frame_loop(scheduler, ready_rx, tick_interval, shutdown).await
}

pub async fn run_with_config() -> Result<u64, ClientError> {
    init_runtime();

    let config = config::ClientConfig::from_env();
    let shutdown = Arc::new(Notify::new());

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received; shutting down");
        }
        ctrl_c.notify_one();
    });

    let (key_tx, key_rx) = mpsc::channel::<KeyId>(KEY_EVENT_CHANNEL_CAPACITY);
    let _keys = spawn_stdin_keys(key_tx);

    run(config, key_rx, shutdown).await.inspect_err(|e| {
        tracing::error!(error = %e, "client error");
    })
}
