// Scripted WebSocket game server for driving the client end to end.
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

pub struct ScriptedServer {
    // Base URL the client should connect to.
    pub url: String,
    // Frames the server pushes to the connected client.
    to_client: mpsc::UnboundedSender<String>,
    // Text frames received from the client, in arrival order.
    from_client: mpsc::UnboundedReceiver<String>,
}

impl ScriptedServer {
    // Bind an ephemeral port and serve exactly one client connection.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        let (to_client, mut outgoing) = mpsc::unbounded_channel::<String>();
        let (received, from_client) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            let (stream, _peer) = listener.accept().await.expect("accept client");
            let mut socket = tokio_tungstenite::accept_async(stream)
                .await
                .expect("websocket handshake");

            loop {
                tokio::select! {
                    frame = outgoing.recv() => match frame {
                        Some(text) => {
                            if socket.send(Message::Text(text.into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                    incoming = socket.next() => match incoming {
                        Some(Ok(Message::Text(text))) => {
                            let _ = received.send(text.as_str().to_owned());
                        }
                        Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                        Some(Ok(_)) => {}
                    },
                }
            }
        });

        Self {
            url: format!("ws://{addr}"),
            to_client,
            from_client,
        }
    }

    pub fn push(&self, frame: serde_json::Value) {
        self.to_client
            .send(frame.to_string())
            .expect("server task alive");
    }

    pub fn push_raw(&self, frame: &str) {
        self.to_client
            .send(frame.to_string())
            .expect("server task alive");
    }

    // Next client frame parsed as JSON, or None if nothing arrives in time.
    pub async fn next_from_client(&mut self, wait: Duration) -> Option<serde_json::Value> {
        let text = timeout(wait, self.from_client.recv()).await.ok()??;
        Some(serde_json::from_str(&text).expect("client sends JSON"))
    }

    // Wait until a client frame matches `pred`, skipping others.
    pub async fn wait_for_client<F>(&mut self, wait: Duration, pred: F) -> Option<serde_json::Value>
    where
        F: Fn(&serde_json::Value) -> bool,
    {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let left = deadline.saturating_duration_since(tokio::time::Instant::now());
            let frame = self.next_from_client(left).await?;
            if pred(&frame) {
                return Some(frame);
            }
        }
    }
}
