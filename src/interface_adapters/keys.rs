// Key-down source: whitespace-separated key identifiers read line by line.
// A terminal line has no default action to suppress, so captured and other keys
// are forwarded alike; the frame loop records which is which.

use crate::domain::KeyId;
use crate::use_cases::throttle::{should_log, throttle_start};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Forwards every token of every line as a key-down event. Returns how many
/// keys were forwarded once the reader hits EOF or the frame loop is gone.
pub async fn forward_key_lines<R>(reader: R, key_tx: mpsc::Sender<KeyId>) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;
    let mut last_full_log = throttle_start();

    while let Some(line) = lines.next_line().await? {
        for token in line.split_whitespace() {
            match key_tx.try_send(KeyId::new(token)) {
                Ok(()) => forwarded += 1,
                Err(TrySendError::Full(key)) => {
                    if should_log(&mut last_full_log) {
                        warn!(key = %key, "key queue full; dropping key");
                    }
                }
                Err(TrySendError::Closed(_key)) => {
                    debug!("frame loop gone; key source stopping");
                    return Ok(forwarded);
                }
            }
        }
    }

    Ok(forwarded)
}

pub fn spawn_stdin_keys(key_tx: mpsc::Sender<KeyId>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        match forward_key_lines(stdin, key_tx).await {
            Ok(forwarded) => info!(forwarded, "key input closed"),
            Err(e) => warn!(error = %e, "failed to read key input"),
        }
    })
}
