use crate::domain::KeyId;
use std::{env, time::Duration};

// Runtime/client constants (not gameplay rules).

pub const OUTBOUND_CHANNEL_CAPACITY: usize = 64;
pub const KEY_EVENT_CHANNEL_CAPACITY: usize = 256;

const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:3012";
const DEFAULT_BOARD_SIZE: u32 = 20;
const DEFAULT_CANVAS_SIZE: u32 = 400;
const DEFAULT_TICK_MS: u64 = 1000 / 60;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_CAPTURED_KEYS: &str = "ArrowLeft,ArrowRight,ArrowUp,ArrowDown,Space";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Text,
    Headless,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub board_width: u32,
    pub board_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub tick_interval: Duration,
    pub connect_timeout: Duration,
    pub player_id: Option<String>,
    pub captured_keys: Vec<KeyId>,
    pub renderer: RendererKind,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            board_width: DEFAULT_BOARD_SIZE,
            board_height: DEFAULT_BOARD_SIZE,
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            player_id: None,
            captured_keys: parse_keys(DEFAULT_CAPTURED_KEYS),
            renderer: RendererKind::Text,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let dimension = |key: &str, default: u32| {
            number(key)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(default)
        };

        Self {
            server_url: lookup("GAME_SERVER_URL").unwrap_or(defaults.server_url),
            board_width: dimension("BOARD_WIDTH", defaults.board_width),
            board_height: dimension("BOARD_HEIGHT", defaults.board_height),
            canvas_width: dimension("CANVAS_WIDTH", defaults.canvas_width),
            canvas_height: dimension("CANVAS_HEIGHT", defaults.canvas_height),
            tick_interval: number("TICK_INTERVAL_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            connect_timeout: number("CONNECT_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.connect_timeout),
            player_id: lookup("PLAYER_ID")
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            captured_keys: lookup("CAPTURED_KEYS")
                .map(|keys| parse_keys(&keys))
                .unwrap_or(defaults.captured_keys),
            renderer: match lookup("RENDERER").as_deref().map(str::trim) {
                Some("headless") => RendererKind::Headless,
                _ => defaults.renderer,
            },
        }
    }
}

fn parse_keys(keys: &str) -> Vec<KeyId> {
    keys.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(KeyId::new)
        .collect()
}
