// Frameworks layer: process bootstrap and configuration.

pub mod client;
pub mod config;
