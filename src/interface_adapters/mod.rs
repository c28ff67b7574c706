// Interface adapters: wire protocol, network handling, key input, and rendering.

pub mod keys;
pub mod net;
pub mod protocol;
pub mod render;
