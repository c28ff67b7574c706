pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::client::{ClientError, run, run_with_config};
pub use frameworks::config::ClientConfig;
