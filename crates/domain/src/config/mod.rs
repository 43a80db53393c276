//! Configuration module for autoip6
//!
//! - `root`: main configuration and CLI overrides
//! - `server`: listener port and binding
//! - `autoip6`: address filter settings (`ttl`, `allowed`, `suffix`)
//! - `directives`: Corefile-style directive block for the address filter
//! - `upstream`: next handler used for pass-through queries
//! - `logging`: logging settings

pub mod autoip6;
pub mod directives;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod upstream;

pub use autoip6::AutoIp6Config;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
