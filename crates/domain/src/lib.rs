//! autoip6 Domain Layer
pub mod allow_list;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod name_decoder;

pub use allow_list::AllowList;
pub use config::{AutoIp6Config, CliOverrides, Config, ConfigError};
pub use dispatch::{AutoIp6Settings, DispatchOutcome, DEFAULT_TTL};
pub use errors::DomainError;
pub use name_decoder::{decode_address, strip_suffix};
