pub mod autoip6;

pub use autoip6::ServeAutoIp6UseCase;
