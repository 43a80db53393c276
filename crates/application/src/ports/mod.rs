mod dns_handler;
mod response_writer;

pub use dns_handler::{DnsHandler, Protocol, RequestContext};
pub use response_writer::ResponseWriter;

// Re-export for convenience
pub use autoip6_domain::DomainError;
