pub mod builders;
pub mod dns_server_mock;

pub use builders::{aaaa_request, request, CaptureWriter, CLIENT};
pub use dns_server_mock::{MockDnsServer, UPSTREAM_ANSWER};
