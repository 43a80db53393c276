pub mod forwarding;
pub mod server;
pub mod transport;
pub mod wire;
pub mod writer;

pub use forwarding::UpstreamForwarder;
pub use server::DnsServerHandler;
pub use writer::{TcpResponseWriter, UdpResponseWriter};
