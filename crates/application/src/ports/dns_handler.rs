use super::ResponseWriter;
use async_trait::async_trait;
use autoip6_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp => f.write_str("udp"),
            Self::Tcp => f.write_str("tcp"),
        }
    }
}

/// Transport facts about the query being served.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub src: SocketAddr,
    pub protocol: Protocol,
}

impl RequestContext {
    pub fn new(src: SocketAddr, protocol: Protocol) -> Self {
        Self { src, protocol }
    }
}

/// A link in the handler chain.
///
/// A handler either writes exactly one reply through `writer` and returns
/// its response code, or returns an error and writes nothing; the transport
/// then answers with the code mapped from the error.
#[async_trait]
pub trait DnsHandler: Send + Sync {
    fn name(&self) -> &'static str;

    async fn handle(
        &self,
        ctx: &RequestContext,
        writer: &mut dyn ResponseWriter,
        request: &Message,
    ) -> Result<ResponseCode, DomainError>;
}
