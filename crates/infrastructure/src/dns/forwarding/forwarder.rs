use crate::dns::transport::Transport;
use crate::dns::wire::{parse_message, serialize_message};
use async_trait::async_trait;
use autoip6_application::ports::{DnsHandler, RequestContext, ResponseWriter};
use autoip6_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Next handler that relays queries to a single upstream server.
///
/// The query goes out over UDP under a fresh message id and is retried over
/// TCP when the reply comes back truncated. The reply is written to the
/// client with the original id restored.
pub struct UpstreamForwarder {
    server: SocketAddr,
    udp: Transport,
    tcp: Transport,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub const NAME: &'static str = "forward";

    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            server,
            udp: Transport::udp(server),
            tcp: Transport::tcp(server),
            timeout,
        }
    }

    /// Sends `request` upstream and returns the parsed reply, still carrying
    /// the upstream id.
    async fn exchange(&self, request: &Message) -> Result<Message, DomainError> {
        let upstream_id = fastrand::u16(..);
        let mut bytes = serialize_message(request)?;
        bytes[..2].copy_from_slice(&upstream_id.to_be_bytes());

        let mut reply = self.send_via(&self.udp, &bytes, upstream_id).await?;

        if reply.truncated() {
            debug!(server = %self.server, "Truncated upstream reply, retrying over TCP");
            reply = self.send_via(&self.tcp, &bytes, upstream_id).await?;
        }

        Ok(reply)
    }

    async fn send_via(
        &self,
        transport: &Transport,
        bytes: &[u8],
        upstream_id: u16,
    ) -> Result<Message, DomainError> {
        let response = transport.send(bytes, self.timeout).await?;
        let reply = parse_message(&response.bytes)?;

        if reply.id() != upstream_id {
            return Err(DomainError::Transport(format!(
                "{} reply from {} has id {}, expected {}",
                response.protocol_used,
                self.server,
                reply.id(),
                upstream_id
            )));
        }

        Ok(reply)
    }
}

#[async_trait]
impl DnsHandler for UpstreamForwarder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        writer: &mut dyn ResponseWriter,
        request: &Message,
    ) -> Result<ResponseCode, DomainError> {
        let mut reply = self.exchange(request).await?;
        let mut header = *reply.header();
        header.set_id(request.id());
        reply.set_header(header);

        let rcode = reply.response_code();
        debug!(
            client = %ctx.src,
            server = %self.server,
            rcode = ?rcode,
            answers = reply.answers().len(),
            "Upstream reply relayed"
        );

        writer.write_message(&reply).await?;
        Ok(rcode)
    }
}
