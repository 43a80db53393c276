use super::transport::send_with_length_prefix;
use super::wire::{serialize_message, truncate_to_limit, MIN_UDP_PAYLOAD};
use async_trait::async_trait;
use autoip6_application::ports::ResponseWriter;
use autoip6_domain::DomainError;
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio::net::UdpSocket;

/// Sends replies as single datagrams back to the querying peer.
///
/// Replies larger than the peer's payload limit go out truncated with TC
/// set. The limit defaults to 512 bytes.
pub struct UdpResponseWriter {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    max_payload: usize,
}

impl UdpResponseWriter {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr) -> Self {
        Self {
            socket,
            peer,
            max_payload: MIN_UDP_PAYLOAD,
        }
    }

    pub fn with_payload_limit(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }
}

#[async_trait]
impl ResponseWriter for UdpResponseWriter {
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError> {
        let bytes = truncate_to_limit(serialize_message(message)?, self.max_payload);
        self.socket
            .send_to(&bytes, self.peer)
            .await
            .map_err(|e| DomainError::Transport(format!("UDP send to {}: {}", self.peer, e)))?;
        Ok(())
    }
}

/// Writes replies with the two-byte length prefix of DNS over TCP
/// (RFC 1035 §4.2.2).
pub struct TcpResponseWriter<'a, W> {
    stream: &'a mut W,
}

impl<'a, W> TcpResponseWriter<'a, W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(stream: &'a mut W) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<W> ResponseWriter for TcpResponseWriter<'_, W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError> {
        let bytes = serialize_message(message)?;
        send_with_length_prefix(&mut *self.stream, &bytes).await
    }
}
