use async_trait::async_trait;
use autoip6_domain::DomainError;
use hickory_proto::op::Message;

#[async_trait]
pub trait ResponseWriter: Send {
    /// Sends one reply message to the client.
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError>;
}
