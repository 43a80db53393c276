use super::reply::{answer_reply, refused_reply};
use crate::ports::{DnsHandler, RequestContext, ResponseWriter};
use async_trait::async_trait;
use autoip6_domain::{AutoIp6Settings, DispatchOutcome, DomainError};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RecordType;
use std::sync::Arc;
use tracing::{debug, warn};

/// Answers AAAA queries whose name encodes an allowed IPv6 address.
///
/// Every other query goes to `next`. The settings are fixed at
/// construction, so one instance serves concurrent requests without locks.
pub struct ServeAutoIp6UseCase {
    settings: AutoIp6Settings,
    next: Option<Arc<dyn DnsHandler>>,
}

impl ServeAutoIp6UseCase {
    pub const NAME: &'static str = "autoip6";

    pub fn new(settings: AutoIp6Settings, next: Option<Arc<dyn DnsHandler>>) -> Self {
        Self { settings, next }
    }

    /// Pure decision for `request`, without touching any collaborator.
    pub fn decide(&self, request: &Message) -> Result<DispatchOutcome, DomainError> {
        let Some(question) = request.queries().first() else {
            return Ok(DispatchOutcome::PassThrough);
        };

        if question.query_type() != RecordType::AAAA {
            return Ok(DispatchOutcome::PassThrough);
        }

        self.settings.resolve(&question.name().to_string())
    }

    pub async fn serve(
        &self,
        ctx: &RequestContext,
        writer: &mut dyn ResponseWriter,
        request: &Message,
    ) -> Result<ResponseCode, DomainError> {
        match self.decide(request)? {
            DispatchOutcome::PassThrough => self.pass_through(ctx, writer, request).await,
            DispatchOutcome::Refused => {
                debug!(client = %ctx.src, "Encoded address not allowed");
                write_reply(writer, &refused_reply(request)).await;
                Ok(ResponseCode::Refused)
            }
            DispatchOutcome::Answer { address, ttl } => {
                let Some(reply) = answer_reply(request, address, ttl) else {
                    return self.pass_through(ctx, writer, request).await;
                };
                debug!(client = %ctx.src, address = %address, ttl, "Answering encoded address");
                write_reply(writer, &reply).await;
                Ok(ResponseCode::NoError)
            }
        }
    }

    async fn pass_through(
        &self,
        ctx: &RequestContext,
        writer: &mut dyn ResponseWriter,
        request: &Message,
    ) -> Result<ResponseCode, DomainError> {
        match &self.next {
            Some(next) => {
                debug!(client = %ctx.src, next = next.name(), "Passing query to next handler");
                next.handle(ctx, writer, request).await
            }
            None => Err(DomainError::NoNextHandler(Self::NAME)),
        }
    }
}

#[async_trait]
impl DnsHandler for ServeAutoIp6UseCase {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(
        &self,
        ctx: &RequestContext,
        writer: &mut dyn ResponseWriter,
        request: &Message,
    ) -> Result<ResponseCode, DomainError> {
        self.serve(ctx, writer, request).await
    }
}

async fn write_reply(writer: &mut dyn ResponseWriter, reply: &Message) {
    if let Err(e) = writer.write_message(reply).await {
        warn!(error = %e, "Failed to write reply");
    }
}
