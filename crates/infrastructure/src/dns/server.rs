use super::wire::{format_error_reply, parse_message};
use autoip6_application::ports::{DnsHandler, RequestContext, ResponseWriter};
use autoip6_application::use_cases::autoip6::{error_reply, response_code_for};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Entry point of the handler chain for raw DNS messages.
///
/// Parses the bytes, runs the chain and, when the chain fails without
/// writing, answers with the response code mapped from the error.
#[derive(Clone)]
pub struct DnsServerHandler {
    handler: Arc<dyn DnsHandler>,
}

impl DnsServerHandler {
    pub fn new(handler: Arc<dyn DnsHandler>) -> Self {
        Self { handler }
    }

    pub async fn handle_raw(
        &self,
        bytes: &[u8],
        ctx: RequestContext,
        writer: &mut dyn ResponseWriter,
    ) -> Option<ResponseCode> {
        let request = match parse_message(bytes) {
            Ok(request) => request,
            Err(e) => {
                warn!(client = %ctx.src, error = %e, "Malformed DNS message");
                let reply = format_error_reply(bytes)?;
                send(writer, &reply).await;
                return Some(ResponseCode::FormErr);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %ctx.src, "Ignoring DNS response sent to listener");
            return None;
        }

        if let Some(query) = request.queries().first() {
            debug!(
                domain = %query.name(),
                record_type = ?query.query_type(),
                client = %ctx.src,
                protocol = %ctx.protocol,
                "DNS query received"
            );
        }

        match self.handler.handle(&ctx, writer, &request).await {
            Ok(rcode) => Some(rcode),
            Err(e) => {
                let rcode = response_code_for(&e);
                if e.is_config_error() {
                    error!(
                        handler = self.handler.name(),
                        client = %ctx.src,
                        error = %e,
                        rcode = ?rcode,
                        "Query handling failed"
                    );
                } else {
                    warn!(
                        handler = self.handler.name(),
                        client = %ctx.src,
                        error = %e,
                        rcode = ?rcode,
                        "Query handling failed"
                    );
                }
                send(writer, &error_reply(&request, rcode)).await;
                Some(rcode)
            }
        }
    }
}

async fn send(writer: &mut dyn ResponseWriter, reply: &Message) {
    if let Err(e) = writer.write_message(reply).await {
        error!(error = %e, "Failed to send response");
    }
}
