use autoip6_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::AAAA;
use hickory_proto::rr::{RData, Record};
use std::net::Ipv6Addr;

/// Response skeleton for `request`: same id, opcode, RD and CD flags, and
/// the first question echoed back. Response code is NOERROR.
pub fn reply_to(request: &Message) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_checking_disabled(request.checking_disabled());

    if request.op_code() == OpCode::Query {
        if let Some(query) = request.queries().first() {
            reply.add_query(query.clone());
        }
    }

    reply
}

/// REFUSED reply without records, used for addresses outside the allow-list.
pub fn refused_reply(request: &Message) -> Message {
    error_reply(request, ResponseCode::Refused)
}

/// Authoritative NOERROR reply carrying a single AAAA record owned by the
/// question name.
pub fn answer_reply(request: &Message, address: Ipv6Addr, ttl: u32) -> Option<Message> {
    let name = request.queries().first()?.name().clone();

    let mut reply = reply_to(request);
    reply.set_authoritative(true);
    reply.set_response_code(ResponseCode::NoError);
    reply.add_answer(Record::from_rdata(name, ttl, RData::AAAA(AAAA(address))));

    Some(reply)
}

/// Reply reporting `code` with no records, used when a handler fails.
pub fn error_reply(request: &Message, code: ResponseCode) -> Message {
    let mut reply = reply_to(request);
    reply.set_response_code(code);
    reply
}

pub fn response_code_for(error: &DomainError) -> ResponseCode {
    match error {
        DomainError::InvalidMessage(_) => ResponseCode::FormErr,
        _ => ResponseCode::ServFail,
    }
}
