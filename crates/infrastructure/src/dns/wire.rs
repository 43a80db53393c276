//! hickory-proto wire encoding helpers.

use autoip6_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Largest datagram accepted or relayed over UDP (EDNS(0) maximum).
pub const MAX_UDP_PAYLOAD: usize = 4096;

/// UDP payload every client accepts (RFC 1035 §2.3.4).
pub const MIN_UDP_PAYLOAD: usize = 512;

const HEADER_LEN: usize = 12;
const TYPE_OPT: u16 = 41;
const FLAG_TC: u8 = 0x02;

pub fn parse_message(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes)
        .map_err(|e| DomainError::InvalidMessage(format!("Failed to parse DNS message: {}", e)))
}

pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::InvalidMessage(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}

/// FORMERR reply for bytes that did not parse. Needs at least the 2-byte
/// message id; returns `None` otherwise.
pub fn format_error_reply(bytes: &[u8]) -> Option<Message> {
    let id = u16::from_be_bytes([*bytes.first()?, *bytes.get(1)?]);

    let mut reply = Message::new(id, MessageType::Response, OpCode::Query);
    reply.set_response_code(ResponseCode::FormErr);
    Some(reply)
}

/// UDP payload size the querying client accepts.
///
/// Taken from the EDNS(0) OPT record of the raw query, floored at 512 and
/// capped at `MAX_UDP_PAYLOAD`. Queries without a readable OPT record get 512.
pub fn udp_payload_limit(query: &[u8]) -> usize {
    find_opt_payload(query)
        .map(|size| usize::from(size).clamp(MIN_UDP_PAYLOAD, MAX_UDP_PAYLOAD))
        .unwrap_or(MIN_UDP_PAYLOAD)
}

/// Returns `response` unchanged when it fits in `limit` bytes. Otherwise
/// keeps the header and question only, zeroes the record counts and sets TC
/// so the client retries over TCP.
pub fn truncate_to_limit(response: Vec<u8>, limit: usize) -> Vec<u8> {
    if response.len() <= limit || response.len() < HEADER_LEN {
        return response;
    }

    let qdcount = read_u16(&response, 4).unwrap_or(0);
    let (end, qdcount) = match skip_questions(&response, qdcount) {
        Some(end) if end <= limit => (end, qdcount),
        _ => (HEADER_LEN, 0),
    };

    let mut truncated = response[..end].to_vec();
    truncated[2] |= FLAG_TC;
    truncated[4..6].copy_from_slice(&qdcount.to_be_bytes());
    truncated[6..HEADER_LEN].fill(0);
    truncated
}

fn find_opt_payload(buf: &[u8]) -> Option<u16> {
    let qdcount = read_u16(buf, 4)?;
    let ancount = read_u16(buf, 6)?;
    let nscount = read_u16(buf, 8)?;
    let arcount = read_u16(buf, 10)?;

    let mut pos = skip_questions(buf, qdcount)?;
    for _ in 0..(u32::from(ancount) + u32::from(nscount)) {
        pos = skip_record(buf, pos)?;
    }

    for _ in 0..arcount {
        let type_pos = skip_name(buf, pos)?;
        if read_u16(buf, type_pos)? == TYPE_OPT {
            // The CLASS field of an OPT record carries the payload size.
            return read_u16(buf, type_pos + 2);
        }
        pos = skip_record(buf, pos)?;
    }

    None
}

fn skip_questions(buf: &[u8], count: u16) -> Option<usize> {
    let mut pos = HEADER_LEN;
    for _ in 0..count {
        pos = skip_name(buf, pos)? + 4;
        if pos > buf.len() {
            return None;
        }
    }
    Some(pos)
}

fn skip_record(buf: &[u8], pos: usize) -> Option<usize> {
    let fixed = skip_name(buf, pos)?;
    let rdlen = read_u16(buf, fixed + 8)? as usize;
    let end = fixed + 10 + rdlen;
    (end <= buf.len()).then_some(end)
}

fn skip_name(buf: &[u8], mut pos: usize) -> Option<usize> {
    loop {
        let len = *buf.get(pos)?;
        match len & 0xC0 {
            0x00 if len == 0 => return Some(pos + 1),
            0x00 => pos += 1 + len as usize,
            0xC0 => return (pos + 2 <= buf.len()).then_some(pos + 2),
            _ => return None,
        }
    }
}

fn read_u16(buf: &[u8], pos: usize) -> Option<u16> {
    Some(u16::from_be_bytes([*buf.get(pos)?, *buf.get(pos + 1)?]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::Query;
    use hickory_proto::rr::rdata::AAAA;
    use hickory_proto::rr::{Name, RData, Record, RecordType};
    use std::net::Ipv6Addr;
    use std::str::FromStr;

    #[test]
    fn test_serialize_then_parse() {
        let mut query = Query::new();
        query.set_name(Name::from_str("host.example.com.").unwrap());
        query.set_query_type(RecordType::AAAA);

        let mut message = Message::new(42, MessageType::Query, OpCode::Query);
        message.add_query(query);

        let bytes = serialize_message(&message).unwrap();
        let parsed = parse_message(&bytes).unwrap();

        assert_eq!(parsed.id(), 42);
        assert_eq!(parsed.queries()[0].query_type(), RecordType::AAAA);
    }

    #[test]
    fn test_parse_garbage_fails() {
        let result = parse_message(&[0x12, 0x34, 0xff]);
        assert!(matches!(result, Err(DomainError::InvalidMessage(_))));
    }

    #[test]
    fn test_format_error_reply_keeps_id() {
        let reply = format_error_reply(&[0x12, 0x34, 0xff]).unwrap();
        assert_eq!(reply.id(), 0x1234);
        assert_eq!(reply.response_code(), ResponseCode::FormErr);
    }

    #[test]
    fn test_format_error_reply_needs_id() {
        assert!(format_error_reply(&[0x12]).is_none());
    }

    fn query_bytes(name: &str) -> Vec<u8> {
        let mut query = Query::new();
        query.set_name(Name::from_str(name).unwrap());
        query.set_query_type(RecordType::AAAA);

        let mut message = Message::new(7, MessageType::Query, OpCode::Query);
        message.add_query(query);
        serialize_message(&message).unwrap()
    }

    fn with_opt(mut bytes: Vec<u8>, payload: u16) -> Vec<u8> {
        bytes[11] = 1;
        bytes.extend_from_slice(&[0x00, 0x00, 0x29]);
        bytes.extend_from_slice(&payload.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        bytes
    }

    fn large_response(answers: usize) -> Vec<u8> {
        let name = Name::from_str("big.example.com.").unwrap();
        let mut query = Query::new();
        query.set_name(name.clone());
        query.set_query_type(RecordType::AAAA);

        let mut message = Message::new(7, MessageType::Response, OpCode::Query);
        message.add_query(query);
        for i in 0..answers {
            let address = Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, i as u16);
            message.add_answer(Record::from_rdata(name.clone(), 60, RData::AAAA(AAAA(address))));
        }
        serialize_message(&message).unwrap()
    }

    #[test]
    fn test_payload_limit_without_edns_is_512() {
        assert_eq!(udp_payload_limit(&query_bytes("host.example.com.")), 512);
    }

    #[test]
    fn test_payload_limit_from_opt_record() {
        let query = with_opt(query_bytes("host.example.com."), 1232);
        assert_eq!(udp_payload_limit(&query), 1232);
    }

    #[test]
    fn test_payload_limit_is_clamped() {
        let small = with_opt(query_bytes("host.example.com."), 100);
        let huge = with_opt(query_bytes("host.example.com."), 65000);

        assert_eq!(udp_payload_limit(&small), MIN_UDP_PAYLOAD);
        assert_eq!(udp_payload_limit(&huge), MAX_UDP_PAYLOAD);
    }

    #[test]
    fn test_payload_limit_of_garbage_is_512() {
        assert_eq!(udp_payload_limit(&[0x12, 0x34, 0x00]), 512);
    }

    #[test]
    fn test_small_response_is_untouched() {
        let response = large_response(2);
        assert_eq!(truncate_to_limit(response.clone(), 512), response);
    }

    #[test]
    fn test_oversized_response_keeps_question_and_sets_tc() {
        let response = large_response(40);
        assert!(response.len() > 512);

        let truncated = truncate_to_limit(response, 512);
        assert!(truncated.len() <= 512);

        let parsed = parse_message(&truncated).unwrap();
        assert!(parsed.truncated());
        assert_eq!(parsed.id(), 7);
        assert_eq!(parsed.queries().len(), 1);
        assert_eq!(parsed.queries()[0].name().to_string(), "big.example.com.");
        assert!(parsed.answers().is_empty());
    }

    #[test]
    fn test_larger_limit_lets_response_through() {
        let response = large_response(40);
        assert_eq!(truncate_to_limit(response.clone(), 4096), response);
    }
}
