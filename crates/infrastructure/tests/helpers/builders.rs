#![allow(dead_code)]
use async_trait::async_trait;
use autoip6_application::ports::{Protocol, RequestContext, ResponseWriter};
use autoip6_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const CLIENT: RequestContext = RequestContext {
    src: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)), 40000),
    protocol: Protocol::Udp,
};

pub fn request(name: &str, record_type: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_ascii(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(0x4242, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    message
}

pub fn aaaa_request(name: &str) -> Message {
    request(name, RecordType::AAAA)
}

#[derive(Default)]
pub struct CaptureWriter {
    pub messages: Vec<Message>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseWriter for CaptureWriter {
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError> {
        self.messages.push(message.clone());
        Ok(())
    }
}
