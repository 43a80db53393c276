#![allow(dead_code)]

use async_trait::async_trait;
use autoip6_application::ports::{
    DnsHandler, DomainError, Protocol, RequestContext, ResponseWriter,
};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const CLIENT: RequestContext = RequestContext {
    src: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100)), 53000),
    protocol: Protocol::Udp,
};

pub fn request(name: &str, record_type: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_ascii(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(0xbeef, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    message
}

pub fn aaaa_request(name: &str) -> Message {
    request(name, RecordType::AAAA)
}

/// Collects every message written to it.
#[derive(Default)]
pub struct RecordingWriter {
    pub messages: Vec<Message>,
    pub fail: bool,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            messages: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ResponseWriter for RecordingWriter {
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError> {
        self.messages.push(message.clone());
        if self.fail {
            return Err(DomainError::Transport("socket closed".to_string()));
        }
        Ok(())
    }
}

/// Next handler returning a canned result and counting its calls.
pub struct MockNextHandler {
    result: Result<ResponseCode, DomainError>,
    write_reply: bool,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl MockNextHandler {
    pub fn new() -> Self {
        Self {
            result: Ok(ResponseCode::NoError),
            write_reply: false,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn returning(result: Result<ResponseCode, DomainError>) -> Self {
        Self {
            result,
            ..Self::new()
        }
    }

    pub fn writing_reply(mut self) -> Self {
        self.write_reply = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

impl Default for MockNextHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsHandler for MockNextHandler {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn handle(
        &self,
        _ctx: &RequestContext,
        writer: &mut dyn ResponseWriter,
        request: &Message,
    ) -> Result<ResponseCode, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = request
            .queries()
            .first()
            .map(|query| query.name().to_string());

        if self.write_reply {
            let mut reply = Message::new(request.id(), MessageType::Response, OpCode::Query);
            reply.set_response_code(ResponseCode::NXDomain);
            writer.write_message(&reply).await?;
        }

        self.result.clone()
    }
}
