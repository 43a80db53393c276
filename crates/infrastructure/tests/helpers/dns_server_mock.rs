#![allow(dead_code)]
use autoip6_infrastructure::dns::transport::{read_with_length_prefix, send_with_length_prefix};
use autoip6_infrastructure::dns::wire::{parse_message, serialize_message};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::AAAA;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv6Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub const UPSTREAM_ANSWER: Ipv6Addr = Ipv6Addr::new(0x2606, 0x4700, 0, 0, 0, 0, 0, 0x1111);

/// Upstream stand-in answering every AAAA query with `UPSTREAM_ANSWER`.
///
/// With `truncate_udp` set, UDP replies only carry the TC bit and the full
/// answer is served on TCP at the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(truncate_udp: bool) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = udp_queries.clone();
        let tcp_count = tcp_queries.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            let response = Self::build_mock_response(&buf[..len], truncate_udp);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            tcp_count.fetch_add(1, Ordering::SeqCst);
                            if let Ok(query) = read_with_length_prefix(&mut stream).await {
                                let response = Self::build_mock_response(&query, false);
                                let _ = send_with_length_prefix(&mut stream, &response).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    fn build_mock_response(query: &[u8], truncated: bool) -> Vec<u8> {
        let Ok(query) = parse_message(query) else {
            return vec![];
        };

        let mut response = Message::new(query.id(), MessageType::Response, query.op_code());
        response.set_recursion_desired(query.recursion_desired());
        response.set_recursion_available(true);
        response.set_response_code(ResponseCode::NoError);

        if let Some(question) = query.queries().first() {
            response.add_query(question.clone());
            if truncated {
                response.set_truncated(true);
            } else {
                response.add_answer(Record::from_rdata(
                    question.name().clone(),
                    60,
                    RData::AAAA(AAAA(UPSTREAM_ANSWER)),
                ));
            }
        }

        serialize_message(&response).unwrap_or_default()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
