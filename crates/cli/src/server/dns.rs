use autoip6_application::ports::{Protocol as DnsProtocol, RequestContext};
use autoip6_infrastructure::dns::transport::read_with_length_prefix;
use autoip6_infrastructure::dns::wire::{udp_payload_limit, MAX_UDP_PAYLOAD};
use autoip6_infrastructure::dns::{DnsServerHandler, TcpResponseWriter, UdpResponseWriter};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: DnsServerHandler,
    tcp_timeout: Duration,
) -> anyhow::Result<()> {
    let domain = if bind_addr.is_ipv6() {
        Domain::IPV6
    } else {
        Domain::IPV4
    };

    let udp_socket = Arc::new(create_udp_socket(domain, bind_addr)?);
    let tcp_listener = create_tcp_listener(domain, bind_addr)?;

    info!(bind_address = %bind_addr, "Starting DNS server (UDP + TCP)");

    let mut join_set = JoinSet::new();
    join_set.spawn(run_udp_worker(udp_socket, handler.clone()));
    join_set.spawn(run_tcp_listener(tcp_listener, handler, tcp_timeout));

    while let Some(result) = join_set.join_next().await {
        if let Err(e) = result {
            error!(error = %e, "DNS listener task failed");
        }
    }

    Ok(())
}

async fn run_udp_worker(socket: Arc<UdpSocket>, handler: DnsServerHandler) {
    let mut buf = vec![0u8; MAX_UDP_PAYLOAD];

    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP receive failed");
                continue;
            }
        };

        let query = buf[..len].to_vec();
        let socket = Arc::clone(&socket);
        let handler = handler.clone();

        tokio::spawn(async move {
            let ctx = RequestContext::new(peer, DnsProtocol::Udp);
            let mut writer =
                UdpResponseWriter::new(socket, peer).with_payload_limit(udp_payload_limit(&query));
            handler.handle_raw(&query, ctx, &mut writer).await;
        });
    }
}

async fn run_tcp_listener(listener: TcpListener, handler: DnsServerHandler, idle_timeout: Duration) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "TCP accept failed");
                continue;
            }
        };

        let handler = handler.clone();
        tokio::spawn(async move {
            serve_tcp_connection(stream, peer, handler, idle_timeout).await;
        });
    }
}

/// Answers length-prefixed queries on one connection until the peer closes
/// it or stays idle longer than `idle_timeout`.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: DnsServerHandler,
    idle_timeout: Duration,
) {
    let ctx = RequestContext::new(peer, DnsProtocol::Tcp);

    loop {
        let query = match tokio::time::timeout(idle_timeout, read_with_length_prefix(&mut stream)).await {
            Ok(Ok(query)) => query,
            Ok(Err(e)) => {
                debug!(client = %peer, error = %e, "TCP connection closed");
                return;
            }
            Err(_) => {
                debug!(client = %peer, "TCP connection idle, closing");
                return;
            }
        };

        let mut writer = TcpResponseWriter::new(&mut stream);
        handler.handle_raw(&query, ctx, &mut writer).await;
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
