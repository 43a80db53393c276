use autoip6_domain::CliOverrides;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "autoip6")]
#[command(version)]
#[command(about = "Authoritative AAAA answers for names that encode an allowed IPv6 address")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Corefile-style block with ttl/allowed/suffix directives; replaces the
    /// [autoip6] table of the configuration file
    #[arg(long, value_name = "FILE")]
    directives: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream server for pass-through queries (e.g. 9.9.9.9:53)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        upstream: cli.upstream.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(
        cli.config.as_deref(),
        cli.directives.as_deref(),
        cli_overrides,
    )?;

    bootstrap::init_logging(&config);

    info!("Starting autoip6 v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let tcp_timeout = Duration::from_secs(config.server.tcp_timeout);

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_services.server_handler, tcp_timeout) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
