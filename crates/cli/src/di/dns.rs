use autoip6_application::ports::DnsHandler;
use autoip6_application::use_cases::ServeAutoIp6UseCase;
use autoip6_domain::{AutoIp6Settings, Config};
use autoip6_infrastructure::dns::{DnsServerHandler, UpstreamForwarder};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct DnsServices {
    pub server_handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let settings = AutoIp6Settings::try_from(&config.autoip6)?;

        if settings.allowed.is_empty() {
            warn!("No allowed prefixes configured; AAAA queries will be answered with SERVFAIL");
        }

        info!(
            ttl = settings.ttl,
            suffix = %settings.suffix,
            allowed = settings.allowed.len(),
            "Address filter configured"
        );
        for network in settings.allowed.networks() {
            debug!(prefix = %network, "Allowed prefix");
        }

        let next = Self::build_next_handler(config)?;
        let autoip6: Arc<dyn DnsHandler> = Arc::new(ServeAutoIp6UseCase::new(settings, next));
        let server_handler = DnsServerHandler::new(autoip6);

        Ok(Self { server_handler })
    }

    fn build_next_handler(config: &Config) -> anyhow::Result<Option<Arc<dyn DnsHandler>>> {
        let Some(server) = &config.upstream.server else {
            warn!("No upstream server configured; pass-through queries will fail");
            return Ok(None);
        };

        let addr: SocketAddr = server.parse()?;
        let timeout = Duration::from_millis(config.upstream.timeout_ms);
        info!(upstream = %addr, timeout_ms = config.upstream.timeout_ms, "Forwarding pass-through queries");

        let forwarder: Arc<dyn DnsHandler> = Arc::new(UpstreamForwarder::new(addr, timeout));
        Ok(Some(forwarder))
    }
}
