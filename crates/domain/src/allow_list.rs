use crate::DomainError;
use ipnetwork::Ipv6Network;
use std::net::Ipv6Addr;

/// IPv6 networks whose addresses may be answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    networks: Vec<Ipv6Network>,
}

impl AllowList {
    /// Parses CIDR literals such as `2001:db8::/32`.
    ///
    /// The prefix length is mandatory and host bits are masked off, so
    /// `2001:db8::1/32` is stored as `2001:db8::/32`.
    pub fn parse<S: AsRef<str>>(literals: &[S]) -> Result<Self, DomainError> {
        let mut list = Self::default();
        for literal in literals {
            list.push(parse_network(literal.as_ref())?);
        }
        Ok(list)
    }

    pub fn push(&mut self, network: Ipv6Network) {
        self.networks.push(network);
    }

    pub fn contains(&self, ip: &Ipv6Addr) -> bool {
        self.networks.iter().any(|network| network.contains(*ip))
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn networks(&self) -> &[Ipv6Network] {
        &self.networks
    }
}

fn validate_cidr(cidr: &str) -> Result<(), String> {
    if cidr.is_empty() {
        return Err("CIDR cannot be empty".to_string());
    }

    if !cidr.contains('/') {
        return Err("CIDR must include prefix (e.g., 2001:db8::/32)".to_string());
    }

    Ok(())
}

pub(crate) fn parse_network(literal: &str) -> Result<Ipv6Network, DomainError> {
    validate_cidr(literal).map_err(|e| DomainError::InvalidCidr(format!("{}: {}", literal, e)))?;

    let network: Ipv6Network = literal
        .parse()
        .map_err(|e| DomainError::InvalidCidr(format!("{}: {}", literal, e)))?;

    Ipv6Network::new(network.network(), network.prefix())
        .map_err(|e| DomainError::InvalidCidr(format!("{}: {}", literal, e)))
}
