use crate::{decode_address, strip_suffix, AllowList, DomainError};
use std::net::Ipv6Addr;

pub const DEFAULT_TTL: u32 = 900;

/// What to do with an AAAA question once its name has been inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not an encoded address; the next handler decides.
    PassThrough,
    /// Encoded address outside every allowed prefix.
    Refused,
    Answer { address: Ipv6Addr, ttl: u32 },
}

/// Immutable runtime settings of the address filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoIp6Settings {
    pub ttl: u32,
    pub suffix: String,
    pub allowed: AllowList,
}

impl Default for AutoIp6Settings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            suffix: String::new(),
            allowed: AllowList::default(),
        }
    }
}

impl AutoIp6Settings {
    pub fn new(ttl: u32, suffix: impl Into<String>, allowed: AllowList) -> Self {
        Self {
            ttl,
            suffix: suffix.into(),
            allowed,
        }
    }

    /// Decides the outcome for an AAAA question named `qname`.
    ///
    /// The allow-list is checked before any address is returned; an empty
    /// allow-list fails every call.
    pub fn resolve(&self, qname: &str) -> Result<DispatchOutcome, DomainError> {
        if self.allowed.is_empty() {
            return Err(DomainError::NoAllowedPrefixes);
        }

        let Some(address) = decode_address(strip_suffix(qname, &self.suffix)) else {
            return Ok(DispatchOutcome::PassThrough);
        };

        if !self.allowed.contains(&address) {
            return Ok(DispatchOutcome::Refused);
        }

        Ok(DispatchOutcome::Answer {
            address,
            ttl: self.ttl,
        })
    }
}
