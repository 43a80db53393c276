//! Corefile-style configuration block:
//!
//! ```text
//! autoip6 {
//!     ttl 300
//!     allowed 2001:db8::/32 2002::/16
//!     suffix v6.example.com
//! }
//! ```
//!
//! Directives take their arguments from the rest of their line. `allowed`
//! may repeat and accumulates; unknown tokens are skipped.

use super::AutoIp6Config;
use crate::allow_list::parse_network;
use crate::DomainError;

impl AutoIp6Config {
    pub fn from_directives(block: &str) -> Result<Self, DomainError> {
        let mut config = Self::default();

        for line in block.lines() {
            let line = line.split('#').next().unwrap_or_default();
            let mut tokens = line
                .split_whitespace()
                .filter(|token| *token != "{" && *token != "}");

            while let Some(token) = tokens.next() {
                match token {
                    "ttl" => {
                        let value = tokens
                            .next()
                            .ok_or_else(|| DomainError::InvalidTtl("missing value".to_string()))?;
                        config.ttl = value
                            .parse()
                            .map_err(|e| DomainError::InvalidTtl(format!("{}: {}", value, e)))?;
                        tokens.by_ref().for_each(drop);
                    }
                    "allowed" => {
                        for literal in tokens.by_ref() {
                            parse_network(literal)?;
                            config.allowed.push(literal.to_string());
                        }
                    }
                    "suffix" => {
                        let value = tokens.next().ok_or(DomainError::EmptySuffix)?;
                        config.suffix = Some(value.to_string());
                    }
                    _ => continue,
                }
            }
        }

        Ok(config)
    }
}
