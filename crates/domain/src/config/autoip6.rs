use crate::{AllowList, AutoIp6Settings, DomainError, DEFAULT_TTL};
use serde::{Deserialize, Serialize};

/// `[autoip6]` table of the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AutoIp6Config {
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// IPv6 networks in CIDR notation. Order is irrelevant.
    #[serde(default)]
    pub allowed: Vec<String>,

    /// Zone stripped from query names before decoding, without dots on
    /// either side (e.g. `v6.example.com`).
    #[serde(default)]
    pub suffix: Option<String>,
}

impl Default for AutoIp6Config {
    fn default() -> Self {
        Self {
            ttl: default_ttl(),
            allowed: Vec::new(),
            suffix: None,
        }
    }
}

impl AutoIp6Config {
    pub fn validate(&self) -> Result<(), DomainError> {
        if matches!(self.suffix.as_deref(), Some("")) {
            return Err(DomainError::EmptySuffix);
        }
        AllowList::parse(&self.allowed)?;
        Ok(())
    }

    pub fn to_settings(&self) -> Result<AutoIp6Settings, DomainError> {
        self.validate()?;
        Ok(AutoIp6Settings::new(
            self.ttl,
            self.suffix.clone().unwrap_or_default(),
            AllowList::parse(&self.allowed)?,
        ))
    }
}

impl TryFrom<&AutoIp6Config> for AutoIp6Settings {
    type Error = DomainError;

    fn try_from(config: &AutoIp6Config) -> Result<Self, Self::Error> {
        config.to_settings()
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}
