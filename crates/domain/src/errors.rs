use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No allowed prefixes configured")]
    NoAllowedPrefixes,

    #[error("plugin/{0}: no next plugin found")]
    NoNextHandler(&'static str),

    #[error("Invalid CIDR format: {0}")]
    InvalidCidr(String),

    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    #[error("Suffix can't be empty")]
    EmptySuffix,

    #[error("Invalid DNS message: {0}")]
    InvalidMessage(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Query timeout")]
    QueryTimeout,
}

impl DomainError {
    /// Errors raised while reading configuration rather than while serving.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::NoAllowedPrefixes | Self::InvalidCidr(_) | Self::InvalidTtl(_) | Self::EmptySuffix
        )
    }
}
