use serde::{Deserialize, Serialize};

/// Where pass-through queries go. Without a server every pass-through
/// fails with SERVFAIL.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub server: Option<String>,

    /// Milliseconds to wait for the upstream reply.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            server: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    2000
}
