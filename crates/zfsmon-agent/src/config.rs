use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Address of the zfsmon aggregation server.
    pub server_endpoint: String,
    /// Hostname to report as. Defaults to the system hostname.
    pub hostname: Option<String>,
    #[serde(default = "default_update_interval")]
    pub update_interval_secs: u64,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_update_interval() -> u64 {
    60
}

fn default_http_timeout() -> u64 {
    30
}

impl AgentConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path}"))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Build the server base URL from `server_endpoint`.
    pub fn endpoint(&self) -> String {
        let addr = self.server_endpoint.trim().trim_end_matches('/');
        if addr.contains("://") {
            return addr.to_string();
        }
        format!("http://{addr}")
    }

    /// The hostname this agent reports as.
    pub fn reported_hostname(&self) -> String {
        self.hostname.clone().unwrap_or_else(|| {
            hostname::get()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "localhost".to_string())
        })
    }
}
