// ⚙️ Configuration - environment driven
//
// REGISTRY_OWNER   owner address (generated when unset)
// REGISTRY_BIND    server listen address
// REGISTRY_ROSTER  optional CSV roster seeded at startup

use crate::guard::Address;
use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub owner: Address,
    pub bind: SocketAddr,
    pub roster: Option<PathBuf>,
}

impl RegistryConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let owner = match lookup("REGISTRY_OWNER") {
            Some(value) => {
                let value = value.trim().to_string();
                if !value.starts_with("0x") || value.len() < 3 {
                    bail!("REGISTRY_OWNER must be a 0x-prefixed address, got {:?}", value);
                }
                Address::new(value)
            }
            None => Address::generate(),
        };

        let bind_text = lookup("REGISTRY_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_text
            .parse()
            .with_context(|| format!("REGISTRY_BIND is not a socket address: {:?}", bind_text))?;

        let roster = lookup("REGISTRY_ROSTER")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(RegistryConfig { owner, bind, roster })
    }
}

/// Install the global tracing subscriber, honouring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
