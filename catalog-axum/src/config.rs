//! Configuration types for the Axum HTTP server.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use catalog_axum::config::AxumConfig;
///
/// // Use default configuration
/// let config = AxumConfig::default();
/// assert_eq!(config.bind_address.port(), 4000);
///
/// // Allow a browser frontend served from another origin
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:3000".parse().unwrap(),
///     allowed_origin: Some("http://localhost:5173".to_string()),
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// The single origin granted cross-origin access. When unset, browsers
    /// on other origins are refused.
    #[serde(default)]
    pub allowed_origin: Option<String>,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 4000))
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            allowed_origin: None,
        }
    }
}
