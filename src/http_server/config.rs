//! Listener settings for the HTTP surface.

use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Where to listen, which origins may call, and how large an order
/// upload may be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Body cap for `/upload-orders/`. `None` accepts documents of any size.
    pub max_upload_bytes: Option<usize>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
            max_upload_bytes: None,
        }
    }
}

impl HttpServerConfig {
    /// `host:port` as given to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
