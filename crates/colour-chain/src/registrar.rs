//! Alias registration against a remote node.
//!
//! Registration binds a human-readable alias to a public key on the
//! alias channel. The node side does the mining; the client just posts
//! the pair and interprets a non-success status as rejection.

use colour_core::Ed25519PublicKey;
use tracing::debug;

use crate::error::{ChainError, Result};

/// Remote alias registration.
pub trait AliasRegistrar {
    /// Ask the node to bind `alias` to `public_key`.
    fn register(&self, alias: &str, public_key: &Ed25519PublicKey) -> Result<()>;
}

/// Registrar that posts to a node's HTTPS alias-register endpoint.
pub struct HttpRegistrar {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpRegistrar {
    /// Create a registrar for the given node host.
    pub fn new(host: &str) -> Self {
        Self {
            endpoint: format!("https://{host}/alias-register"),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// The endpoint this registrar posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AliasRegistrar for HttpRegistrar {
    fn register(&self, alias: &str, public_key: &Ed25519PublicKey) -> Result<()> {
        debug!(alias, endpoint = %self.endpoint, "registering alias");
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("alias", alias), ("publicKey", &public_key.to_base64())])
            .send()
            .map_err(|err| ChainError::Registration(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().unwrap_or_default();
            Err(ChainError::Registration(format!(
                "node rejected alias {alias}: {status} {body}"
            )))
        }
    }
}
