use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    endpoint::{Endpoints, Scheme},
    result::Result,
    Client,
};

/// Settings shared by a [`Board`] and the threads it hands out.
///
/// Every field has a default, so a partial document deserializes fine:
///
/// ```rust
/// # fn main() -> Result<(), serde_json::Error> {
/// let config: chanwatch::Config = serde_json::from_str(r#"{ "scheme": "https" }"#)?;
/// assert_eq!(config.endpoints.hosts.api, "a.4cdn.org");
/// # Ok(())
/// # }
/// ```
///
/// [`Board`]: crate::board::Board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and hosts used to build every URL.
    #[serde(flatten)]
    pub endpoints: Endpoints,

    /// Sent as `User-Agent` on every request.
    pub user_agent: String,

    /// Per-request timeout. `None` waits as long as the transport does.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoints: Endpoints::default(),
            user_agent: concat!("chanwatch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Default configuration using `https://` when `https` is true.
    pub fn https(https: bool) -> Self {
        Config {
            endpoints: Endpoints::new(Scheme::from_https(https)),
            ..Config::default()
        }
    }

    /// Returns the configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Builds the HTTP session described by this configuration.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be initialized.
    pub fn client(&self) -> Result<Client> {
        Client::with_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.endpoints.scheme, Scheme::Http);
        assert!(config.user_agent.starts_with("chanwatch/"));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn partial_document() {
        let config: Config = serde_json::from_str(
            r#"{ "scheme": "https", "hosts": { "api": "api.example.net" }, "timeout_secs": 5 }"#,
        )
        .unwrap();
        assert_eq!(config.endpoints.scheme, Scheme::Https);
        assert_eq!(config.endpoints.hosts.api, "api.example.net");
        assert_eq!(config.endpoints.hosts.images, "i.4cdn.org");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn https_flag() {
        assert_eq!(Config::https(true).endpoints.scheme, Scheme::Https);
        assert_eq!(Config::https(false).endpoints.scheme, Scheme::Http);
    }
}
