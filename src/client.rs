use crate::{
    config::Config,
    result::Result,
    transport::{Response, Transport},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, IF_MODIFIED_SINCE, LAST_MODIFIED, USER_AGENT},
    Client as ReqwestClient, StatusCode,
};

/// The HTTP session shared by a board and its threads.
///
/// Holds one connection pool that is reused for every request and sends the
/// configured `User-Agent` each time.
#[derive(Debug, Clone)]
pub struct Client {
    http: ReqwestClient,
}

impl Client {
    /// Builds a session with the default [`Config`].
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be initialized.
    pub fn new() -> Result<Client> {
        Client::with_config(&Config::default())
    }

    /// Builds a session from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be initialized.
    pub fn with_config(config: &Config) -> Result<Client> {
        let mut headers = HeaderMap::new();
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        } else {
            log::warn!("ignoring invalid user agent {:?}", config.user_agent);
        }

        let mut builder = ReqwestClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Client {
            http: builder.build()?,
        })
    }
}

#[async_trait(?Send)]
impl Transport for Client {
    async fn get(&self, url: &str, if_modified_since: Option<&str>) -> Result<Response> {
        let response = {
            let mut builder = self.http.get(url);
            if let Some(time) = if_modified_since {
                builder = builder.header(IF_MODIFIED_SINCE, time);
            }
            log::info!("request for {} dispatched", url);
            builder.send().await?
        };
        let status = response.status();
        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|x| x.to_str().ok())
            .map(ToString::to_string);

        log::info!("response status: {}", status);

        let body = response.bytes().await?.to_vec();
        Ok(Response::new(status, last_modified, body))
    }

    async fn head(&self, url: &str) -> Result<StatusCode> {
        log::info!("HEAD request for {} dispatched", url);
        let status = self.http.head(url).send().await?.status();
        log::info!("response status: {}", status);
        Ok(status)
    }
}
