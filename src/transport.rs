use std::time::Duration;

use reqwest::blocking::Client;
use tracing::info;

use crate::error::{OmniError, Result};
use crate::settings::Settings;

/// Something that turns a URL into the body of the page behind it.
pub trait Transport {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout_secs.map(Duration::from_secs))
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String> {
        info!("Downloading database: {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(OmniError::Transport(format!("HTTP {} for {}", status, url)));
        }
        Ok(response.text()?)
    }
}
