use std::future::Future;
use std::pin::Pin;

use trip_viz_transit::{DataFetcher, Result, TransitError};

/// Fetches documents over HTTP(S); non-2xx responses are fetch failures.
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl DataFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .get(location)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| TransitError::fetch(location, e))?;

            let bytes = response
                .bytes()
                .await
                .map_err(|e| TransitError::fetch(location, e))?;
            Ok(bytes.to_vec())
        })
    }
}
