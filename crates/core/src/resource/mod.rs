//! [`DataFetcher`] implementations for the places documents live.

mod file;
mod http;
mod memory;

use std::future::Future;
use std::pin::Pin;

pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;
use trip_viz_transit::{DataFetcher, Result};

/// Routes `http://` and `https://` locations to HTTP and everything else to
/// the filesystem.
#[derive(Debug, Default)]
pub struct AnyFetcher {
    file: FileFetcher,
    http: HttpFetcher,
}

impl AnyFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl DataFetcher for AnyFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        if is_url(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.org/stops.geojson"));
        assert!(is_url("http://localhost:8000/x"));
        assert!(!is_url("data/UTA/UTA_Stops.geojson"));
        assert!(!is_url("/srv/data/samples.json"));
    }
}
