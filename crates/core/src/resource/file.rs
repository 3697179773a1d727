use std::future::Future;
use std::pin::Pin;

use trip_viz_transit::{DataFetcher, Result, TransitError};

/// Reads documents from the local filesystem
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

impl DataFetcher for FileFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            tokio::fs::read(location)
                .await
                .map_err(|e| TransitError::fetch(location, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("trip-viz-fetch-{}.json", std::process::id()));
        tokio::fs::write(&path, b"{}").await.unwrap();

        let location = path.to_string_lossy().into_owned();
        let bytes = FileFetcher.fetch(&location).await.unwrap();
        assert_eq!(bytes, b"{}");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = FileFetcher
            .fetch("/nonexistent/trip-viz/stops.geojson")
            .await
            .unwrap_err();
        assert!(matches!(err, TransitError::Fetch { .. }));
    }
}
