use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use trip_viz_transit::{DataFetcher, Result, TransitError};

/// Serves documents registered up front, keyed by location
#[derive(Clone, Debug, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(location, bytes);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.documents.insert(location.into(), bytes.into());
    }
}

impl DataFetcher for MemoryFetcher {
    fn fetch<'a>(
        &'a self,
        location: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        let result = self
            .documents
            .get(location)
            .cloned()
            .ok_or_else(|| TransitError::fetch(location, "not found"));
        Box::pin(async move { result })
    }
}
