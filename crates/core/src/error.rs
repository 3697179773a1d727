use trip_viz_transit::TransitError;

use crate::config::Dataset;
use crate::ui::UiHook;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Failed to load {dataset}: {source}")]
    DataLoad {
        dataset: Dataset,
        #[source]
        source: TransitError,
    },

    #[error("Missing UI element: {0}")]
    MissingUiElement(UiHook),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    #[error("Unknown basemap: {0}")]
    UnknownBasemap(String),

    #[error("Unknown sample: {0}")]
    UnknownSample(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
