use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A feature has no usable outer ring
    #[error("feature {feature_index} has malformed geometry: {reason}")]
    MalformedGeometry {
        feature_index: usize,
        reason: &'static str,
    },

    #[error("polygon index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("at least two polygons must be selected, {selected} selected")]
    NotEnoughSelected { selected: usize },

    #[error("map is read-only")]
    ReadOnly,

    #[error("no file named {0:?} in the file list")]
    UnknownFile(String),

    #[error("failed to access {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
