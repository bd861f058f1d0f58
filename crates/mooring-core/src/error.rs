use thiserror::Error;

/// Startup failures while building the scene. These are fatal.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("instance pool `{name}` holds {capacity} links but its curve needs {required}")]
    PoolCapacity {
        name: String,
        capacity: usize,
        required: usize,
    },
}

/// Failures while fetching or decoding a model. The scene keeps rendering
/// without the model.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("fetch of `{path}` failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("failed to parse glTF `{path}`")]
    Parse {
        path: String,
        #[source]
        source: gltf::Error,
    },
    #[error("invalid data URI for buffer {index} of `{path}`")]
    DataUri {
        path: String,
        index: usize,
        #[source]
        source: base64::DecodeError,
    },
    #[error("buffer {index} of `{path}` is missing")]
    MissingBuffer { path: String, index: usize },
    #[error("`{path}` contains no scene")]
    NoScene { path: String },
}
