use std::fmt;

/// Universal error type for scene export operations.
///
/// This error type covers all possible errors that can occur during
/// texture preloading, tree translation, and document serialization.
#[derive(Debug, Clone)]
pub enum ExportError {
    /// A sprite referenced a texture that is not in the cache.
    ///
    /// This is a precondition violation: the preloader contract guarantees
    /// that every referenced texture is resolved before translation begins.
    TextureMissing { key: String },

    /// Fetching the raw bytes of an asset failed
    AssetFetch { key: String, reason: String },

    /// Decoding or resizing a fetched asset failed
    AssetDecode { key: String, reason: String },

    /// A drawing operation failed on the target surface
    Rendering(String),

    /// Finalizing a recording into a document failed
    Finalize(String),

    /// Generic error with message
    Generic(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::TextureMissing { key } => {
                write!(f, "Texture '{}' missing from cache at draw time", key)
            }
            ExportError::AssetFetch { key, reason } => {
                write!(f, "Failed to fetch asset '{}': {}", key, reason)
            }
            ExportError::AssetDecode { key, reason } => {
                write!(f, "Failed to decode asset '{}': {}", key, reason)
            }
            ExportError::Rendering(msg) => {
                write!(f, "Rendering error: {}", msg)
            }
            ExportError::Finalize(msg) => {
                write!(f, "Finalization error: {}", msg)
            }
            ExportError::Generic(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for ExportError {}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;
