use std::path::PathBuf;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure a single invocation can end with. None of them are retried.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("{var} environment variable not set")]
    MissingCredential { var: String },

    #[error("Markdown file could not be read: {} ({source})", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No image_prompt found in {} metadata", path.display())]
    MissingField { path: PathBuf },

    #[error("Unexpected response format: {raw}")]
    UnexpectedResponse { raw: String },

    #[error("Image generation failed while {stage}: {source}")]
    GenerationFailed {
        stage: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ImageError {
    pub fn generation_failed(stage: &'static str, source: impl Into<BoxError>) -> Self {
        ImageError::GenerationFailed {
            stage,
            source: source.into(),
        }
    }
}

/// Non-success status returned by the image provider.
#[derive(Debug, Error)]
#[error("provider returned {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}
