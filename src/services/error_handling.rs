use thiserror::Error;
use tracing::warn;

/// Errors raised while configuring the gallery or talking to the host page.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Threshold must be within [0, 1], got {value}")]
    InvalidThreshold { value: f64 },

    #[error("Invalid root margin '{margin}': {reason}")]
    InvalidRootMargin { margin: String, reason: String },

    #[error("URL template '{template}' has no {{index}} placeholder")]
    InvalidUrlTemplate { template: String },

    #[error("Gallery grid needs at least one column")]
    ZeroColumns,

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Intersection observation is not available on this host")]
    HostUnavailable,

    #[error("Host call failed: {operation} - {message}")]
    Host { operation: String, message: String },
}

impl GalleryError {
    pub fn host(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Host {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// Structured logging helpers
pub struct LogHelper;

impl LogHelper {
    /// Used when a missing host capability is handled by a fallback.
    pub fn log_degraded(context: &str, error: &GalleryError) {
        warn!(
            context = %context,
            error = %error,
            "Falling back"
        );
    }
}
