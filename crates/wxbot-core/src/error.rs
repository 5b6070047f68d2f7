use thiserror::Error;

#[derive(Debug, Error)]
pub enum WxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid coordinates: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WxError {
    /// Short error code string used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            WxError::Config(_) => "CONFIG_ERROR",
            WxError::InvalidCoordinates { .. } => "INVALID_COORDINATES",
            WxError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, WxError>;
