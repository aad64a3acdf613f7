use tokio_util::codec::LinesCodecError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Non-valid M3U file. First line: {line}")]
    InvalidHeader { line: String },

    #[error("Parser no longer accepts input")]
    Halted,

    #[error("Invalid byte range format: {0}")]
    InvalidByteRange(String),

    #[error("Failed to read playlist lines: {0}")]
    LineSource(String),
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidHeader { .. } => "INVALID_HEADER",
            Self::Halted => "HALTED",
            Self::InvalidByteRange(_) => "INVALID_BYTE_RANGE",
            Self::LineSource(_) => "LINE_SOURCE",
        }
    }

    /// Fatal errors stop the parse; no playlist is produced after one.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidHeader { .. } | Self::Halted)
    }

    /// The offending line of a format error.
    pub fn offending_line(&self) -> Option<&str> {
        match self {
            Self::InvalidHeader { line } => Some(line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::LineSource(e.to_string())
    }
}

impl From<LinesCodecError> for Error {
    fn from(e: LinesCodecError) -> Self {
        match e {
            LinesCodecError::MaxLineLengthExceeded => {
                Self::LineSource("line exceeds the configured maximum length".to_string())
            }
            LinesCodecError::Io(e) => e.into(),
        }
    }
}
