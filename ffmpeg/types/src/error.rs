/*!
    Error types shared by the video file crates.
*/

use std::io;

use thiserror::Error;

/**
    Error type shared by the video file crates.

    Every failure falls into exactly one of five categories:

    - `InvalidArgument` - caller-supplied parameters violate a precondition
    - `Io` - storage cannot be opened/read/written, or the file is not open
    - `Stream` - container or codec negotiation failed
    - `Decode` - the decoder rejected otherwise well-formed input
    - `Encode` - the encoder or the container write rejected a frame
*/
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied parameters violate a precondition.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
    /// I/O error (file not found, write failure, file not open).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Container or codec negotiation failure.
    #[error("stream error: {message}")]
    Stream { message: String },
    /// Decoder failure.
    #[error("decode error: {message}")]
    Decode { message: String },
    /// Encoder or container write failure.
    #[error("encode error: {message}")]
    Encode { message: String },
}

impl Error {
    /**
        Create an invalid argument error with the given message.
    */
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /**
        Create a stream error with the given message.
    */
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /**
        Create a decode error with the given message.
    */
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /**
        Create an encode error with the given message.
    */
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /**
        Create an I/O error of the given kind.
    */
    pub fn io(kind: io::ErrorKind, message: impl Into<String>) -> Self {
        Self::Io(io::Error::new(kind, message.into()))
    }

    /**
        The error returned by any operation that needs an open file.
    */
    pub fn not_open() -> Self {
        Self::io(io::ErrorKind::NotConnected, "video file is not open")
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub fn is_encode(&self) -> bool {
        matches!(self, Self::Encode { .. })
    }

    /**
        Returns true if this error reports an operation on a file that is not open.
    */
    pub fn is_not_open(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotConnected)
    }
}

/**
    Result type alias for the video file crates.
*/
pub type Result<T> = std::result::Result<T, Error>;
