/*!
    Shared types for reading and writing video files.

    This crate defines the types that cross the boundaries between the reader and
    writer crates. It has no dependency on FFmpeg, so callers can construct
    and inspect frames without pulling in the native bindings.

    # Core Types

    - [`Frame`] - Packed RGB picture exchanged with callers
    - [`Rational`] - Rational numbers for time bases and frame rates
    - [`PixelFormat`] - Pixel layouts
    - [`VideoStreamInfo`] - Stream metadata discovered when opening a file

    # Codec Selection

    - [`VideoCodec`] - Abstract codec selector
    - [`CodecId`] - Concrete codec identifiers
    - [`CODEC_TABLE`] - Ordered selector to identifier mapping

    # Error Handling

    - [`Error`] and [`Result`] - Error taxonomy shared by every crate

    # Features

    - `image`: conversions between [`Frame`] and `image::RgbImage` / `image::RgbaImage`
*/

mod codec;
mod error;
mod format;
mod frame;
mod rational;
mod stream;

#[cfg(feature = "image")]
mod image_interop;

pub use codec::{CODEC_TABLE, CodecId, CodecTableEntry, VideoCodec};
pub use error::{Error, Result};
pub use format::PixelFormat;
pub use frame::Frame;
pub use rational::Rational;
pub use stream::VideoStreamInfo;
