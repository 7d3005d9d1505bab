/*!
    Stream information types.
*/

use std::time::Duration;

use crate::{CodecId, PixelFormat, Rational};

/**
    Information about the video stream of an opened file.

    Populated when a reader opens a file and immutable afterwards.
*/
#[derive(Clone, Debug)]
pub struct VideoStreamInfo {
    /// Index of the stream inside the container.
    pub index: usize,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Native pixel format of decoded pictures (None if not representable).
    pub pixel_format: Option<PixelFormat>,
    /// Frame rate.
    pub frame_rate: Rational,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// Number of frames declared by the container (0 if unknown).
    pub frame_count: u64,
    /// Total duration (may be unavailable for some streams).
    pub duration: Option<Duration>,
    /// Codec used (None if not one of the known identifiers).
    pub codec_id: Option<CodecId>,
    /// Short name of the decoder, e.g. "mpeg4" or "h264".
    pub codec_name: String,
    /// Bitrate in bits per second (if known).
    pub bitrate: Option<u64>,
}

impl VideoStreamInfo {
    /**
        Returns the frame rate as fps.
    */
    pub fn fps(&self) -> f64 {
        self.frame_rate.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> VideoStreamInfo {
        VideoStreamInfo {
            index: 0,
            width: 1280,
            height: 720,
            pixel_format: Some(PixelFormat::Yuv420p),
            frame_rate: Rational::new(30, 1),
            time_base: Rational::new(1, 15360),
            frame_count: 90,
            duration: Some(Duration::from_secs(3)),
            codec_id: Some(CodecId::H264),
            codec_name: "h264".to_string(),
            bitrate: None,
        }
    }

    #[test]
    fn video_stream_info_fps() {
        assert_eq!(info().fps(), 30.0);
    }
}
