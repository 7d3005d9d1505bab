/*!
    Writer configuration types.
*/

use videofile_transform::ScalingAlgorithm;
use videofile_types::{Error, Rational, Result, VideoCodec};

/**
    Raw codec selector as given by the caller.

    Any `i32` can be stored; it is checked against the codec table when the
    writer opens, so an out-of-range value fails there with an invalid
    argument error instead of at construction.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodecSelector(i32);

impl CodecSelector {
    pub const fn get(self) -> i32 {
        self.0
    }

    /**
        Resolve the selector against the codec table.
    */
    pub fn resolve(self) -> Result<VideoCodec> {
        VideoCodec::from_selector(self.0)
    }
}

impl Default for CodecSelector {
    fn default() -> Self {
        VideoCodec::Default.into()
    }
}

impl From<VideoCodec> for CodecSelector {
    fn from(codec: VideoCodec) -> Self {
        Self(codec.selector())
    }
}

impl From<i32> for CodecSelector {
    fn from(selector: i32) -> Self {
        Self(selector)
    }
}

/**
    Configuration for a [`VideoFileWriter`](crate::VideoFileWriter).

    The encoder always works in planar YUV 4:2:0, so both dimensions must be even.
*/
#[derive(Clone, Debug)]
pub struct WriterConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second. The stream time base is its inverse.
    pub frame_rate: Rational,
    /// Codec to encode with.
    pub codec: CodecSelector,
    /// Target bit rate in bits per second.
    pub bit_rate: u64,
    /// Distance between key frames.
    pub gop_size: u32,
    /// Interpolation used when converting submitted frames.
    pub scaling: ScalingAlgorithm,
}

impl WriterConfig {
    /// Frame rate used when none is given.
    pub const DEFAULT_FRAME_RATE: Rational = Rational::new(25, 1);
    /// Bit rate used when none is given.
    pub const DEFAULT_BIT_RATE: u64 = 400_000;
    /// Key frame interval used when none is given.
    pub const DEFAULT_GOP_SIZE: u32 = 12;

    /**
        Create a configuration for the given dimensions at 25 fps with the
        container's preferred codec.
    */
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame_rate: Self::DEFAULT_FRAME_RATE,
            codec: CodecSelector::default(),
            bit_rate: Self::DEFAULT_BIT_RATE,
            gop_size: Self::DEFAULT_GOP_SIZE,
            scaling: ScalingAlgorithm::default(),
        }
    }

    /**
        Set the frame rate. Integers are accepted as whole frames per second.

        Converting a `(num, 0)` tuple panics; see [`Rational`].
    */
    pub fn with_frame_rate(mut self, frame_rate: impl Into<Rational>) -> Self {
        self.frame_rate = frame_rate.into();
        self
    }

    /**
        Set the codec, either as a [`VideoCodec`] or as a raw selector.
    */
    pub fn with_codec(mut self, codec: impl Into<CodecSelector>) -> Self {
        self.codec = codec.into();
        self
    }

    pub fn with_bit_rate(mut self, bit_rate: u64) -> Self {
        self.bit_rate = bit_rate;
        self
    }

    pub fn with_gop_size(mut self, gop_size: u32) -> Self {
        self.gop_size = gop_size;
        self
    }

    pub fn with_scaling(mut self, scaling: ScalingAlgorithm) -> Self {
        self.scaling = scaling;
        self
    }

    /**
        Check every precondition of opening a writer and resolve the codec.
    */
    pub fn validate(&self) -> Result<VideoCodec> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_argument(format!(
                "video dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(Error::invalid_argument(format!(
                "video dimensions must be even, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.frame_rate.is_positive() {
            return Err(Error::invalid_argument(format!(
                "frame rate must be positive, got {}",
                self.frame_rate
            )));
        }

        if self.bit_rate == 0 {
            return Err(Error::invalid_argument("bit rate must be positive"));
        }

        self.codec.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WriterConfig::new(320, 240);
        assert_eq!(config.frame_rate, Rational::new(25, 1));
        assert_eq!(config.bit_rate, 400_000);
        assert_eq!(config.gop_size, 12);
        assert_eq!(config.codec.get(), -1);
        assert_eq!(config.validate().unwrap(), VideoCodec::Default);
    }

    #[test]
    fn builders() {
        let config = WriterConfig::new(64, 48)
            .with_frame_rate(30)
            .with_codec(VideoCodec::Raw)
            .with_gop_size(1);
        assert_eq!(config.frame_rate, Rational::new(30, 1));
        assert_eq!(config.validate().unwrap(), VideoCodec::Raw);

        let config = WriterConfig::new(64, 48).with_codec(0);
        assert_eq!(config.validate().unwrap(), VideoCodec::Mpeg4);
    }

    #[test]
    fn odd_dimensions_are_rejected() {
        for (w, h) in [(321, 240), (320, 241), (1, 1), (0, 240)] {
            let err = WriterConfig::new(w, h).validate().unwrap_err();
            assert!(err.is_invalid_argument(), "{w}x{h}");
        }
    }

    #[test]
    fn selectors_outside_the_table_are_rejected() {
        let len = videofile_types::CODEC_TABLE.len() as i32;
        for selector in [-2, len, 100] {
            let err = WriterConfig::new(64, 48).with_codec(selector).validate().unwrap_err();
            assert!(err.is_invalid_argument(), "selector {selector}");
        }
    }

    #[test]
    fn zero_frame_rate_is_rejected() {
        let config = WriterConfig::new(64, 48).with_frame_rate(Rational::new(0, 1));
        assert!(config.validate().unwrap_err().is_invalid_argument());
    }
}
