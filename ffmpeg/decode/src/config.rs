/*!
    Reader configuration.
*/

use videofile_transform::ScalingAlgorithm;
use videofile_types::{Error, PixelFormat, Result};

/**
    Configuration for a [`VideoFileReader`](crate::VideoFileReader).
*/
#[derive(Clone, Debug)]
pub struct ReaderConfig {
    /// Layout of the frames handed to callers. Must be a packed RGB layout.
    pub pixel_format: PixelFormat,
    /// Interpolation used when converting from the decoder's layout.
    pub scaling: ScalingAlgorithm,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            pixel_format: PixelFormat::Rgb24,
            scaling: ScalingAlgorithm::default(),
        }
    }
}

impl ReaderConfig {
    /**
        Create a configuration producing 24-bit RGB frames.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Set the output pixel layout.
    */
    pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
        self.pixel_format = pixel_format;
        self
    }

    /**
        Set the scaling algorithm.
    */
    pub fn with_scaling(mut self, scaling: ScalingAlgorithm) -> Self {
        self.scaling = scaling;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.pixel_format.is_packed_rgb() {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "reader output must be a packed RGB layout, got {}",
                self.pixel_format
            )))
        }
    }
}
