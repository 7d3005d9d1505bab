/*!
    Pixel layout types.
*/

use std::fmt;

/**
    Video pixel formats.

    Covers the packed RGB layouts exchanged with callers plus the native
    layouts most decoders produce. Not all FFmpeg pixel formats are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (native layout used for encoding)
    Yuv420p,
    /// Semi-planar YUV 4:2:0, 12bpp
    Nv12,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Packed BGRA, 32bpp
    Bgra,
}

impl PixelFormat {
    /**
        Returns the number of bits per pixel for this format.

        For planar formats, this is the average bits per pixel.
    */
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Yuv420p | Self::Nv12 => 12,
            Self::Yuv422p => 16,
            Self::Rgb24 | Self::Bgr24 | Self::Yuv444p => 24,
            Self::Bgra | Self::Rgba => 32,
        }
    }

    /**
        Returns true for the 24/32-bit packed RGB family accepted by callers.
    */
    pub const fn is_packed_rgb(self) -> bool {
        matches!(self, Self::Rgb24 | Self::Bgr24 | Self::Rgba | Self::Bgra)
    }

    /**
        Bytes per pixel for packed formats, `None` for planar ones.
    */
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        if self.is_packed_rgb() {
            Some(self.bits_per_pixel() as usize / 8)
        } else {
            None
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yuv420p => "yuv420p",
            Self::Nv12 => "nv12",
            Self::Yuv422p => "yuv422p",
            Self::Yuv444p => "yuv444p",
            Self::Rgb24 => "rgb24",
            Self::Bgr24 => "bgr24",
            Self::Rgba => "rgba",
            Self::Bgra => "bgra",
        };
        f.write_str(name)
    }
}
