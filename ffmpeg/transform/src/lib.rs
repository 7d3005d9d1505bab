/*!
    Pixel conversion and FFmpeg type mapping for the videofile crates.

    # Core Types

    - [`PixelConverter`] - Converts pictures between packed RGB and codec-native layouts
    - [`FrameLayout`] - Pixel format and dimensions of one side of a conversion
    - [`ScalingAlgorithm`] - Interpolation used by the conversion context

    The [`convert`] module maps between FFmpeg's types and `videofile-types`.
*/

pub mod convert;
mod video;

pub use video::{FrameLayout, PixelConverter, ScalingAlgorithm};
