/*!
    Pixel conversion between packed RGB frames and codec-native pictures.
*/

use ffmpeg_next::{
    format::Pixel,
    software::scaling::{context::Context as ScalerContext, flag::Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use videofile_types::{Error, Frame, PixelFormat, Result};

use crate::convert::{pixel_format_from_ffmpeg, pixel_format_to_ffmpeg};

/**
    Scaling algorithm used by the conversion context.

    Dimensions never change during conversion, so this mostly affects
    chroma upsampling quality.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScalingAlgorithm {
    /// Nearest neighbor - fastest, lowest quality.
    Nearest,
    /// Bilinear interpolation - fast, acceptable quality.
    Bilinear,
    /// Bicubic interpolation - moderate speed, good quality.
    #[default]
    Bicubic,
    /// Lanczos resampling - slowest, highest quality.
    Lanczos,
}

impl ScalingAlgorithm {
    fn to_ffmpeg_flags(self) -> ScalerFlags {
        match self {
            Self::Nearest => ScalerFlags::POINT,
            Self::Bilinear => ScalerFlags::BILINEAR,
            Self::Bicubic => ScalerFlags::BICUBIC,
            Self::Lanczos => ScalerFlags::LANCZOS,
        }
    }
}

/**
    Pixel format and dimensions of one side of a conversion.

    Stores FFmpeg's pixel format directly so that decoder-native layouts
    without a [`PixelFormat`] counterpart (`yuvj420p` from MJPEG, for
    instance) can still be converted from.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    pub pixel: Pixel,
    pub width: u32,
    pub height: u32,
}

impl FrameLayout {
    /**
        Layout for one of our pixel formats.
    */
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Result<Self> {
        Ok(Self::native(pixel_format_to_ffmpeg(format)?, width, height))
    }

    /**
        Layout for an FFmpeg pixel format.
    */
    pub const fn native(pixel: Pixel, width: u32, height: u32) -> Self {
        Self {
            pixel,
            width,
            height,
        }
    }

    /**
        Layout of an existing FFmpeg picture.
    */
    pub fn of(frame: &VideoFrameFFmpeg) -> Self {
        Self::native(frame.format(), frame.width(), frame.height())
    }

    /**
        Layout of a packed frame.
    */
    pub fn of_frame(frame: &Frame) -> Result<Self> {
        Self::new(frame.format, frame.width, frame.height)
    }

    /**
        Our pixel format for this layout, if it is a packed RGB one.
    */
    pub fn packed_format(&self) -> Option<PixelFormat> {
        pixel_format_from_ffmpeg(self.pixel).filter(|f| f.is_packed_rgb())
    }

    fn allocate(&self) -> VideoFrameFFmpeg {
        VideoFrameFFmpeg::new(self.pixel, self.width, self.height)
    }
}

/**
    Converts pictures from a source layout to a target layout.

    The conversion context is created up front so that a layout FFmpeg
    cannot convert is reported when a session opens. It is rebuilt
    transparently whenever a picture arrives in a different source layout.

    A staging picture on the packed side is kept between calls, so
    converting a stream of frames does not allocate FFmpeg buffers per frame.
*/
pub struct PixelConverter {
    context: ScalerContext,
    source: FrameLayout,
    target: FrameLayout,
    algorithm: ScalingAlgorithm,
    staging: Option<VideoFrameFFmpeg>,
}

impl PixelConverter {
    /**
        Create a converter between two layouts.
    */
    pub fn new(source: FrameLayout, target: FrameLayout, algorithm: ScalingAlgorithm) -> Result<Self> {
        let context = create_context(source, target, algorithm)?;

        tracing::debug!(
            from = ?source.pixel,
            to = ?target.pixel,
            width = source.width,
            height = source.height,
            "created conversion context"
        );

        Ok(Self {
            context,
            source,
            target,
            algorithm,
            staging: None,
        })
    }

    pub fn source(&self) -> FrameLayout {
        self.source
    }

    /**
        Rebuild the conversion context if `source` differs from the current one.
    */
    pub fn ensure_source(&mut self, source: FrameLayout) -> Result<()> {
        if source == self.source {
            return Ok(());
        }

        tracing::debug!(
            old = ?self.source,
            new = ?source,
            "source layout changed, rebuilding conversion context"
        );

        self.context = create_context(source, self.target, self.algorithm)?;
        self.source = source;
        Ok(())
    }

    /**
        Convert an FFmpeg picture into an owned packed frame.

        The target layout must be packed RGB.
    */
    pub fn to_packed(&mut self, input: &VideoFrameFFmpeg) -> Result<Frame> {
        let format = self.target.packed_format().ok_or_else(|| {
            Error::invalid_argument(format!(
                "conversion target {:?} is not a packed RGB layout",
                self.target.pixel
            ))
        })?;

        self.ensure_source(FrameLayout::of(input))?;

        let staging = staging_for(&mut self.staging, self.target);
        self.context
            .run(input, staging)
            .map_err(|e| Error::stream(format!("pixel conversion failed: {e}")))?;

        Ok(copy_from_picture(staging, format))
    }

    /**
        Convert a packed frame into an FFmpeg picture of the target layout.

        The frame must be valid; the source layout follows the frame.
    */
    pub fn from_packed(&mut self, input: &Frame, output: &mut VideoFrameFFmpeg) -> Result<()> {
        input.validate()?;
        let layout = FrameLayout::of_frame(input)?;

        self.ensure_source(layout)?;

        let staging = staging_for(&mut self.staging, layout);
        copy_into_picture(staging, input);

        self.context
            .run(staging, output)
            .map_err(|e| Error::stream(format!("pixel conversion failed: {e}")))
    }
}

fn staging_for(slot: &mut Option<VideoFrameFFmpeg>, layout: FrameLayout) -> &mut VideoFrameFFmpeg {
    if slot.as_ref().is_some_and(|f| FrameLayout::of(f) != layout) {
        *slot = None;
    }
    slot.get_or_insert_with(|| layout.allocate())
}

fn create_context(
    source: FrameLayout,
    target: FrameLayout,
    algorithm: ScalingAlgorithm,
) -> Result<ScalerContext> {
    ScalerContext::get(
        source.pixel,
        source.width,
        source.height,
        target.pixel,
        target.width,
        target.height,
        algorithm.to_ffmpeg_flags(),
    )
    .map_err(|e| Error::stream(format!("cannot initialize frames conversion context: {e}")))
}

/**
    Copy the rows of a packed frame into a single-plane picture, honoring both strides.
*/
fn copy_into_picture(dst: &mut VideoFrameFFmpeg, src: &Frame) {
    let row_bytes = src.row_bytes();
    let dst_stride = dst.stride(0);
    let dst_data = dst.data_mut(0);

    for y in 0..src.height {
        let dst_start = y as usize * dst_stride;
        dst_data[dst_start..dst_start + row_bytes].copy_from_slice(src.row(y));
    }
}

/**
    Copy a single-plane picture into a tightly packed frame.
*/
fn copy_from_picture(src: &VideoFrameFFmpeg, format: PixelFormat) -> Frame {
    let width = src.width();
    let height = src.height();
    let row_bytes = width as usize * format.bytes_per_pixel().unwrap_or(0);
    let stride = src.stride(0);
    let data = src.data(0);

    let mut output = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let row_start = y * stride;
        output.extend_from_slice(&data[row_start..row_start + row_bytes]);
    }

    Frame::new(output, width, height, row_bytes, format)
}

impl std::fmt::Debug for PixelConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelConverter")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u32 = 32;
    const H: u32 = 16;

    fn yuv_converter(from: PixelFormat) -> PixelConverter {
        ffmpeg_next::init().unwrap();
        PixelConverter::new(
            FrameLayout::new(from, W, H).unwrap(),
            FrameLayout::new(PixelFormat::Yuv420p, W, H).unwrap(),
            ScalingAlgorithm::default(),
        )
        .unwrap()
    }

    fn rgb_converter() -> PixelConverter {
        PixelConverter::new(
            FrameLayout::new(PixelFormat::Yuv420p, W, H).unwrap(),
            FrameLayout::new(PixelFormat::Rgb24, W, H).unwrap(),
            ScalingAlgorithm::default(),
        )
        .unwrap()
    }

    fn assert_close(actual: &[u8], expected: &[u8], tolerance: u8) {
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff(*e) <= tolerance, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn solid_color_survives_yuv() {
        let color = [200, 100, 50];
        let mut to_yuv = yuv_converter(PixelFormat::Rgb24);
        let mut to_rgb = rgb_converter();

        let mut yuv = VideoFrameFFmpeg::empty();
        to_yuv.from_packed(&Frame::solid(W, H, color), &mut yuv).unwrap();
        assert_eq!(yuv.format(), Pixel::YUV420P);

        let back = to_rgb.to_packed(&yuv).unwrap();
        assert_eq!((back.width, back.height), (W, H));
        assert_eq!(back.stride, W as usize * 3);
        assert_close(back.pixel(W / 2, H / 2), &color, 6);
    }

    #[test]
    fn source_layout_change_rebuilds_context() {
        let mut to_yuv = yuv_converter(PixelFormat::Rgb24);
        let mut to_rgb = rgb_converter();

        // Same color as RGB, then as padded BGRA.
        let mut bgra = Vec::new();
        for _ in 0..H {
            for _ in 0..W {
                bgra.extend_from_slice(&[50, 100, 200, 255]);
            }
            bgra.extend_from_slice(&[0; 8]);
        }
        let frame = Frame::new(bgra, W, H, W as usize * 4 + 8, PixelFormat::Bgra);

        let mut yuv = VideoFrameFFmpeg::empty();
        to_yuv.from_packed(&Frame::solid(W, H, [200, 100, 50]), &mut yuv).unwrap();
        to_yuv.from_packed(&frame, &mut yuv).unwrap();
        assert_eq!(to_yuv.source().pixel, Pixel::BGRA);

        let back = to_rgb.to_packed(&yuv).unwrap();
        assert_close(back.pixel(1, 1), &[200, 100, 50], 6);
    }

    #[test]
    fn planar_target_cannot_be_packed() {
        let mut converter = yuv_converter(PixelFormat::Rgb24);
        let picture = VideoFrameFFmpeg::new(Pixel::RGB24, W, H);
        let err = converter.to_packed(&picture).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn invalid_frame_is_rejected() {
        let mut converter = yuv_converter(PixelFormat::Rgb24);
        let frame = Frame::new(vec![0; 10], W, H, W as usize * 3, PixelFormat::Rgb24);
        let mut out = VideoFrameFFmpeg::empty();
        assert!(converter.from_packed(&frame, &mut out).unwrap_err().is_invalid_argument());
    }
}
