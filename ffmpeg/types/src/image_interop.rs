/*!
    Conversions between [`Frame`] and the `image` crate buffers.
*/

use image::{RgbImage, RgbaImage};

use crate::{Error, Frame, PixelFormat, Result};

impl From<RgbImage> for Frame {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Frame::new(
            image.into_raw(),
            width,
            height,
            width as usize * 3,
            PixelFormat::Rgb24,
        )
    }
}

impl From<RgbaImage> for Frame {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Frame::new(
            image.into_raw(),
            width,
            height,
            width as usize * 4,
            PixelFormat::Rgba,
        )
    }
}

impl TryFrom<&Frame> for RgbImage {
    type Error = Error;

    /**
        Copy a frame into an `RgbImage`, reordering channels and dropping alpha as needed.
    */
    fn try_from(frame: &Frame) -> Result<Self> {
        frame.validate()?;

        let mut data = Vec::with_capacity(frame.width as usize * frame.height as usize * 3);
        for y in 0..frame.height {
            let row = frame.row(y);
            match frame.format {
                PixelFormat::Rgb24 => data.extend_from_slice(row),
                PixelFormat::Bgr24 => {
                    for px in row.chunks_exact(3) {
                        data.extend_from_slice(&[px[2], px[1], px[0]]);
                    }
                }
                PixelFormat::Rgba => {
                    for px in row.chunks_exact(4) {
                        data.extend_from_slice(&px[..3]);
                    }
                }
                PixelFormat::Bgra => {
                    for px in row.chunks_exact(4) {
                        data.extend_from_slice(&[px[2], px[1], px[0]]);
                    }
                }
                other => {
                    return Err(Error::invalid_argument(format!(
                        "cannot build an RGB image from {other}"
                    )));
                }
            }
        }

        RgbImage::from_raw(frame.width, frame.height, data)
            .ok_or_else(|| Error::invalid_argument("frame buffer does not match its dimensions"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_image_into_frame() {
        let image = RgbImage::from_pixel(4, 2, image::Rgb([1, 2, 3]));
        let frame = Frame::from(image);
        assert_eq!(frame.format, PixelFormat::Rgb24);
        assert_eq!(frame.stride, 12);
        assert_eq!(frame.pixel(3, 1), &[1, 2, 3]);
    }

    #[test]
    fn bgra_frame_into_rgb_image() {
        let data = [30u8, 20, 10, 255].repeat(6);
        let frame = Frame::packed(data, 3, 2, PixelFormat::Bgra).unwrap();
        let image = RgbImage::try_from(&frame).unwrap();
        assert_eq!(image.get_pixel(2, 1).0, [10, 20, 30]);
    }
}
