/*!
    Packed RGB frame exchanged with callers.
*/

use crate::{Error, PixelFormat, Result};

/**
    A picture in a packed RGB layout.

    Readers hand out owned copies of decoded pictures; writers take frames
    by reference and copy them into the encoder's native buffer, so a frame
    never aliases session state.

    Rows are `stride` bytes apart. `stride` is at least
    `width * bytes_per_pixel`; anything past that in a row is padding.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Raw pixel data, `stride * height` bytes (the last row may omit its padding).
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Distance in bytes between the starts of consecutive rows.
    pub stride: usize,
    /// Pixel layout of the data.
    pub format: PixelFormat,
}

impl Frame {
    /**
        Create a frame from raw parts.
    */
    pub fn new(data: Vec<u8>, width: u32, height: u32, stride: usize, format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            stride,
            format,
        }
    }

    /**
        Create a tightly packed frame (no row padding).

        Fails if `format` is not a packed RGB layout or if `data` has the wrong length.
    */
    pub fn packed(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let bpp = packed_bytes_per_pixel(format)?;
        let stride = width as usize * bpp;
        let frame = Self::new(data, width, height, stride, format);
        frame.validate()?;
        Ok(frame)
    }

    /**
        Create a tightly packed 24-bit RGB frame filled with one color.
    */
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb.repeat(width as usize * height as usize);
        Self::new(data, width, height, width as usize * 3, PixelFormat::Rgb24)
    }

    /**
        Bytes of pixel data in one row, excluding padding.
    */
    pub fn row_bytes(&self) -> usize {
        self.format.bytes_per_pixel().unwrap_or(0) * self.width as usize
    }

    /**
        Returns row `y` without its padding.

        # Panics

        Panics if `y` is out of range or the buffer is shorter than the
        geometry claims; call [`Frame::validate`] first for untrusted frames.
    */
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /**
        Returns the bytes of the pixel at (`x`, `y`).
    */
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let bpp = self.format.bytes_per_pixel().unwrap_or(0);
        let start = x as usize * bpp;
        &self.row(y)[start..start + bpp]
    }

    /**
        Check that the layout is packed RGB and the buffer covers every row.
    */
    pub fn validate(&self) -> Result<()> {
        let bpp = packed_bytes_per_pixel(self.format)?;

        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_argument("frame has zero dimensions"));
        }

        let row_bytes = (self.width as usize)
            .checked_mul(bpp)
            .ok_or_else(|| Error::invalid_argument("frame row size overflows"))?;
        if self.stride < row_bytes {
            return Err(Error::invalid_argument(format!(
                "stride {} is smaller than row size {}",
                self.stride, row_bytes
            )));
        }

        let required = self
            .stride
            .checked_mul(self.height as usize - 1)
            .and_then(|bytes| bytes.checked_add(row_bytes))
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "stride {} over {} rows overflows the address space",
                    self.stride, self.height
                ))
            })?;
        if self.data.len() < required {
            return Err(Error::invalid_argument(format!(
                "frame data is {} bytes, {}x{} {} needs {}",
                self.data.len(),
                self.width,
                self.height,
                self.format,
                required
            )));
        }

        Ok(())
    }
}

fn packed_bytes_per_pixel(format: PixelFormat) -> Result<usize> {
    format.bytes_per_pixel().ok_or_else(|| {
        Error::invalid_argument(format!(
            "frame must use a 24 or 32 bpp RGB layout, got {format}"
        ))
    })
}

// Frames are handed between threads by callers.
static_assertions::assert_impl_all!(Frame: Send, Sync);
