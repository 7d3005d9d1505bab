use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use image::{Rgb, RgbImage};
use videofile_encode::{Frame, VideoCodec, VideoFileWriter, WriterConfig};

#[derive(Parser, Debug)]
pub struct SynthCommand {
    /// File to create; the extension picks the container
    pub output: PathBuf,

    #[arg(long, default_value_t = 320)]
    pub width: u32,

    #[arg(long, default_value_t = 240)]
    pub height: u32,

    #[arg(long, default_value_t = 25)]
    pub fps: i32,

    /// Number of frames to write
    #[arg(long, default_value_t = 100)]
    pub frames: u32,

    /// Codec name, or "default" to let the container choose
    #[arg(long, default_value_t = VideoCodec::Default)]
    pub codec: VideoCodec,
}

impl SynthCommand {
    pub fn run(self) -> Result<()> {
        let config = WriterConfig::new(self.width, self.height)
            .with_frame_rate(self.fps)
            .with_codec(self.codec);

        let mut writer = VideoFileWriter::create(&self.output, config)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;

        for index in 0..self.frames {
            let frame = Frame::from(gradient(self.width, self.height, index));
            writer
                .write_frame(&frame)
                .with_context(|| format!("Failed to write frame {index}"))?;
        }

        writer.close()?;
        println!("Wrote {} frame(s) to {}", self.frames, self.output.display());
        Ok(())
    }
}

/// Diagonal gradient scrolling one pixel per frame.
fn gradient(width: u32, height: u32, offset: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = ((x + offset) % width * 255 / width) as u8;
        let g = (y * 255 / height) as u8;
        let b = ((x + y + offset * 2) % 256) as u8;
        Rgb([r, g, b])
    })
}
