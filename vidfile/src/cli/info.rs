use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use videofile_decode::VideoFileReader;

#[derive(Parser, Debug)]
pub struct InfoCommand {
    /// Video file to inspect
    pub input: PathBuf,
}

impl InfoCommand {
    pub fn run(self) -> Result<()> {
        let mut reader = VideoFileReader::new();
        reader
            .open(&self.input)
            .with_context(|| format!("Failed to open {}", self.input.display()))?;

        let info = reader.stream_info()?;
        println!("File:        {}", self.input.display());
        println!("Stream:      #{}", info.index);
        println!("Codec:       {}", info.codec_name);
        println!("Size:        {}x{}", info.width, info.height);
        println!("Frame rate:  {} ({:.3} fps)", info.frame_rate, info.fps());
        println!("Frames:      {}", info.frame_count);
        match info.duration {
            Some(duration) => println!("Duration:    {:.3}s", duration.as_secs_f64()),
            None => println!("Duration:    unknown"),
        }
        if let Some(bitrate) = info.bitrate {
            println!("Bit rate:    {} kb/s", bitrate / 1000);
        }
        if let Some(format) = info.pixel_format {
            println!("Pixel fmt:   {format}");
        }

        reader.close();
        Ok(())
    }
}
