use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use image::RgbImage;
use videofile_decode::VideoFileReader;

#[derive(Parser, Debug)]
pub struct ExtractCommand {
    /// Video file to read
    pub input: PathBuf,

    /// Directory the PNG files are written to
    pub out_dir: PathBuf,

    /// Keep every Nth frame
    #[arg(long, default_value_t = 1)]
    pub every: usize,

    /// Stop after saving this many frames
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ExtractCommand {
    pub fn run(self) -> Result<()> {
        if self.every == 0 {
            bail!("--every must be at least 1");
        }

        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create {}", self.out_dir.display()))?;

        let mut reader = VideoFileReader::new();
        reader
            .open(&self.input)
            .with_context(|| format!("Failed to open {}", self.input.display()))?;

        let limit = self.limit.unwrap_or(usize::MAX);
        let mut saved = 0;

        for (index, frame) in reader.frames().enumerate() {
            if saved >= limit {
                break;
            }
            let frame = frame.with_context(|| format!("Failed to decode frame {index}"))?;
            if index % self.every != 0 {
                continue;
            }

            let path = self.out_dir.join(format!("frame_{index:06}.png"));
            RgbImage::try_from(&frame)?
                .save(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
            saved += 1;
        }

        println!("Saved {saved} frame(s) to {}", self.out_dir.display());
        Ok(())
    }
}
