use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use videofile_decode::VideoFileReader;
use videofile_encode::{VideoCodec, VideoFileWriter, WriterConfig};

#[derive(Parser, Debug)]
pub struct TranscodeCommand {
    /// Video file to read
    pub input: PathBuf,

    /// File to create; the extension picks the container
    pub output: PathBuf,

    /// Codec name, or "default" to let the container choose
    #[arg(long, default_value_t = VideoCodec::Default)]
    pub codec: VideoCodec,

    /// Output frame rate (defaults to the input's)
    #[arg(long)]
    pub fps: Option<i32>,
}

impl TranscodeCommand {
    pub fn run(self) -> Result<()> {
        let mut reader = VideoFileReader::new();
        reader
            .open(&self.input)
            .with_context(|| format!("Failed to open {}", self.input.display()))?;

        let mut config = WriterConfig::new(reader.width()?, reader.height()?)
            .with_frame_rate(reader.frame_rate()?)
            .with_codec(self.codec);
        if let Some(fps) = self.fps {
            config = config.with_frame_rate(fps);
        }

        let mut writer = VideoFileWriter::create(&self.output, config)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;

        for (index, frame) in reader.frames().enumerate() {
            let frame = frame.with_context(|| format!("Failed to decode frame {index}"))?;
            writer
                .write_frame(&frame)
                .with_context(|| format!("Failed to encode frame {index}"))?;
        }

        let written = writer.frames_written()?;
        writer.close()?;
        tracing::info!(frames = written, output = %self.output.display(), "transcode finished");
        Ok(())
    }
}
