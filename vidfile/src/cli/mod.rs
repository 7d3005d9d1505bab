use anyhow::Result;
use clap::{Parser, Subcommand};

mod extract;
mod info;
mod synth;
mod transcode;

pub use extract::ExtractCommand;
pub use info::InfoCommand;
pub use synth::SynthCommand;
pub use transcode::TranscodeCommand;

#[derive(Parser, Debug)]
#[command(name = "vidfile")]
#[command(about = "Read, write and convert video files")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the properties of a video file
    Info(InfoCommand),
    /// Save decoded frames as PNG images
    Extract(ExtractCommand),
    /// Write a synthetic test video
    Synth(SynthCommand),
    /// Decode a video and encode it again
    Transcode(TranscodeCommand),
}

impl Args {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Info(cmd) => cmd.run(),
            Command::Extract(cmd) => cmd.run(),
            Command::Synth(cmd) => cmd.run(),
            Command::Transcode(cmd) => cmd.run(),
        }
    }
}
