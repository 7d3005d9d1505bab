/*!
    Public writer API.
*/

use std::path::Path;

use videofile_types::{Error, Frame, Rational, Result, VideoCodec};

use crate::config::WriterConfig;
use crate::session::WriterSession;

/**
    Writes packed RGB frames into a single-stream video file.

    # Example

    ```ignore
    let mut writer = VideoFileWriter::new();
    writer.open("out.avi", WriterConfig::new(320, 240).with_codec(VideoCodec::Mpeg4))?;
    for frame in frames {
        writer.write_frame(&frame)?;
    }
    writer.close()?;
    ```
*/
#[derive(Debug, Default)]
pub struct VideoFileWriter {
    session: Option<WriterSession>,
}

impl VideoFileWriter {
    /**
        Create a closed writer.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Create a writer and open `path` in one step.
    */
    pub fn create<P: AsRef<Path>>(path: P, config: WriterConfig) -> Result<Self> {
        let mut writer = Self::new();
        writer.open(path, config)?;
        Ok(writer)
    }

    /**
        Create `path` and prepare it for frames described by `config`.

        A file that is already open is closed first. Invalid arguments are
        reported before anything is touched; any other failure releases
        everything acquired so far and leaves the writer closed.
    */
    pub fn open<P: AsRef<Path>>(&mut self, path: P, config: WriterConfig) -> Result<()> {
        config.validate()?;
        self.close()?;
        self.session = Some(WriterSession::open(path.as_ref(), config)?);
        Ok(())
    }

    /**
        Encode one frame.

        The frame must use a 24 or 32 bit RGB layout and match the size given
        when opening; otherwise nothing is written. After any other error the
        writer should be closed.
    */
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.session
            .as_mut()
            .ok_or_else(Error::not_open)?
            .write_frame(frame)
    }

    /**
        Flush buffered pictures, finalize the file and release every resource.

        Does nothing if closed. Resources are released even when finalizing fails.
    */
    pub fn close(&mut self) -> Result<()> {
        match self.session.take() {
            Some(mut session) => session.finish(),
            None => Ok(()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&WriterSession> {
        self.session.as_ref().ok_or_else(Error::not_open)
    }

    pub fn width(&self) -> Result<u32> {
        Ok(self.session()?.config().width)
    }

    pub fn height(&self) -> Result<u32> {
        Ok(self.session()?.config().height)
    }

    pub fn frame_rate(&self) -> Result<Rational> {
        Ok(self.session()?.config().frame_rate)
    }

    /**
        Codec selected when opening; `VideoCodec::Default` if the container chose.
    */
    pub fn codec(&self) -> Result<VideoCodec> {
        Ok(self.session()?.codec())
    }

    /**
        Number of frames accepted by the encoder so far.
    */
    pub fn frames_written(&self) -> Result<u64> {
        Ok(self.session()?.frames_written())
    }
}
