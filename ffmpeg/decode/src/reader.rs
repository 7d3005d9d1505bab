/*!
    Public reader API.
*/

use std::path::Path;

use videofile_types::{Error, Frame, Rational, Result, VideoStreamInfo};

use crate::config::ReaderConfig;
use crate::session::ReaderSession;

/**
    Reads the first video stream of a file as packed RGB frames.

    # Example

    ```ignore
    let mut reader = VideoFileReader::new();
    reader.open("input.avi")?;
    println!("{}x{} @ {}", reader.width()?, reader.height()?, reader.frame_rate()?);
    while let Some(frame) = reader.read_frame()? {
        // ...
    }
    reader.close();
    ```
*/
#[derive(Debug, Default)]
pub struct VideoFileReader {
    config: ReaderConfig,
    session: Option<ReaderSession>,
}

impl VideoFileReader {
    /**
        Create a closed reader producing 24-bit RGB frames.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Create a closed reader with the given configuration.
    */
    pub fn with_config(config: ReaderConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /**
        Open a video file, closing any file opened before.

        On failure the reader is left closed.
    */
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.close();
        self.session = Some(ReaderSession::open(path.as_ref(), &self.config)?);
        Ok(())
    }

    /**
        Read the next frame.

        Returns `Ok(None)` at end of stream, and keeps doing so until the
        reader is closed. After an error the position in the stream is
        unspecified and the reader should be closed.
    */
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        self.session
            .as_mut()
            .ok_or_else(Error::not_open)?
            .next_frame()
    }

    /**
        Iterate over the remaining frames.
    */
    pub fn frames(&mut self) -> Frames<'_> {
        Frames {
            reader: self,
            done: false,
        }
    }

    /**
        Close the file and release every resource. Does nothing if closed.
    */
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(stream = session.info().index, "closing video file");
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /**
        Metadata of the stream being read.
    */
    pub fn stream_info(&self) -> Result<&VideoStreamInfo> {
        self.session
            .as_ref()
            .map(ReaderSession::info)
            .ok_or_else(Error::not_open)
    }

    pub fn width(&self) -> Result<u32> {
        Ok(self.stream_info()?.width)
    }

    pub fn height(&self) -> Result<u32> {
        Ok(self.stream_info()?.height)
    }

    pub fn frame_rate(&self) -> Result<Rational> {
        Ok(self.stream_info()?.frame_rate)
    }

    /**
        Number of frames declared by the container, 0 if it does not say.
    */
    pub fn frame_count(&self) -> Result<u64> {
        Ok(self.stream_info()?.frame_count)
    }

    pub fn codec_name(&self) -> Result<&str> {
        Ok(&self.stream_info()?.codec_name)
    }
}

/**
    Iterator over the frames of a [`VideoFileReader`].

    Ends at end of stream or after yielding the first error.
*/
#[derive(Debug)]
pub struct Frames<'a> {
    reader: &'a mut VideoFileReader,
    done: bool,
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::*;

    /// Mono 16-bit PCM, 8 kHz, 0.1 s of silence.
    fn write_silent_wav(out: &mut impl Write) -> io::Result<()> {
        let data_len: u32 = 800 * 2;
        out.write_all(b"RIFF")?;
        out.write_all(&(36 + data_len).to_le_bytes())?;
        out.write_all(b"WAVEfmt ")?;
        out.write_all(&16u32.to_le_bytes())?;
        out.write_all(&1u16.to_le_bytes())?; // PCM
        out.write_all(&1u16.to_le_bytes())?; // channels
        out.write_all(&8000u32.to_le_bytes())?;
        out.write_all(&16000u32.to_le_bytes())?;
        out.write_all(&2u16.to_le_bytes())?;
        out.write_all(&16u16.to_le_bytes())?;
        out.write_all(b"data")?;
        out.write_all(&data_len.to_le_bytes())?;
        out.write_all(&vec![0; data_len as usize])
    }

    #[test]
    fn closed_reader_accessors_fail() {
        let reader = VideoFileReader::new();
        assert!(!reader.is_open());
        assert!(reader.width().unwrap_err().is_not_open());
        assert!(reader.height().unwrap_err().is_io());
        assert!(reader.frame_rate().unwrap_err().is_io());
        assert!(reader.frame_count().unwrap_err().is_io());
        assert!(reader.codec_name().unwrap_err().is_io());
    }

    #[test]
    fn closed_reader_cannot_read() {
        let mut reader = VideoFileReader::new();
        assert!(reader.read_frame().unwrap_err().is_not_open());

        let mut frames = reader.frames();
        assert!(frames.next().unwrap().is_err());
        assert!(frames.next().is_none());
    }

    #[test]
    fn close_is_idempotent() {
        let mut reader = VideoFileReader::new();
        reader.close();
        reader.close();
        assert!(!reader.is_open());
    }

    #[test]
    fn failed_open_leaves_reader_closed() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = VideoFileReader::new();
        let err = reader.open(dir.path().join("missing.mp4")).unwrap_err();
        assert!(err.is_io());
        assert!(!reader.is_open());
    }

    #[test]
    fn audio_only_file_has_no_video_stream() {
        let mut file = tempfile::Builder::new().suffix(".wav").tempfile().unwrap();
        write_silent_wav(&mut file).unwrap();
        file.flush().unwrap();

        let mut reader = VideoFileReader::new();
        let err = reader.open(file.path()).unwrap_err();
        assert!(err.is_stream(), "{err:?}");
        assert!(!reader.is_open());
    }

    #[test]
    fn invalid_output_layout_fails_before_opening() {
        let config = ReaderConfig::new().with_pixel_format(videofile_types::PixelFormat::Nv12);
        let mut reader = VideoFileReader::with_config(config);
        let err = reader.open("does-not-matter.avi").unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
