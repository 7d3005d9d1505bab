/*!
    One open output file and every native resource writing it needs.
*/

use std::path::Path;

use ffmpeg_next::{
    Packet, Rational as FFmpegRational,
    codec::{self, Id as CodecIdFFmpeg, encoder::Decision, encoder::video::Encoder as VideoEncoder},
    ffi, format,
    format::{Pixel, context::Output},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use videofile_transform::{
    FrameLayout, PixelConverter,
    convert::{codec_id_to_ffmpeg, is_again, rational_to_ffmpeg},
};
use videofile_types::{Error, Frame, PixelFormat, Result, VideoCodec};

use crate::config::WriterConfig;
use crate::container::{alloc_output, default_video_codec, open_file};

/// Layout every encoder is fed with.
const NATIVE_FORMAT: Pixel = Pixel::YUV420P;

/**
    Native state of an open writer.

    The session only exists once the container header has been written.
    [`WriterSession::finish`] drains the encoder and writes the trailer;
    dropping the session then releases the encoder, the native picture and
    packet, the conversion context and finally the container with its file
    handle, in field order. If `finish` was never called, `Drop` calls it
    and logs a failure.
*/
pub(crate) struct WriterSession {
    encoder: VideoEncoder,
    frame: VideoFrameFFmpeg,
    packet: Packet,
    converter: PixelConverter,
    output: Output,
    config: WriterConfig,
    codec: VideoCodec,
    stream_index: usize,
    encoder_time_base: FFmpegRational,
    stream_time_base: FFmpegRational,
    frames_written: u64,
    finished: bool,
}

impl WriterSession {
    pub(crate) fn open(path: &Path, config: WriterConfig) -> Result<Self> {
        let codec = config.validate()?;
        ffmpeg_next::init().map_err(|e| Error::stream(format!("cannot initialize FFmpeg: {e}")))?;

        let mut output = alloc_output(path)?;

        let codec_id = match codec.codec_id() {
            Some(id) => codec_id_to_ffmpeg(id)?,
            None => default_video_codec(&output),
        };
        if codec_id == CodecIdFFmpeg::None {
            return Err(Error::stream("output format has no default video codec"));
        }

        let encoder_codec = ffmpeg_next::encoder::find(codec_id)
            .ok_or_else(|| Error::stream(format!("cannot find encoder for {codec_id:?}")))?;

        let global_header = output
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        let stream_index = output
            .add_stream(encoder_codec)
            .map_err(|e| Error::stream(format!("cannot add a new video stream: {e}")))?
            .index();

        let time_base = rational_to_ffmpeg(config.frame_rate.invert());

        let mut encoder = codec::context::Context::new_with_codec(encoder_codec)
            .encoder()
            .video()
            .map_err(|e| Error::stream(format!("cannot create video encoder: {e}")))?;

        encoder.set_width(config.width);
        encoder.set_height(config.height);
        encoder.set_format(NATIVE_FORMAT);
        encoder.set_time_base(time_base);
        encoder.set_frame_rate(Some(rational_to_ffmpeg(config.frame_rate)));
        encoder.set_bit_rate(config.bit_rate as usize);
        encoder.set_gop(config.gop_size);

        // MPEG-1 needs rate-distortion macroblock decisions to avoid
        // macroblocks whose coefficients overflow.
        if codec_id == CodecIdFFmpeg::MPEG1VIDEO {
            encoder.set_mb_decision(Decision::RateDistortion);
        }

        if global_header {
            encoder.set_flags(codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder
            .open_as(encoder_codec)
            .map_err(|e| Error::stream(format!("cannot open video codec: {e}")))?;

        {
            let mut stream = output
                .stream_mut(stream_index)
                .ok_or_else(|| Error::stream("video stream disappeared from the container"))?;
            stream.set_parameters(&encoder);
            stream.set_time_base(time_base);
        }

        tracing::debug!(
            codec = encoder_codec.name(),
            width = config.width,
            height = config.height,
            fps = %config.frame_rate,
            "opened video encoder"
        );

        let frame = VideoFrameFFmpeg::new(NATIVE_FORMAT, config.width, config.height);
        let converter = PixelConverter::new(
            FrameLayout::new(PixelFormat::Rgb24, config.width, config.height)?,
            FrameLayout::native(NATIVE_FORMAT, config.width, config.height),
            config.scaling,
        )?;

        open_file(&mut output, path)?;

        output
            .write_header()
            .map_err(|e| Error::stream(format!("cannot write the container header: {e}")))?;

        // The muxer may pick its own time base while writing the header.
        let stream_time_base = output
            .stream(stream_index)
            .map(|s| s.time_base())
            .unwrap_or(time_base);

        tracing::debug!(path = %path.display(), "wrote container header");

        Ok(Self {
            encoder,
            frame,
            packet: Packet::empty(),
            converter,
            output,
            config,
            codec,
            stream_index,
            encoder_time_base: time_base,
            stream_time_base,
            frames_written: 0,
            finished: false,
        })
    }

    pub(crate) fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub(crate) fn codec(&self) -> VideoCodec {
        self.codec
    }

    pub(crate) fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /**
        Convert, encode and mux one frame.
    */
    pub(crate) fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        frame.validate()?;

        if frame.width != self.config.width || frame.height != self.config.height {
            return Err(Error::invalid_argument(format!(
                "frame size {}x{} differs from the video size {}x{} given when opening",
                frame.width, frame.height, self.config.width, self.config.height
            )));
        }

        // SAFETY: the picture is owned by this session; the encoder may still
        // reference its buffers, in which case FFmpeg copies them first.
        let ret = unsafe { ffi::av_frame_make_writable(self.frame.as_mut_ptr()) };
        if ret < 0 {
            return Err(Error::encode(format!(
                "cannot make the video frame writable: {}",
                ffmpeg_next::Error::from(ret)
            )));
        }

        self.converter.from_packed(frame, &mut self.frame)?;

        let pts = self.frames_written as i64;
        self.frame.set_pts(Some(pts));

        loop {
            match self.encoder.send_frame(&self.frame) {
                Ok(()) => break,
                Err(e) if is_again(&e) => {
                    if self.drain_packets()? == 0 {
                        return Err(Error::encode("encoder accepts neither input nor output"));
                    }
                }
                Err(e) => return Err(Error::encode(format!("error encoding video frame: {e}"))),
            }
        }
        self.frames_written += 1;

        if self.drain_packets()? == 0 {
            tracing::trace!(pts, "picture buffered by the encoder");
        }
        Ok(())
    }

    /**
        Drain the encoder and write the container trailer.

        Runs once; later calls do nothing.
    */
    pub(crate) fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        match self.encoder.send_eof() {
            Ok(()) | Err(ffmpeg_next::Error::Eof) => {}
            Err(e) => return Err(Error::encode(format!("error flushing the encoder: {e}"))),
        }
        let flushed = self.drain_packets()?;

        self.output
            .write_trailer()
            .map_err(|e| Error::encode(format!("cannot write the container trailer: {e}")))?;

        tracing::debug!(
            frames = self.frames_written,
            flushed,
            "wrote container trailer"
        );
        Ok(())
    }

    /**
        Write every packet the encoder has ready. Returns how many were written.
    */
    fn drain_packets(&mut self) -> Result<usize> {
        let mut written = 0;
        loop {
            match self.encoder.receive_packet(&mut self.packet) {
                Ok(()) => {
                    self.write_packet()?;
                    written += 1;
                }
                Err(e) if is_again(&e) => return Ok(written),
                Err(ffmpeg_next::Error::Eof) => return Ok(written),
                Err(e) => return Err(Error::encode(format!("error encoding video frame: {e}"))),
            }
        }
    }

    fn write_packet(&mut self) -> Result<()> {
        self.packet.set_stream(self.stream_index);
        self.packet
            .rescale_ts(self.encoder_time_base, self.stream_time_base);
        self.packet
            .write_interleaved(&mut self.output)
            .map_err(|e| Error::encode(format!("cannot write video frame: {e}")))
    }
}

impl Drop for WriterSession {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::warn!(error = %e, "failed to finish video file");
        }
    }
}

impl std::fmt::Debug for WriterSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSession")
            .field("config", &self.config)
            .field("codec", &self.codec)
            .field("frames_written", &self.frames_written)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
