/*!
    One open input file and every native resource reading it needs.
*/

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{
    Packet, codec, decoder, format::Pixel, format::context::Input, media,
    util::frame::video::Video as VideoFrameFFmpeg,
};

use videofile_transform::{
    FrameLayout, PixelConverter,
    convert::{codec_id_from_ffmpeg, io_error, is_again, pixel_format_from_ffmpeg, rational_from_ffmpeg},
};
use videofile_types::{Error, Frame, Rational, Result, VideoStreamInfo};

use crate::config::ReaderConfig;
use crate::container::open_input;
use crate::cursor::PendingPacket;
use crate::state::DecodeState;

/**
    Native state of an open reader.

    Fields drop in declaration order, which is the release order: the decoded
    picture, the decoder, the conversion context, the pending packet and
    finally the container. A partially built session never exists; every
    resource acquired by [`ReaderSession::open`] before a failure is dropped
    in reverse acquisition order as the error propagates.
*/
pub(crate) struct ReaderSession {
    frame: VideoFrameFFmpeg,
    decoder: decoder::Video,
    converter: PixelConverter,
    pending: PendingPacket,
    input: Input,
    info: VideoStreamInfo,
    state: DecodeState,
}

impl ReaderSession {
    pub(crate) fn open(path: &Path, config: &ReaderConfig) -> Result<Self> {
        config.validate()?;
        ffmpeg_next::init().map_err(|e| Error::stream(format!("cannot initialize FFmpeg: {e}")))?;

        let input = open_input(path)?;

        let stream = input
            .streams()
            .find(|s| s.parameters().medium() == media::Type::Video)
            .ok_or_else(|| Error::stream("cannot find a video stream in the file"))?;
        let index = stream.index();

        let codec = decoder::find(stream.parameters().id())
            .ok_or_else(|| Error::stream("cannot find a decoder for the video stream"))?;

        let decoder = codec::context::Context::from_parameters(stream.parameters())
            .and_then(|context| context.decoder().open_as(codec))
            .and_then(|opened| opened.video())
            .map_err(|e| Error::stream(format!("cannot open the video codec: {e}")))?;

        let time_base = rational_from_ffmpeg(stream.time_base())
            .filter(|r| r.is_positive())
            .unwrap_or(Rational::new(1, 1));
        let frame_rate = [stream.avg_frame_rate(), stream.rate()]
            .into_iter()
            .filter_map(rational_from_ffmpeg)
            .find(|r| r.is_positive())
            .unwrap_or_else(|| time_base.invert());

        let duration = if stream.duration() > 0 {
            Some(Duration::from_secs_f64(stream.duration() as f64 * time_base.to_f64()))
        } else if input.duration() > 0 {
            Some(Duration::from_micros(input.duration() as u64))
        } else {
            None
        };

        let info = VideoStreamInfo {
            index,
            width: decoder.width(),
            height: decoder.height(),
            pixel_format: pixel_format_from_ffmpeg(decoder.format()),
            frame_rate,
            time_base,
            frame_count: u64::try_from(stream.frames()).unwrap_or(0),
            duration,
            codec_id: codec_id_from_ffmpeg(codec.id()),
            codec_name: codec.name().to_owned(),
            bitrate: Some(decoder.bit_rate() as u64).filter(|&b| b > 0),
        };

        tracing::debug!(
            stream = index,
            codec = %info.codec_name,
            width = info.width,
            height = info.height,
            fps = info.fps(),
            frames = info.frame_count,
            "opened video decoder"
        );

        // Some demuxers leave the layout unset until the first picture; the
        // converter is rebuilt when it arrives.
        let native = match decoder.format() {
            Pixel::None => Pixel::YUV420P,
            format => format,
        };
        let converter = PixelConverter::new(
            FrameLayout::native(native, info.width, info.height),
            FrameLayout::new(config.pixel_format, info.width, info.height)?,
            config.scaling,
        )?;

        Ok(Self {
            frame: VideoFrameFFmpeg::empty(),
            decoder,
            converter,
            pending: PendingPacket::new(),
            input,
            info,
            state: DecodeState::default(),
        })
    }

    pub(crate) fn info(&self) -> &VideoStreamInfo {
        &self.info
    }

    /**
        Advance the decode loop until a picture completes or the stream ends.
    */
    pub(crate) fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            if self.state.is_exhausted() {
                return Ok(None);
            }
            if !self.state.is_draining() {
                self.feed_decoder()?;
                continue;
            }

            match self.decoder.receive_frame(&mut self.frame) {
                Ok(()) => return self.converter.to_packed(&self.frame).map(Some),
                Err(e) if is_again(&e) => {
                    if self.state == DecodeState::Flushing {
                        tracing::warn!("decoder asked for input while flushing");
                        self.state = DecodeState::Exhausted;
                    } else {
                        self.state = DecodeState::AwaitingPacket;
                    }
                }
                Err(ffmpeg_next::Error::Eof) => {
                    tracing::debug!("decoder drained");
                    self.state = DecodeState::Exhausted;
                }
                Err(e) => return Err(Error::decode(format!("error decoding video frame: {e}"))),
            }
        }
    }

    /**
        Give the decoder its next input: the held packet, the next packet of
        the stream, or end of stream.
    */
    fn feed_decoder(&mut self) -> Result<()> {
        if let Some(packet) = self.pending.packet() {
            return match self.decoder.send_packet(packet) {
                Ok(()) => {
                    self.pending.release();
                    self.state = DecodeState::DecodingBuffered;
                    Ok(())
                }
                Err(e) if is_again(&e) => Err(Error::decode(
                    "decoder accepts neither input nor output",
                )),
                Err(e) => Err(Error::decode(format!("error decoding video packet: {e}"))),
            };
        }

        match self.read_packet()? {
            Some(packet) => match self.decoder.send_packet(&packet) {
                Ok(()) => self.state = DecodeState::DecodingBuffered,
                Err(e) if is_again(&e) => {
                    tracing::trace!(bytes = packet.size(), "decoder full, holding packet");
                    self.pending.hold(packet);
                    self.state = DecodeState::DecodingBuffered;
                }
                Err(e) => return Err(Error::decode(format!("error decoding video packet: {e}"))),
            },
            None => {
                match self.decoder.send_eof() {
                    Ok(()) | Err(ffmpeg_next::Error::Eof) => {}
                    Err(e) => return Err(Error::decode(format!("error flushing the decoder: {e}"))),
                }
                tracing::debug!("end of container, flushing decoder");
                self.state = DecodeState::Flushing;
            }
        }
        Ok(())
    }

    /**
        Read the next packet of the selected stream, skipping all others.
    */
    fn read_packet(&mut self) -> Result<Option<Packet>> {
        loop {
            let mut packet = Packet::empty();
            match packet.read(&mut self.input) {
                Ok(()) if packet.stream() == self.info.index => return Ok(Some(packet)),
                Ok(()) => {
                    tracing::trace!(stream = packet.stream(), "skipping packet of another stream");
                }
                Err(ffmpeg_next::Error::Eof) => return Ok(None),
                Err(e) => return Err(io_error(e, "cannot read from the video file")),
            }
        }
    }
}

impl std::fmt::Debug for ReaderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSession")
            .field("info", &self.info)
            .field("state", &self.state)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
