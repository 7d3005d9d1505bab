/*!
    Video file writing.

    [`VideoFileWriter`] creates a container, adds one video stream and
    encodes packed RGB frames into it.

    # Pipeline

    Each submitted frame is converted to planar YUV 4:2:0, sent to the
    encoder, and every packet the encoder has ready is timestamped in the
    stream's time base and handed to the container's interleaving writer.
    Encoders may hold pictures back, so a frame does not always produce a
    packet. Closing the writer drains the encoder before the trailer is
    written, so no picture is lost.

    # Codecs

    The codec is chosen with a [`VideoCodec`] (or its raw selector, see
    [`CodecSelector`]). `VideoCodec::Default` lets the container format pick,
    which is decided by the file extension.

    ```ignore
    use videofile_encode::{VideoCodec, VideoFileWriter, WriterConfig};

    let config = WriterConfig::new(640, 480)
        .with_frame_rate(30)
        .with_codec(VideoCodec::Mpeg4);
    let mut writer = VideoFileWriter::create("out.avi", config)?;
    ```
*/

mod config;
mod container;
mod session;
mod writer;

pub use config::{CodecSelector, WriterConfig};
pub use writer::VideoFileWriter;

pub use videofile_transform::ScalingAlgorithm;
pub use videofile_types::{CODEC_TABLE, Error, Frame, PixelFormat, Rational, Result, VideoCodec};
