/*!
    Video file reading.

    [`VideoFileReader`] opens a container, selects its first video stream,
    decodes it and hands out frames converted to a packed RGB layout.

    # Decode loop

    Containers deliver packets that do not line up with pictures, and
    decoders may hold several packets before emitting anything. Reading is
    therefore a small state machine ([`DecodeState`]): packets of the video
    stream are fed until a picture completes, packets of other streams are
    skipped, and at end of file the decoder is flushed once so that buffered
    pictures are not lost. A packet the decoder refuses while it still has
    output is kept in a [`PendingPacket`] and resubmitted.
*/

mod config;
mod container;
mod cursor;
mod reader;
mod session;
mod state;

pub use config::ReaderConfig;
pub use cursor::PendingPacket;
pub use reader::{Frames, VideoFileReader};
pub use state::DecodeState;

pub use videofile_transform::ScalingAlgorithm;
pub use videofile_types::{Error, Frame, PixelFormat, Rational, Result, VideoStreamInfo};
