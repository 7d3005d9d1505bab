/*!
    Codec identification and the writer's codec table.
*/

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/**
    Codec identifiers.

    Covers the codecs reachable through [`VideoCodec`] plus the common ones a
    reader is likely to report. Not all FFmpeg codecs are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// MPEG-4 Part 2
    Mpeg4,
    /// Windows Media Video 7
    Wmv1,
    /// Windows Media Video 8
    Wmv2,
    /// Microsoft MPEG-4 version 2
    MsMpeg4v2,
    /// Microsoft MPEG-4 version 3
    MsMpeg4v3,
    /// H.263+
    H263p,
    /// Flash Video (Sorenson H.263)
    Flv1,
    /// MPEG-1 Video
    Mpeg1Video,
    /// MPEG-2 Video
    Mpeg2Video,
    /// Uncompressed video
    RawVideo,
    /// Motion JPEG
    Mjpeg,
    /// H.264 / AVC
    H264,
    /// H.265 / HEVC
    H265,
    /// VP8
    Vp8,
    /// VP9
    Vp9,
    /// AV1
    Av1,
}

/**
    Abstract codec selector for the writer.

    The ordinal of every variant except `Default` indexes [`CODEC_TABLE`].
    `Default` (-1) lets the container format pick its preferred codec.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VideoCodec {
    /// Use the container format's preferred codec.
    #[default]
    Default,
    /// MPEG-4 Part 2.
    Mpeg4,
    /// Windows Media Video 7.
    Wmv1,
    /// Windows Media Video 8.
    Wmv2,
    /// Microsoft MPEG-4 v2.
    MsMpeg4v2,
    /// Microsoft MPEG-4 v3.
    MsMpeg4v3,
    /// H.263+.
    H263P,
    /// Flash Video.
    Flv1,
    /// MPEG-2 Video.
    Mpeg2,
    /// Uncompressed video.
    Raw,
}

/**
    One (selector, identifier) pair of the codec table.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecTableEntry {
    pub selector: VideoCodec,
    pub codec_id: CodecId,
}

const fn entry(selector: VideoCodec, codec_id: CodecId) -> CodecTableEntry {
    CodecTableEntry { selector, codec_id }
}

/**
    Selector to codec mapping, ordered by selector ordinal.

    The table length defines the valid selector range `[-1, CODEC_TABLE.len())`.
*/
pub const CODEC_TABLE: [CodecTableEntry; 9] = [
    entry(VideoCodec::Mpeg4, CodecId::Mpeg4),
    entry(VideoCodec::Wmv1, CodecId::Wmv1),
    entry(VideoCodec::Wmv2, CodecId::Wmv2),
    entry(VideoCodec::MsMpeg4v2, CodecId::MsMpeg4v2),
    entry(VideoCodec::MsMpeg4v3, CodecId::MsMpeg4v3),
    entry(VideoCodec::H263P, CodecId::H263p),
    entry(VideoCodec::Flv1, CodecId::Flv1),
    entry(VideoCodec::Mpeg2, CodecId::Mpeg2Video),
    entry(VideoCodec::Raw, CodecId::RawVideo),
];

impl VideoCodec {
    /// Selector value of [`VideoCodec::Default`].
    pub const DEFAULT_SELECTOR: i32 = -1;

    /**
        Returns the selector ordinal (-1 for `Default`).
    */
    pub fn selector(self) -> i32 {
        match self {
            Self::Default => Self::DEFAULT_SELECTOR,
            codec => CODEC_TABLE
                .iter()
                .position(|e| e.selector == codec)
                .map_or(Self::DEFAULT_SELECTOR, |i| i as i32),
        }
    }

    /**
        Look up a selector ordinal, validating it against the table length.
    */
    pub fn from_selector(selector: i32) -> Result<Self> {
        if selector == Self::DEFAULT_SELECTOR {
            return Ok(Self::Default);
        }

        usize::try_from(selector)
            .ok()
            .and_then(|i| CODEC_TABLE.get(i))
            .map(|e| e.selector)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "invalid video codec selector {selector}, expected -1..{}",
                    CODEC_TABLE.len()
                ))
            })
    }

    /**
        Returns the concrete codec, or `None` for `Default`.
    */
    pub fn codec_id(self) -> Option<CodecId> {
        CODEC_TABLE
            .iter()
            .find(|e| e.selector == self)
            .map(|e| e.codec_id)
    }

    /**
        Lowercase name used by `Display` and `FromStr`.
    */
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Mpeg4 => "mpeg4",
            Self::Wmv1 => "wmv1",
            Self::Wmv2 => "wmv2",
            Self::MsMpeg4v2 => "msmpeg4v2",
            Self::MsMpeg4v3 => "msmpeg4v3",
            Self::H263P => "h263p",
            Self::Flv1 => "flv1",
            Self::Mpeg2 => "mpeg2",
            Self::Raw => "raw",
        }
    }
}

impl TryFrom<i32> for VideoCodec {
    type Error = Error;

    fn try_from(selector: i32) -> Result<Self> {
        Self::from_selector(selector)
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VideoCodec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        std::iter::once(Self::Default)
            .chain(CODEC_TABLE.iter().map(|e| e.selector))
            .find(|codec| codec.name() == wanted)
            .ok_or_else(|| Error::invalid_argument(format!("unknown video codec '{s}'")))
    }
}
