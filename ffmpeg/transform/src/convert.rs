/*!
    Conversion utilities between ffmpeg-next types and videofile-types.
*/

use std::io;

use ffmpeg_next::{codec::Id, format::Pixel, util::error::EAGAIN};

use videofile_types::{CodecId, Error, PixelFormat, Rational, Result};

/**
    Convert ffmpeg_next::Rational to our Rational.

    Returns `None` for FFmpeg's "unknown" value (zero denominator).
*/
pub fn rational_from_ffmpeg(r: ffmpeg_next::Rational) -> Option<Rational> {
    if r.denominator() == 0 {
        None
    } else {
        Some(Rational::new(r.numerator(), r.denominator()))
    }
}

/**
    Convert our Rational to ffmpeg_next::Rational.
*/
pub fn rational_to_ffmpeg(r: Rational) -> ffmpeg_next::Rational {
    ffmpeg_next::Rational::new(r.num, r.den)
}

/**
    Convert ffmpeg_next pixel format to our PixelFormat.
*/
pub fn pixel_format_from_ffmpeg(format: Pixel) -> Option<PixelFormat> {
    match format {
        Pixel::YUV420P => Some(PixelFormat::Yuv420p),
        Pixel::NV12 => Some(PixelFormat::Nv12),
        Pixel::YUV422P => Some(PixelFormat::Yuv422p),
        Pixel::YUV444P => Some(PixelFormat::Yuv444p),
        Pixel::RGB24 => Some(PixelFormat::Rgb24),
        Pixel::BGR24 => Some(PixelFormat::Bgr24),
        Pixel::RGBA => Some(PixelFormat::Rgba),
        Pixel::BGRA => Some(PixelFormat::Bgra),
        _ => None,
    }
}

/**
    Convert our PixelFormat to FFmpeg's Pixel format.
*/
pub fn pixel_format_to_ffmpeg(format: PixelFormat) -> Result<Pixel> {
    match format {
        PixelFormat::Yuv420p => Ok(Pixel::YUV420P),
        PixelFormat::Nv12 => Ok(Pixel::NV12),
        PixelFormat::Yuv422p => Ok(Pixel::YUV422P),
        PixelFormat::Yuv444p => Ok(Pixel::YUV444P),
        PixelFormat::Rgb24 => Ok(Pixel::RGB24),
        PixelFormat::Bgr24 => Ok(Pixel::BGR24),
        PixelFormat::Rgba => Ok(Pixel::RGBA),
        PixelFormat::Bgra => Ok(Pixel::BGRA),
        _ => Err(Error::invalid_argument(format!(
            "pixel format {format:?} not supported"
        ))),
    }
}

/**
    Convert ffmpeg_next codec ID to our CodecId.
*/
pub fn codec_id_from_ffmpeg(id: Id) -> Option<CodecId> {
    match id {
        Id::MPEG4 => Some(CodecId::Mpeg4),
        Id::WMV1 => Some(CodecId::Wmv1),
        Id::WMV2 => Some(CodecId::Wmv2),
        Id::MSMPEG4V2 => Some(CodecId::MsMpeg4v2),
        Id::MSMPEG4V3 => Some(CodecId::MsMpeg4v3),
        Id::H263P => Some(CodecId::H263p),
        Id::FLV1 => Some(CodecId::Flv1),
        Id::MPEG1VIDEO => Some(CodecId::Mpeg1Video),
        Id::MPEG2VIDEO => Some(CodecId::Mpeg2Video),
        Id::RAWVIDEO => Some(CodecId::RawVideo),
        Id::MJPEG => Some(CodecId::Mjpeg),
        Id::H264 => Some(CodecId::H264),
        Id::HEVC => Some(CodecId::H265),
        Id::VP8 => Some(CodecId::Vp8),
        Id::VP9 => Some(CodecId::Vp9),
        Id::AV1 => Some(CodecId::Av1),
        _ => None,
    }
}

/**
    Convert our CodecId to FFmpeg's codec ID.
*/
pub fn codec_id_to_ffmpeg(codec: CodecId) -> Result<Id> {
    match codec {
        CodecId::Mpeg4 => Ok(Id::MPEG4),
        CodecId::Wmv1 => Ok(Id::WMV1),
        CodecId::Wmv2 => Ok(Id::WMV2),
        CodecId::MsMpeg4v2 => Ok(Id::MSMPEG4V2),
        CodecId::MsMpeg4v3 => Ok(Id::MSMPEG4V3),
        CodecId::H263p => Ok(Id::H263P),
        CodecId::Flv1 => Ok(Id::FLV1),
        CodecId::Mpeg1Video => Ok(Id::MPEG1VIDEO),
        CodecId::Mpeg2Video => Ok(Id::MPEG2VIDEO),
        CodecId::RawVideo => Ok(Id::RAWVIDEO),
        CodecId::Mjpeg => Ok(Id::MJPEG),
        CodecId::H264 => Ok(Id::H264),
        CodecId::H265 => Ok(Id::HEVC),
        CodecId::Vp8 => Ok(Id::VP8),
        CodecId::Vp9 => Ok(Id::VP9),
        CodecId::Av1 => Ok(Id::AV1),
        _ => Err(Error::stream(format!("codec {codec:?} has no FFmpeg identifier"))),
    }
}

/**
    Wrap an FFmpeg failure on storage access as an I/O error.

    Errors carrying an OS errno keep it, so a missing file surfaces as
    `ErrorKind::NotFound`.
*/
pub fn io_error(e: ffmpeg_next::Error, context: &str) -> Error {
    let source = match e {
        ffmpeg_next::Error::Other { errno } => io::Error::from_raw_os_error(errno),
        ffmpeg_next::Error::InvalidData => {
            io::Error::new(io::ErrorKind::InvalidData, e.to_string())
        }
        other => io::Error::other(other.to_string()),
    };
    Error::io(source.kind(), format!("{context}: {source}"))
}

/**
    Returns true if FFmpeg asked to retry after draining output (EAGAIN).
*/
pub fn is_again(e: &ffmpeg_next::Error) -> bool {
    matches!(e, ffmpeg_next::Error::Other { errno } if *errno == EAGAIN)
}
