use std::path::Path;

use videofile_decode::VideoFileReader;
use videofile_encode::{Frame, PixelFormat, Rational, VideoCodec, VideoFileWriter, WriterConfig};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;

fn color(i: usize) -> [u8; 3] {
    let v = (i * 20 % 200) as u8 + 30;
    [v, 255 - v, 128]
}

fn write_solid_frames(path: &Path, config: WriterConfig, count: usize) {
    let mut writer = VideoFileWriter::create(path, config).unwrap();
    for i in 0..count {
        writer.write_frame(&Frame::solid(WIDTH, HEIGHT, color(i))).unwrap();
    }
    assert_eq!(writer.frames_written().unwrap(), count as u64);
    writer.close().unwrap();
}

fn assert_close(actual: &[u8], expected: &[u8], tolerance: u8) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(a.abs_diff(*e) <= tolerance, "{actual:?} vs {expected:?}");
    }
}

#[test]
fn raw_video_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.avi");
    write_solid_frames(&path, WriterConfig::new(WIDTH, HEIGHT).with_codec(VideoCodec::Raw), 10);

    let mut reader = VideoFileReader::new();
    reader.open(&path).unwrap();
    assert_eq!(reader.width().unwrap(), WIDTH);
    assert_eq!(reader.height().unwrap(), HEIGHT);
    assert_eq!(reader.frame_count().unwrap(), 10);
    assert_eq!(reader.codec_name().unwrap(), "rawvideo");
    assert!((reader.frame_rate().unwrap().to_f64() - 25.0).abs() < 0.01);

    let mut read = 0;
    while let Some(frame) = reader.read_frame().unwrap() {
        assert_eq!((frame.width, frame.height), (WIDTH, HEIGHT));
        assert_eq!(frame.format, PixelFormat::Rgb24);
        // Pixels go through 4:2:0 chroma, so the match is close rather than exact.
        assert_close(frame.pixel(WIDTH / 2, HEIGHT / 2), &color(read), 8);
        read += 1;
    }
    assert_eq!(read, 10);
}

#[test]
fn exhausted_reader_keeps_returning_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.avi");
    write_solid_frames(&path, WriterConfig::new(WIDTH, HEIGHT).with_codec(VideoCodec::Raw), 3);

    let mut reader = VideoFileReader::new();
    reader.open(&path).unwrap();
    assert_eq!(reader.frames().map(Result::unwrap).count(), 3);
    for _ in 0..5 {
        assert!(reader.read_frame().unwrap().is_none());
    }

    reader.close();
    assert!(reader.read_frame().unwrap_err().is_not_open());
    assert!(reader.width().unwrap_err().is_io());
}

#[test]
fn buffered_pictures_are_flushed_on_close() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mpeg4.avi");
    let config = WriterConfig::new(WIDTH, HEIGHT)
        .with_codec(VideoCodec::Mpeg4)
        .with_frame_rate(30);
    write_solid_frames(&path, config, 30);

    let mut reader = VideoFileReader::new();
    reader.open(&path).unwrap();
    assert_eq!(reader.codec_name().unwrap(), "mpeg4");
    assert_eq!(reader.frames().map(Result::unwrap).count(), 30);
}

#[test]
fn default_codec_follows_container() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("default.mpg");
    write_solid_frames(&path, WriterConfig::new(WIDTH, HEIGHT), 25);

    let mut reader = VideoFileReader::new();
    reader.open(&path).unwrap();
    assert_eq!(reader.codec_name().unwrap(), "mpeg1video");
    assert_eq!((reader.width().unwrap(), reader.height().unwrap()), (WIDTH, HEIGHT));
    assert_eq!(reader.frames().map(Result::unwrap).count(), 25);
}

#[test]
fn odd_dimensions_touch_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.avi");

    let mut writer = VideoFileWriter::new();
    for (w, h) in [(63, 48), (64, 47)] {
        let err = writer.open(&path, WriterConfig::new(w, h)).unwrap_err();
        assert!(err.is_invalid_argument());
    }
    assert!(!writer.is_open());
    assert!(!path.exists());
}

#[test]
fn out_of_range_selector_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad-codec.avi");
    let len = videofile_encode::CODEC_TABLE.len() as i32;

    for selector in [-2, len] {
        let config = WriterConfig::new(WIDTH, HEIGHT).with_codec(selector);
        let err = VideoFileWriter::create(&path, config).unwrap_err();
        assert!(err.is_invalid_argument());
    }
    assert!(!path.exists());
}

#[test]
fn mismatched_frames_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mismatch.avi");
    let config = WriterConfig::new(WIDTH, HEIGHT).with_codec(VideoCodec::Raw);
    let mut writer = VideoFileWriter::create(&path, config).unwrap();

    writer.write_frame(&Frame::solid(WIDTH, HEIGHT, [1, 2, 3])).unwrap();

    let err = writer.write_frame(&Frame::solid(WIDTH * 2, HEIGHT, [1, 2, 3])).unwrap_err();
    assert!(err.is_invalid_argument());

    let planar = Frame::new(vec![0; 64 * 48 * 3 / 2], WIDTH, HEIGHT, 64, PixelFormat::Yuv420p);
    assert!(writer.write_frame(&planar).unwrap_err().is_invalid_argument());

    assert_eq!(writer.frames_written().unwrap(), 1);
    writer.close().unwrap();
}

#[test]
fn padded_bgra_frames_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bgra.avi");
    let config = WriterConfig::new(WIDTH, HEIGHT).with_codec(VideoCodec::Raw);
    let mut writer = VideoFileWriter::create(&path, config).unwrap();

    let stride = WIDTH as usize * 4 + 16;
    let mut data = vec![0u8; stride * HEIGHT as usize];
    for row in data.chunks_mut(stride) {
        for px in row[..WIDTH as usize * 4].chunks_mut(4) {
            px.copy_from_slice(&[40, 80, 160, 255]);
        }
    }
    writer.write_frame(&Frame::new(data, WIDTH, HEIGHT, stride, PixelFormat::Bgra)).unwrap();
    writer.close().unwrap();

    let mut reader = VideoFileReader::new();
    reader.open(&path).unwrap();
    let frame = reader.read_frame().unwrap().unwrap();
    assert_close(frame.pixel(1, 1), &[160, 80, 40], 8);
}

#[test]
fn writer_accessors_follow_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("accessors.avi");
    let config = WriterConfig::new(WIDTH, HEIGHT)
        .with_frame_rate(Rational::new(30000, 1001))
        .with_codec(VideoCodec::Mpeg4);

    let mut writer = VideoFileWriter::create(&path, config).unwrap();
    assert!(writer.is_open());
    assert_eq!(writer.width().unwrap(), WIDTH);
    assert_eq!(writer.height().unwrap(), HEIGHT);
    assert_eq!(writer.frame_rate().unwrap(), Rational::new(30000, 1001));
    assert_eq!(writer.codec().unwrap(), VideoCodec::Mpeg4);
    assert_eq!(writer.frames_written().unwrap(), 0);

    writer.close().unwrap();
    writer.close().unwrap();
    assert!(writer.width().unwrap_err().is_not_open());
    assert!(writer.frames_written().unwrap_err().is_io());
}

#[test]
fn reopening_closes_the_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.avi");
    let second = dir.path().join("second.avi");
    let config = WriterConfig::new(WIDTH, HEIGHT).with_codec(VideoCodec::Raw);

    let mut writer = VideoFileWriter::create(&first, config.clone()).unwrap();
    writer.write_frame(&Frame::solid(WIDTH, HEIGHT, [9, 9, 9])).unwrap();
    writer.open(&second, config).unwrap();
    assert_eq!(writer.frames_written().unwrap(), 0);
    writer.close().unwrap();

    let mut reader = VideoFileReader::new();
    reader.open(&first).unwrap();
    assert_eq!(reader.frames().count(), 1);
    reader.open(&second).unwrap();
    assert!(reader.read_frame().unwrap().is_none());
}

#[test]
fn dropping_an_open_writer_finishes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dropped.avi");
    {
        let config = WriterConfig::new(WIDTH, HEIGHT).with_codec(VideoCodec::Raw);
        let mut writer = VideoFileWriter::create(&path, config).unwrap();
        writer.write_frame(&Frame::solid(WIDTH, HEIGHT, [50, 60, 70])).unwrap();
    }

    let mut reader = VideoFileReader::new();
    reader.open(&path).unwrap();
    assert_eq!(reader.frames().count(), 1);
}

#[test]
fn frame_with_overflowing_stride_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stride.avi");
    let config = WriterConfig::new(WIDTH, HEIGHT).with_codec(VideoCodec::Raw);

    let mut writer = VideoFileWriter::create(&path, config).unwrap();
    let frame = Frame::new(vec![0; 16], WIDTH, HEIGHT, usize::MAX / 2 + 1, PixelFormat::Rgb24);
    assert!(writer.write_frame(&frame).unwrap_err().is_invalid_argument());
    assert_eq!(writer.frames_written().unwrap(), 0);
    writer.close().unwrap();
}

#[cfg(unix)]
#[test]
fn default_codec_with_non_utf8_file_name() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OsStr::from_bytes(b"clip-\xff.mpg"));
    write_solid_frames(&path, WriterConfig::new(WIDTH, HEIGHT), 5);

    let mut reader = VideoFileReader::new();
    reader.open(&path).unwrap();
    assert_eq!(reader.codec_name().unwrap(), "mpeg1video");
    assert!(reader.frames().count() >= 1);
}
