/*!
    Creating output containers.
*/

use std::{ffi::CString, path::Path, ptr};

use ffmpeg_next::{codec::Id as CodecIdFFmpeg, ffi, format, format::context::Output};

use videofile_transform::convert::io_error;
use videofile_types::{Error, Result};

/// Container used when the file name does not identify one.
const FALLBACK_FORMAT: &std::ffi::CStr = c"mpeg";

/**
    Allocate an output context for `path`.

    The container format is guessed from the file name, falling back to
    MPEG program stream. Nothing is written to disk yet.
*/
pub(crate) fn alloc_output(path: &Path) -> Result<Output> {
    let c_path = path_to_cstring(path)?;

    // SAFETY: all pointers are either null or valid nul-terminated strings.
    let mut oformat = unsafe { ffi::av_guess_format(ptr::null(), c_path.as_ptr(), ptr::null()) };
    if oformat.is_null() {
        tracing::debug!(path = %path.display(), "cannot guess output format from file name, using mpeg");
        // SAFETY: as above.
        oformat = unsafe { ffi::av_guess_format(FALLBACK_FORMAT.as_ptr(), ptr::null(), ptr::null()) };
    }
    if oformat.is_null() {
        return Err(Error::stream("cannot find suitable output format"));
    }

    let mut ps = ptr::null_mut();
    // SAFETY: `oformat` is a static descriptor owned by FFmpeg; `ps` starts null.
    let ret = unsafe {
        ffi::avformat_alloc_output_context2(&mut ps, oformat, ptr::null(), c_path.as_ptr())
    };
    if ret < 0 || ps.is_null() {
        return Err(Error::stream(format!(
            "cannot allocate format context: {}",
            ffmpeg_next::Error::from(ret)
        )));
    }

    // SAFETY: `ps` is a freshly allocated context; Output frees it and closes its I/O on drop.
    let output = unsafe { Output::wrap(ps) };
    tracing::debug!(format = output.format().name(), "allocated output context");
    Ok(output)
}

/**
    Preferred video codec of the container format chosen for `output`.
*/
pub(crate) fn default_video_codec(output: &Output) -> CodecIdFFmpeg {
    // SAFETY: output formats are static descriptors that outlive the context.
    let id = unsafe { (*output.format().as_ptr()).video_codec };
    CodecIdFFmpeg::from(id)
}

/**
    Open the file behind `output` unless its format writes no file.
*/
pub(crate) fn open_file(output: &mut Output, path: &Path) -> Result<()> {
    if output.format().flags().contains(format::Flags::NO_FILE) {
        return Ok(());
    }

    let c_path = path_to_cstring(path)?;
    // SAFETY: the context is exclusively owned by `output` and has no I/O context yet.
    let ret = unsafe {
        ffi::avio_open(&mut (*output.as_mut_ptr()).pb, c_path.as_ptr(), ffi::AVIO_FLAG_WRITE)
    };
    if ret < 0 {
        return Err(io_error(
            ffmpeg_next::Error::from(ret),
            &format!("cannot open the file {}", path.display()),
        ));
    }
    Ok(())
}

fn path_to_cstring(path: &Path) -> Result<CString> {
    CString::new(path.as_os_str().as_encoded_bytes())
        .map_err(|_| Error::invalid_argument("path contains a nul byte"))
}
