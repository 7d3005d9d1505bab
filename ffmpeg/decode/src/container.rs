/*!
    Opening input containers.
*/

use std::{ffi::CString, path::Path, ptr};

use ffmpeg_next::{ffi, format::context::Input};

use videofile_transform::convert::io_error;
use videofile_types::{Error, Result};

/**
    Open the container at `path` and probe its streams.

    Opening and probing are separate steps so that an unreadable file is
    reported as an I/O error and unusable stream metadata as a stream error.
*/
pub(crate) fn open_input(path: &Path) -> Result<Input> {
    let c_path = path_to_cstring(path)?;

    let mut ps = ptr::null_mut();
    // SAFETY: `ps` starts null so FFmpeg allocates the context; on failure it is freed by FFmpeg.
    let ret = unsafe {
        ffi::avformat_open_input(&mut ps, c_path.as_ptr(), ptr::null_mut(), ptr::null_mut())
    };
    if ret < 0 {
        return Err(io_error(
            ffmpeg_next::Error::from(ret),
            &format!("cannot open the video file {}", path.display()),
        ));
    }

    // SAFETY: `ps` was returned by a successful avformat_open_input; Input closes it on drop.
    let mut input = unsafe { Input::wrap(ps) };

    // SAFETY: the context is open and exclusively owned by `input`.
    let ret = unsafe { ffi::avformat_find_stream_info(input.as_mut_ptr(), ptr::null_mut()) };
    if ret < 0 {
        return Err(Error::stream(format!(
            "cannot find stream information: {}",
            ffmpeg_next::Error::from(ret)
        )));
    }

    tracing::debug!(path = %path.display(), streams = input.nb_streams(), "opened input");
    Ok(input)
}

pub(crate) fn path_to_cstring(path: &Path) -> Result<CString> {
    CString::new(path.as_os_str().as_encoded_bytes())
        .map_err(|_| Error::invalid_argument("path contains a nul byte"))
}
