use std::path::{Path, PathBuf};

/// Returns the path whose write permission decides whether a store can be
/// bound to `file`: the file itself when it exists, otherwise the directory
/// that will contain it.
#[must_use]
pub(crate) fn probe_target(file: &Path) -> PathBuf {
    if file.exists() {
        return file.to_path_buf();
    }

    parent_dir(file)
}

/// The directory a file lives in. A bare file name lives in `.`, and a root
/// path is its own directory.
#[must_use]
pub(crate) fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => file.to_path_buf(),
    }
}

/// Whether the calling process may write to `path`.
///
/// Missing paths are never writable.
#[cfg(unix)]
#[must_use]
pub(crate) fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    let result = unsafe { libc::access(c_path.as_ptr(), libc::W_OK) };
    result == 0
}

#[cfg(not(unix))]
#[must_use]
pub(crate) fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|metadata| !metadata.permissions().readonly())
        .unwrap_or(false)
}
