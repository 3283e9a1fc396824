use std::io;
use std::os::fd::{AsRawFd, RawFd};

use libc::c_void;
use writeprobe_config::log_probe_debug;

use crate::handle::TargetHandle;
use crate::probe::WriteOutcome;

/// Handle values narrow to a descriptor the way a C cast to `int` would.
fn raw_fd(handle: TargetHandle) -> RawFd {
    match handle {
        TargetHandle::Stdout => io::stdout().as_raw_fd(),
        TargetHandle::Raw(value) => value as RawFd,
    }
}

/// Single `write(2)` of `buf` to the descriptor behind `handle`.
pub fn write_handle(handle: TargetHandle, buf: &[u8]) -> WriteOutcome {
    let fd = raw_fd(handle);
    // SAFETY: `buf` is valid for `buf.len()` bytes. A descriptor that is not
    // open makes the kernel return EBADF rather than touch memory.
    let ret = unsafe { libc::write(fd, buf.as_ptr() as *const c_void, buf.len()) };
    if ret < 0 {
        let err = io::Error::last_os_error();
        log_probe_debug!("write(2) failed", fd = fd, error = err.to_string());
        return WriteOutcome::failed(err.raw_os_error());
    }
    log_probe_debug!("write(2) completed", fd = fd, bytes = ret);
    WriteOutcome::succeeded(ret as usize)
}
