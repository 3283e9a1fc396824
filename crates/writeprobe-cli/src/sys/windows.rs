use std::io;
use std::ptr;

use windows_sys::Win32::Foundation::HANDLE;
use windows_sys::Win32::Storage::FileSystem::WriteFile;
use windows_sys::Win32::System::Console::{GetStdHandle, STD_OUTPUT_HANDLE};
use writeprobe_config::log_probe_debug;

use crate::handle::TargetHandle;
use crate::probe::WriteOutcome;

// GetStdHandle returns the redirected handle if SetStdHandle was used, which
// is the same handle Rust's own stdout writes to.
fn raw_handle(handle: TargetHandle) -> HANDLE {
    match handle {
        TargetHandle::Stdout => unsafe { GetStdHandle(STD_OUTPUT_HANDLE) },
        TargetHandle::Raw(value) => value as usize as HANDLE,
    }
}

/// Single synchronous `WriteFile` of `buf` with no `OVERLAPPED` structure.
pub fn write_handle(handle: TargetHandle, buf: &[u8]) -> WriteOutcome {
    let raw = raw_handle(handle);
    let len = u32::try_from(buf.len()).unwrap_or(u32::MAX);
    let mut written: u32 = 0;
    // SAFETY: `buf` is valid for `len` bytes and `written` outlives the call.
    // A null OVERLAPPED pointer requests a blocking write.
    let ok = unsafe { WriteFile(raw, buf.as_ptr(), len, &mut written, ptr::null_mut()) };
    if ok == 0 {
        let err = io::Error::last_os_error();
        log_probe_debug!(
            "WriteFile failed",
            handle = raw as usize,
            error = err.to_string()
        );
        return WriteOutcome::failed(err.raw_os_error());
    }
    log_probe_debug!("WriteFile completed", handle = raw as usize, bytes = written);
    WriteOutcome::succeeded(written as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle_fails() {
        let outcome = write_handle(TargetHandle::Raw(0), b"x");
        assert!(!outcome.success);
        assert_eq!(outcome.result_code(), 0);
        assert!(outcome.os_error.is_some());
    }
}
