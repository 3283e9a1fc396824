//! The probe sequence: echo arguments, write once, report.

use std::ffi::OsString;
use std::fmt;
use std::io::Write;

use writeprobe_config::{log_cli_warn, log_probe_debug};

use crate::handle::TargetHandle;
use crate::sys;

/// The literal written to the target handle.
pub const PROBE_MESSAGE: &str = "Hi there, world.\n";

/// Process arguments, program name at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
}

impl Invocation {
    /// Capture arguments. Non-UTF-8 arguments are converted lossily.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args = args
            .into_iter()
            .map(|arg| arg.into().to_string_lossy().into_owned())
            .collect();
        Self { args }
    }

    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os())
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// First argument after the program name
    pub fn handle_argument(&self) -> Option<&str> {
        self.args.get(1).map(String::as_str)
    }
}

/// Result of the single write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub success: bool,
    pub bytes_written: usize,
    /// OS error code captured right after a failed call
    pub os_error: Option<i32>,
}

impl WriteOutcome {
    pub fn succeeded(bytes_written: usize) -> Self {
        Self {
            success: true,
            bytes_written,
            os_error: None,
        }
    }

    pub fn failed(os_error: Option<i32>) -> Self {
        Self {
            success: false,
            bytes_written: 0,
            os_error,
        }
    }

    /// The value printed as `Result:`: 1 on success, 0 on failure.
    pub fn result_code(&self) -> i32 {
        i32::from(self.success)
    }
}

/// Seam over the platform write primitive.
pub trait HandleWriter {
    fn write_handle(&mut self, handle: TargetHandle, buf: &[u8]) -> WriteOutcome;
}

/// The real platform primitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsWriter;

impl HandleWriter for OsWriter {
    fn write_handle(&mut self, handle: TargetHandle, buf: &[u8]) -> WriteOutcome {
        sys::write_handle(handle, buf)
    }
}

/// Console lines are best effort: a failed line is logged once and the
/// sequence carries on.
struct Console<'a, C: Write> {
    out: &'a mut C,
    failed: bool,
}

impl<'a, C: Write> Console<'a, C> {
    fn new(out: &'a mut C) -> Self {
        Self { out, failed: false }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let res = self
            .out
            .write_fmt(args)
            .and_then(|_| self.out.write_all(b"\n"));
        self.check(res);
    }

    fn flush(&mut self) {
        let res = self.out.flush();
        self.check(res);
    }

    fn check(&mut self, res: std::io::Result<()>) {
        if let Err(e) = res {
            if !self.failed {
                log_cli_warn!("console output failed", error = e.to_string());
            }
            self.failed = true;
        }
    }
}

/// Run the probe against `handle`, reporting on `console`.
///
/// Console output is flushed before the write so a shared stream shows the
/// lines in program order. The outcome is returned for logging only; it must
/// not decide the exit status.
pub fn run_probe<C, W>(
    invocation: &Invocation,
    handle: TargetHandle,
    console: &mut C,
    writer: &mut W,
) -> WriteOutcome
where
    C: Write,
    W: HandleWriter,
{
    let mut console = Console::new(console);

    console.line(format_args!("There are {} arguments:", invocation.len()));
    for (i, arg) in invocation.args().iter().enumerate() {
        console.line(format_args!("  [{}]: {}", i, arg));
    }
    console.flush();

    log_probe_debug!("writing probe message", handle = handle.to_string());
    let outcome = writer.write_handle(handle, PROBE_MESSAGE.as_bytes());

    console.line(format_args!("Result: {}", outcome.result_code()));
    console.flush();

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Default)]
    struct RecordingWriter {
        calls: Vec<(TargetHandle, Vec<u8>)>,
        fail: bool,
    }

    impl HandleWriter for RecordingWriter {
        fn write_handle(&mut self, handle: TargetHandle, buf: &[u8]) -> WriteOutcome {
            self.calls.push((handle, buf.to_vec()));
            if self.fail {
                WriteOutcome::failed(Some(9))
            } else {
                WriteOutcome::succeeded(buf.len())
            }
        }
    }

    struct BrokenConsole;

    impl Write for BrokenConsole {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn run(args: &[&str], fail: bool) -> (String, RecordingWriter, WriteOutcome) {
        let inv = Invocation::from_args(args.iter().copied());
        let handle = TargetHandle::resolve(&inv);
        let mut console = Vec::new();
        let mut writer = RecordingWriter {
            fail,
            ..Default::default()
        };
        let outcome = run_probe(&inv, handle, &mut console, &mut writer);
        (String::from_utf8(console).unwrap(), writer, outcome)
    }

    #[test]
    fn test_no_arguments_reports_success() {
        let (out, writer, outcome) = run(&["writetest"], false);
        assert_eq!(out, "There are 1 arguments:\n  [0]: writetest\nResult: 1\n");
        assert_eq!(writer.calls.len(), 1);
        assert_eq!(writer.calls[0].0, TargetHandle::Stdout);
        assert_eq!(writer.calls[0].1, PROBE_MESSAGE.as_bytes());
        assert_eq!(outcome.bytes_written, PROBE_MESSAGE.len());
    }

    #[test]
    fn test_failed_write_reports_zero() {
        let (out, writer, outcome) = run(&["writetest", "0"], true);
        assert_eq!(
            out,
            "There are 2 arguments:\n  [0]: writetest\n  [1]: 0\nResult: 0\n"
        );
        assert_eq!(writer.calls[0].0, TargetHandle::Raw(0));
        assert_eq!(outcome.result_code(), 0);
    }

    #[test]
    fn test_every_argument_is_echoed_with_index() {
        let args = ["writetest", "0x2a", "--help", "", "x y"];
        let (out, writer, _) = run(&args, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "There are 5 arguments:");
        for (i, arg) in args.iter().enumerate() {
            assert_eq!(lines[i + 1], format!("  [{}]: {}", i, arg));
        }
        assert_eq!(lines.len(), args.len() + 2);
        assert_eq!(writer.calls.len(), 1);
        assert_eq!(writer.calls[0].0, TargetHandle::Raw(42));
    }

    #[test]
    fn test_byte_count_is_not_reported() {
        let (out, _, _) = run(&["writetest"], false);
        assert!(!out.contains("17"));
    }

    #[test]
    fn test_broken_console_still_writes() {
        let inv = Invocation::from_args(["writetest"]);
        let mut writer = RecordingWriter::default();
        let outcome = run_probe(&inv, TargetHandle::Stdout, &mut BrokenConsole, &mut writer);
        assert_eq!(writer.calls.len(), 1);
        assert!(outcome.success);
    }

    #[test]
    fn test_invocation_accessors() {
        let inv = Invocation::from_args(["prog", "5", "6"]);
        assert_eq!(inv.len(), 3);
        assert!(!inv.is_empty());
        assert_eq!(inv.handle_argument(), Some("5"));
        assert_eq!(Invocation::from_args(["prog"]).handle_argument(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_is_lossy() {
        use std::os::unix::ffi::OsStringExt;
        let inv = Invocation::from_args([
            OsString::from("prog"),
            OsString::from_vec(vec![b'a', 0xff, b'b']),
        ]);
        assert_eq!(inv.args()[1], "a\u{fffd}b");
    }
}
