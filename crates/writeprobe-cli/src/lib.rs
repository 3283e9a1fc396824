//! # writeprobe
//!
//! Smoke test for the platform's blocking file-write primitive: echo the
//! command line, write a fixed literal to stdout or to a handle given as a
//! number, and print whether the call succeeded.

pub mod handle;
pub mod numeric;
pub mod probe;
mod sys;

pub use handle::TargetHandle;
pub use numeric::{parse_handle_value, HandleValue};
pub use probe::{run_probe, HandleWriter, Invocation, OsWriter, WriteOutcome, PROBE_MESSAGE};
