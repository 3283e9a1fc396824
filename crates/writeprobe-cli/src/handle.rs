//! Target handle resolution.

use std::fmt;

use crate::numeric::{parse_handle_value, HandleValue};
use crate::probe::Invocation;

/// Where the probe message goes.
///
/// A `Raw` value is borrowed from the caller: it is never validated and
/// never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetHandle {
    /// The process's inherited standard output
    Stdout,
    /// A caller-supplied number reinterpreted as a platform handle
    Raw(HandleValue),
}

impl TargetHandle {
    /// Resolve from the first user argument of `invocation`.
    pub fn resolve(invocation: &Invocation) -> Self {
        Self::from_argument(invocation.handle_argument())
    }

    /// Resolve from an optional handle argument. Present but malformed means 0.
    pub fn from_argument(argument: Option<&str>) -> Self {
        match argument {
            Some(text) => TargetHandle::Raw(parse_handle_value(text)),
            None => TargetHandle::Stdout,
        }
    }
}

impl fmt::Display for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetHandle::Stdout => f.write_str("stdout"),
            TargetHandle::Raw(value) => write!(f, "raw:{value:#x}"),
        }
    }
}
