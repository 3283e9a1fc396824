//! Platform write primitives.
//!
//! Each backend issues exactly one blocking write and never retries a short
//! or failed transfer.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::write_handle;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::write_handle;
