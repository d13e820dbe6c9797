// lib: eterm facade - exact-count socket I/O with the fail-fast policy applied
// Session layers call write_all/read_all and either get every byte or the process ends.

// Re-export core policy, protocol constants and helpers
pub use eterm_core::*;

// Re-export transport abstractions (the Result-returning layer stays under `transport`)
pub use eterm_transport as transport;
pub use eterm_transport::{RawSocket, SocketFd, TcpTransport, TransferError, Transport, UnixSocketTransport};

pub mod fatal;
pub mod logging;

pub use fatal::fatal;
pub use logging::init_logging;

use once_cell::sync::Lazy;
use std::os::fd::AsFd;

// Process-wide retry policy - read from ETERM_* variables on first use, never changed
static RETRY_POLICY: Lazy<RetryPolicy> = Lazy::new(|| {
    let policy = RetryPolicy::from_env();
    tracing::debug!(?policy, "eterm retry policy loaded");
    policy
});

/// The policy used by the free functions in this crate.
pub fn retry_policy() -> &'static RetryPolicy {
    &RETRY_POLICY
}

/// Send all of `data` on `fd`, aborting the process on any unrecoverable error.
pub fn write_all<F: AsFd>(fd: F, data: &[u8]) {
    if let Err(err) = try_write_all(fd, data) {
        fatal(&err);
    }
}

/// Fill `buf` from `fd`, aborting the process on any unrecoverable error.
pub fn read_all<F: AsFd>(fd: F, buf: &mut [u8]) {
    if let Err(err) = try_read_all(fd, buf) {
        fatal(&err);
    }
}

/// Block for one poll slice; true if `fd` has data. A failing poll is fatal.
pub fn wait_on_socket_data<F: AsFd>(fd: F) -> bool {
    match eterm_transport::wait_on_socket_data(fd.as_fd(), RETRY_POLICY.read_poll_interval) {
        Ok(ready) => ready,
        Err(err) => fatal(&err),
    }
}

/// Like [`write_all`], but hands the error back instead of aborting.
pub fn try_write_all<F: AsFd>(fd: F, data: &[u8]) -> Result<(), TransferError> {
    eterm_transport::write_all(&mut SocketFd::new(fd.as_fd()), data, &RETRY_POLICY)
}

/// Like [`read_all`], but hands the error back instead of aborting.
pub fn try_read_all<F: AsFd>(fd: F, buf: &mut [u8]) -> Result<(), TransferError> {
    eterm_transport::read_all(&mut SocketFd::new(fd.as_fd()), buf, &RETRY_POLICY)
}
