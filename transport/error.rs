// Failure kinds of the exact-transfer primitives
use std::io;
use std::time::Duration;

/// Everything the reader, writer or readiness waiter cannot resolve by
/// retrying. Transient conditions (would-block, EINTR, poll timeout) never
/// show up here.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The peer performed an orderly shutdown: send/recv returned 0.
    #[error("{op}: socket closed by peer")]
    PeerClosed { op: &'static str },

    /// send/recv failed with something other than would-block.
    #[error("{op}: {source}")]
    Os {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// The readiness check itself failed.
    #[error("wait_on_socket_data: {source}")]
    Readiness {
        #[source]
        source: io::Error,
    },

    /// `RetryPolicy::max_wait` elapsed before the transfer completed.
    #[error("{op}: gave up after {waited:?} with {transferred}/{expected} bytes")]
    TimedOut {
        op: &'static str,
        waited: Duration,
        transferred: usize,
        expected: usize,
    },
}

impl TransferError {
    pub fn os(op: &'static str, source: io::Error) -> Self {
        TransferError::Os { op, source }
    }

    /// Operation that failed, for diagnostics.
    pub fn op(&self) -> &'static str {
        match self {
            TransferError::PeerClosed { op } => op,
            TransferError::Os { op, .. } => op,
            TransferError::Readiness { .. } => "wait_on_socket_data",
            TransferError::TimedOut { op, .. } => op,
        }
    }

    /// Platform errno behind the failure, if there is one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            TransferError::Os { source, .. } | TransferError::Readiness { source } => {
                source.raw_os_error()
            }
            TransferError::PeerClosed { .. } | TransferError::TimedOut { .. } => None,
        }
    }

    pub fn is_peer_closed(&self) -> bool {
        matches!(self, TransferError::PeerClosed { .. })
    }
}

pub(crate) fn not_connected(op: &'static str) -> TransferError {
    TransferError::os(op, io::Error::new(io::ErrorKind::NotConnected, "Not connected"))
}

/// Would-block style results that the retry loops absorb.
pub(crate) fn is_transient(err: &io::Error) -> bool {
    // std maps both EAGAIN and EWOULDBLOCK to WouldBlock
    matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn would_block_and_eintr_are_transient() {
        assert!(is_transient(&io::Error::from(io::ErrorKind::WouldBlock)));
        assert!(is_transient(&io::Error::from_raw_os_error(libc::EAGAIN)));
        assert!(is_transient(&io::Error::from_raw_os_error(libc::EWOULDBLOCK)));
        assert!(is_transient(&io::Error::from_raw_os_error(libc::EINTR)));
        assert!(!is_transient(&io::Error::from_raw_os_error(libc::ECONNRESET)));
        assert!(!is_transient(&io::Error::from(io::ErrorKind::BrokenPipe)));
    }

    #[test]
    fn errno_and_op_are_reported() {
        let err = TransferError::os("write_all", io::Error::from_raw_os_error(libc::EPIPE));
        assert_eq!(err.op(), "write_all");
        assert_eq!(err.raw_os_error(), Some(libc::EPIPE));
        assert!(err.to_string().starts_with("write_all: "));

        let closed = TransferError::PeerClosed { op: "read_all" };
        assert!(closed.is_peer_closed());
        assert_eq!(closed.raw_os_error(), None);
        assert_eq!(closed.to_string(), "read_all: socket closed by peer");
    }
}
