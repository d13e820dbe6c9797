// Reliable transfer: drive send/recv until exactly N bytes have moved
use crate::error::{is_transient, TransferError};
use crate::traits::RawSocket;
use eterm_core::RetryPolicy;
use std::io::ErrorKind;
use std::thread;
use std::time::{Duration, Instant};

const WRITE_OP: &str = "write_all";
const READ_OP: &str = "read_all";

/// Optional whole-transfer deadline taken from `RetryPolicy::max_wait`.
struct Deadline {
    started: Instant,
    max_wait: Option<Duration>,
}

impl Deadline {
    fn start(policy: &RetryPolicy) -> Self {
        Deadline {
            started: Instant::now(),
            max_wait: policy.max_wait,
        }
    }

    fn check(&self, op: &'static str, transferred: usize, expected: usize) -> Result<(), TransferError> {
        if let Some(max_wait) = self.max_wait {
            let waited = self.started.elapsed();
            if waited >= max_wait {
                return Err(TransferError::TimedOut {
                    op,
                    waited,
                    transferred,
                    expected,
                });
            }
        }
        Ok(())
    }

    // Never sleep past the deadline
    fn clamp(&self, slice: Duration) -> Duration {
        match self.max_wait {
            Some(max_wait) => slice.min(max_wait.saturating_sub(self.started.elapsed())),
            None => slice,
        }
    }
}

/// Send every byte of `data`, or fail.
///
/// A full send buffer is not an error: the writer sleeps for
/// `policy.write_backoff` and retries the same suffix. It does not wait for
/// writability first. An empty `data` returns immediately without touching
/// the socket.
pub fn write_all<S>(socket: &mut S, data: &[u8], policy: &RetryPolicy) -> Result<(), TransferError>
where
    S: RawSocket + ?Sized,
{
    let deadline = Deadline::start(policy);
    let mut written = 0;

    while written < data.len() {
        match socket.send(&data[written..]) {
            Ok(0) => return Err(TransferError::PeerClosed { op: WRITE_OP }),
            Ok(n) => written += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(ref e) if is_transient(e) => {
                deadline.check(WRITE_OP, written, data.len())?;
                tracing::trace!(written, total = data.len(), "send would block, backing off");
                thread::sleep(deadline.clamp(policy.write_backoff));
            }
            Err(e) => return Err(TransferError::os(WRITE_OP, e)),
        }
    }

    Ok(())
}

/// Fill all of `buf` from the socket, or fail.
///
/// Every receive is preceded by a readiness wait of
/// `policy.read_poll_interval`; a timed-out wait just loops. Never consumes
/// more than `buf.len()` bytes, so anything extra stays queued in the kernel
/// for the next call.
pub fn read_all<S>(socket: &mut S, buf: &mut [u8], policy: &RetryPolicy) -> Result<(), TransferError>
where
    S: RawSocket + ?Sized,
{
    let deadline = Deadline::start(policy);
    let mut read = 0;

    while read < buf.len() {
        deadline.check(READ_OP, read, buf.len())?;

        if !socket.wait_readable(deadline.clamp(policy.read_poll_interval))? {
            tracing::trace!(read, total = buf.len(), "no data yet");
            continue;
        }

        match socket.recv(&mut buf[read..]) {
            Ok(0) => return Err(TransferError::PeerClosed { op: READ_OP }),
            Ok(n) => read += n,
            Err(ref e) if is_transient(e) => continue,
            Err(e) => return Err(TransferError::os(READ_OP, e)),
        }
    }

    Ok(())
}
