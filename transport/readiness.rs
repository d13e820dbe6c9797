// Readiness waiter: bounded wait for a socket to become readable
use crate::error::TransferError;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use std::io;
use std::os::fd::BorrowedFd;
use std::time::Duration;

/// Block until `fd` is readable or `timeout` elapses.
///
/// Returns `Ok(false)` on timeout and when the wait is interrupted by a
/// signal; callers are expected to loop. Hang-up and error conditions count
/// as readable so the next `recv` gets to observe and classify them.
/// Any other poll failure is returned as [`TransferError::Readiness`].
pub fn wait_on_socket_data(fd: BorrowedFd<'_>, timeout: Duration) -> Result<bool, TransferError> {
    let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
    let timeout = PollTimeout::try_from(timeout).unwrap_or(PollTimeout::MAX);

    tracing::trace!(?timeout, "before polling socket");
    match poll(&mut fds, timeout) {
        Ok(0) => Ok(false),
        Ok(_) => {
            let revents = fds[0].revents().unwrap_or_else(PollFlags::empty);
            if revents.contains(PollFlags::POLLNVAL) {
                return Err(TransferError::Readiness {
                    source: io::Error::from(Errno::EBADF),
                });
            }
            Ok(revents.intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR))
        }
        Err(Errno::EINTR) => Ok(false),
        Err(errno) => Err(TransferError::Readiness {
            source: io::Error::from(errno),
        }),
    }
}
