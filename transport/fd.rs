// Raw descriptor socket: one send(2)/recv(2)/poll(2) per call, no retries
use crate::error::TransferError;
use crate::readiness::wait_on_socket_data;
use crate::traits::RawSocket;
use nix::sys::socket::{recv, send, MsgFlags};
use std::io::Result;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};
use std::time::Duration;

// A closed peer must surface as EPIPE, not as a SIGPIPE that kills the process
#[cfg(any(target_os = "linux", target_os = "android"))]
const SEND_FLAGS: MsgFlags = MsgFlags::MSG_NOSIGNAL;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const SEND_FLAGS: MsgFlags = MsgFlags::empty();

/// Borrowed view of a connected stream socket.
///
/// The caller keeps ownership of the descriptor; this type never opens,
/// duplicates or closes it.
#[derive(Debug, Clone, Copy)]
pub struct SocketFd<'fd> {
    fd: BorrowedFd<'fd>,
}

impl<'fd> SocketFd<'fd> {
    pub fn new(fd: BorrowedFd<'fd>) -> Self {
        SocketFd { fd }
    }
}

impl AsFd for SocketFd<'_> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd
    }
}

impl RawSocket for SocketFd<'_> {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        Ok(send(self.fd.as_raw_fd(), data, SEND_FLAGS)?)
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(recv(self.fd.as_raw_fd(), buf, MsgFlags::empty())?)
    }

    fn wait_readable(&mut self, timeout: Duration) -> std::result::Result<bool, TransferError> {
        wait_on_socket_data(self.fd, timeout)
    }
}
