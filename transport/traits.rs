// Transport abstractions - the syscall seam and the connected-transport API
use crate::error::TransferError;
use std::io::Result;
use std::time::Duration;

/// One attempt at each low-level socket operation.
///
/// Implementations report exactly what the OS said: a partial count, `Ok(0)`
/// on orderly shutdown, or the raw error (would-block included). The retry
/// discipline lives in [`crate::write_all`] and [`crate::read_all`].
pub trait RawSocket {
    fn send(&mut self, data: &[u8]) -> Result<usize>;
    fn recv(&mut self, buf: &mut [u8]) -> Result<usize>;
    /// Wait up to `timeout` for pending input; `Ok(false)` means not yet.
    fn wait_readable(&mut self, timeout: Duration) -> std::result::Result<bool, TransferError>;
}

impl<S: RawSocket + ?Sized> RawSocket for &mut S {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        (**self).send(data)
    }

    fn recv(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).recv(buf)
    }

    fn wait_readable(&mut self, timeout: Duration) -> std::result::Result<bool, TransferError> {
        (**self).wait_readable(timeout)
    }
}

/// A connectable endpoint offering the exact-transfer contract.
pub trait Transport: Send {
    fn send_all(&mut self, data: &[u8]) -> std::result::Result<(), TransferError>;
    fn recv_exact(&mut self, buf: &mut [u8]) -> std::result::Result<(), TransferError>;
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;
}
