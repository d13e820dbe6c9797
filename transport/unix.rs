// Unix socket transport: exact transfers over a (possibly non-blocking) UnixStream
use crate::error::{not_connected, TransferError};
use crate::fd::SocketFd;
use crate::reliable::{read_all, write_all};
use crate::traits::Transport;
use eterm_core::RetryPolicy;
use nix::sys::socket::{setsockopt, sockopt};
use std::io::Result;
use std::os::unix::net::UnixStream;
use std::os::fd::AsFd;

pub struct UnixSocketTransport {
    socket_path: String,
    stream: Option<UnixStream>,
    policy: RetryPolicy,
}

impl UnixSocketTransport {
    pub fn new(socket_path: &str) -> Self {
        UnixSocketTransport {
            socket_path: socket_path.to_string(),
            stream: None,
            policy: RetryPolicy::default(),
        }
    }

    /// Wrap an already connected stream (e.g. one half of `UnixStream::pair`).
    pub fn from_stream(stream: UnixStream) -> Self {
        UnixSocketTransport {
            socket_path: String::new(),
            stream: Some(stream),
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Enable non-blocking mode on the socket
    pub fn set_nonblocking(&mut self, nonblocking: bool) -> Result<()> {
        if let Some(ref stream) = self.stream {
            stream.set_nonblocking(nonblocking)?;
        }
        Ok(())
    }

    /// Set socket send buffer size (SO_SNDBUF)
    pub fn set_send_buffer_size(&self, size: usize) -> Result<()> {
        if let Some(ref stream) = self.stream {
            setsockopt(stream, sockopt::SndBuf, &size)?;
        }
        Ok(())
    }
}

impl Transport for UnixSocketTransport {
    fn send_all(&mut self, data: &[u8]) -> std::result::Result<(), TransferError> {
        match self.stream {
            Some(ref stream) => write_all(&mut SocketFd::new(stream.as_fd()), data, &self.policy),
            None => Err(not_connected("write_all")),
        }
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> std::result::Result<(), TransferError> {
        match self.stream {
            Some(ref stream) => read_all(&mut SocketFd::new(stream.as_fd()), buf, &self.policy),
            None => Err(not_connected("read_all")),
        }
    }

    fn connect(&mut self) -> Result<()> {
        let stream = UnixStream::connect(&self.socket_path)?;

        // Partial I/O and EAGAIN are absorbed by the exact-transfer loops
        stream.set_nonblocking(true)?;

        self.stream = Some(stream);

        // 64KB send buffer is plenty for terminal traffic
        let _ = self.set_send_buffer_size(65536);

        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.stream = None;
        Ok(())
    }
}
