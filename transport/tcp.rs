// TCP transport implementation
use crate::error::{not_connected, TransferError};
use crate::fd::SocketFd;
use crate::reliable::{read_all, write_all};
use crate::traits::Transport;
use eterm_core::{RetryPolicy, SocketEndpoint};
use std::io::Result;
use std::net::TcpStream;
use std::os::fd::AsFd;

pub struct TcpTransport {
    address: String,
    stream: Option<TcpStream>,
    policy: RetryPolicy,
}

impl TcpTransport {
    pub fn new(address: &str) -> Self {
        TcpTransport {
            address: address.to_string(),
            stream: None,
            policy: RetryPolicy::default(),
        }
    }

    pub fn for_endpoint(endpoint: &SocketEndpoint) -> Self {
        Self::new(&endpoint.to_string())
    }

    pub fn from_stream(stream: TcpStream) -> Self {
        let address = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_default();
        TcpTransport {
            address,
            stream: Some(stream),
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_nonblocking(&mut self, nonblocking: bool) -> Result<()> {
        if let Some(ref stream) = self.stream {
            stream.set_nonblocking(nonblocking)?;
        }
        Ok(())
    }
}

impl Transport for TcpTransport {
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
        let stream = TcpStream::connect(&self.address)?;
        // Terminal keystrokes are tiny; don't let Nagle sit on them
        stream.set_nodelay(true)?;
        self.stream = Some(stream);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.stream = None;
        Ok(())
    }
}
