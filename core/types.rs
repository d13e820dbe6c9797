// Core types used across all eterm components
use std::fmt;

/// Where a session endpoint lives. Either part may be missing, e.g. a Unix
/// socket has a name but no port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SocketEndpoint {
    pub name: Option<String>,
    pub port: Option<u16>,
}

impl SocketEndpoint {
    pub fn new(name: &str, port: u16) -> Self {
        SocketEndpoint {
            name: Some(name.to_string()),
            port: Some(port),
        }
    }

    pub fn named(name: &str) -> Self {
        SocketEndpoint {
            name: Some(name.to_string()),
            port: None,
        }
    }

    pub fn port_only(port: u16) -> Self {
        SocketEndpoint {
            name: None,
            port: Some(port),
        }
    }
}

impl fmt::Display for SocketEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref name) = self.name {
            write!(f, "{}", name)?;
        }
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_name_and_port() {
        assert_eq!(SocketEndpoint::new("localhost", 2022).to_string(), "localhost:2022");
        assert_eq!(SocketEndpoint::named("/tmp/etserver.sock").to_string(), "/tmp/etserver.sock");
        assert_eq!(SocketEndpoint::port_only(2022).to_string(), ":2022");
        assert_eq!(SocketEndpoint::default().to_string(), "");
    }
}
