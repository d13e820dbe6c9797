// Protocol-wide constants shared by the session layers built on this transport
use std::time::Duration;

// The wire protocol version spoken by this build
pub const PROTOCOL_VERSION: u32 = 6;

// Nonce prefixes used by the crypto layer, one per direction
pub const CLIENT_SERVER_NONCE_MSB: u8 = 0;
pub const SERVER_CLIENT_NONCE_MSB: u8 = 1;

// Keepalive intervals. The server side must be at least double the client
// side so a single lost keepalive does not drop the session.
pub const CLIENT_KEEP_ALIVE_DURATION: Duration = Duration::from_secs(5);
pub const SERVER_KEEP_ALIVE_DURATION: Duration = Duration::from_secs(11);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_keepalive_outlasts_two_client_intervals() {
        assert!(SERVER_KEEP_ALIVE_DURATION >= CLIENT_KEEP_ALIVE_DURATION * 2);
    }

    #[test]
    fn nonce_prefixes_differ() {
        assert_ne!(CLIENT_SERVER_NONCE_MSB, SERVER_CLIENT_NONCE_MSB);
    }
}
