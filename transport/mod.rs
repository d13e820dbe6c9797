// Transport module: readiness waiting, exact-count transfers and socket adapters
pub mod error;
pub mod fd;
pub mod readiness;
pub mod reliable;
pub mod tcp;
pub mod traits;
pub mod unix;

pub use error::TransferError;
pub use fd::SocketFd;
pub use readiness::wait_on_socket_data;
pub use reliable::{read_all, write_all};
pub use tcp::TcpTransport;
pub use traits::*;
pub use unix::UnixSocketTransport;
