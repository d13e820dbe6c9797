// Core module: retry policy, protocol constants and shared types (no socket I/O)
pub mod policy;
pub mod protocol;
pub mod types;
pub mod util;

pub use policy::*;
pub use protocol::*;
pub use types::*;
pub use util::*;
