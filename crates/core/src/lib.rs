// binlaunch Core - Domain Logic & Ports
// NO infrastructure dependencies (process spawning and filesystem lookups live in infra-system)

pub mod application;
pub mod constants;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{OutputDecodeError, Result, ShimError};
