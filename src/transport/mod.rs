//! Blocking HTTP transport with typed options.

pub mod error;
pub mod global;
pub mod option;
mod session;

pub use error::{ErrorCode, TransportError};
pub use global::global_init;
pub use option::{
    AlwaysOk, ErrorBufferHandle, TransportOption, WriteCallback, WriteTarget,
};
pub use session::{Session, Settings};
