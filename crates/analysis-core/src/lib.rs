pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::*;
pub use error::*;
pub use format::*;
pub use types::*;
