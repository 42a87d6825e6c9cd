// Utility functions
pub mod error;
pub mod serde_format;

pub use error::*;
