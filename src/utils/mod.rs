// Utility functions
pub mod error;
pub mod html;

pub use error::*;
