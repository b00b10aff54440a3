//! Utility and helper functions needed for:
//! - Error handling
//! - Type casting and ABI decoding
//! - Access checks

pub mod common;
pub mod error;
