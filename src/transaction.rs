//! Transaction module split into types and payload reconstruction

pub mod types;

pub use types::*;
