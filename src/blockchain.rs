// Thin re-export module: implementation is in `blockchain/core.rs`, split
// into block hashing, chain construction and validation.

pub mod core;
pub use core::*;
