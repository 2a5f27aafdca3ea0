// Thin re-export module: implementation is in `blockchain/core.rs` so the
// header/Merkle code, the genesis builder and its self-checks stay separate.

pub mod core;
pub use core::*;
