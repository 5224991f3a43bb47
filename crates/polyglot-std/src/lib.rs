//! Thin abstractions over `std` process state for the polyglot services.
//!
//! Configuration is read through the [`ReadEnv`] trait so the parsing code
//! can be exercised against [`InMemoryEnv`] without mutating the real
//! process environment (which is global and would make tests order
//! dependent).
//!
//! | Concern  | Trait       | Production    | Test            |
//! |----------|-------------|---------------|-----------------|
//! | Env vars | [`ReadEnv`] | [`SystemEnv`] | [`InMemoryEnv`]*|
//!
//! *Available with `#[cfg(test)]` or the `"test-support"` feature.

pub mod env;

pub use env::{ReadEnv, SystemEnv};
#[cfg(any(test, feature = "test-support"))]
pub use env::InMemoryEnv;
