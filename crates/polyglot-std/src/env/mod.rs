use std::env;

mod in_memory;
mod system;

#[cfg(any(test, feature = "test-support"))]
pub use in_memory::InMemoryEnv;
pub use system::SystemEnv;

/// Read-only view of the process environment.
///
/// Implementations are not required to be `Send + Sync`; add those bounds
/// at the call site when a config is built inside a spawned task.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}
