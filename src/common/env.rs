//! Environment access behind a trait so handlers can be handed a fixed
//! set of variables in tests.

use std::env;

/// Looks up a single variable. Implementations are read on every call,
/// nothing is cached.
pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Delegates to the process environment.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[cfg(test)]
pub use in_memory::InMemoryEnv;
