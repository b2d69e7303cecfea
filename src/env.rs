//! Environment variable lookup abstraction
//!
//! Resolution reads the CI build number through the [Environment] trait rather
//! than the process environment directly, so callers and tests can supply
//! their own values.
//!
//! - [SystemEnvironment]: reads the real process environment
//! - [MockEnvironment]: an in-memory map for testing

use std::collections::HashMap;

/// Read-only environment variable lookup
pub trait Environment {
    /// Value of `name`, or `None` when unset or not valid unicode
    fn var(&self, name: &str) -> Option<String>;
}

/// Process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Mock environment for testing without touching process state
#[derive(Debug, Clone, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    /// Create an empty mock environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [MockEnvironment::set]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl Environment for MockEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}
