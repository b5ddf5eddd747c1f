//! Built-in source modules shipped with the binary.
//!
//! Each submodule assembles one `SourceModule`; the registry built
//! here is what `source`, `run`, and `list` operate on.

pub mod demo;
pub mod fsops;

use crate::core::error::ShellbindError;
use crate::core::registry::ModuleRegistry;

pub fn builtin_registry() -> Result<ModuleRegistry, ShellbindError> {
    let mut registry = ModuleRegistry::new();
    registry.register(demo::module()?)?;
    registry.register(fsops::module()?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_assembles() {
        let registry = builtin_registry().unwrap();
        assert!(registry.get("demo").is_ok());
        assert!(registry.get("fsops").is_ok());
    }
}
