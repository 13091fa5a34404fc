/// Compiled-in modules, registered by name.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::builtin::ExampleModule;
use super::module::LogModule;

/// Name-to-module table that descriptors link against with `builtin = "<name>"`.
#[derive(Clone, Default)]
pub struct Registry {
    modules: BTreeMap<String, Arc<dyn LogModule>>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every module shipped in this binary.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("example", Arc::new(ExampleModule));
        registry
    }

    /// Register `module` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, module: Arc<dyn LogModule>) -> &mut Self {
        self.modules.insert(name.into(), module);
        self
    }

    /// Look up a module by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn LogModule>> {
        self.modules.get(name).cloned()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.modules.keys()).finish()
    }
}
