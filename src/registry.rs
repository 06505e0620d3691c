//! Extraction-module registry
//!
//! Maps module names to [`ExtractionModule`] implementations. The registry
//! is populated up front; a schema field selecting an unregistered name
//! fails with a type error instead of attempting any dynamic loading.

use std::collections::HashMap;

use crate::error::{ParseError, Result};
use crate::extract::{ExtractionModule, RegexExtract};
use crate::schema::DEFAULT_MODULE;

/// Name-keyed registry of extraction modules.
///
/// Always contains the default regex module under [`DEFAULT_MODULE`].
pub struct ModuleRegistry {
    modules: HashMap<String, Box<dyn ExtractionModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            modules: HashMap::new(),
        };
        registry.register(DEFAULT_MODULE, Box::new(RegexExtract));
        registry
    }

    /// Register a module under `name`, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, module: Box<dyn ExtractionModule>) {
        self.modules.insert(name.into(), module);
    }

    /// Resolve a module by the name a schema field selected. `None` selects
    /// the default module; unknown names fail with
    /// [`ParseError::UnknownModule`] naming the field key.
    pub fn get(&self, name: Option<&str>, key: &str) -> Result<&dyn ExtractionModule> {
        let name = name.unwrap_or(DEFAULT_MODULE);
        self.modules
            .get(name)
            .map(|module| module.as_ref())
            .ok_or_else(|| ParseError::UnknownModule {
                key: key.to_string(),
                name: name.to_string(),
            })
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
