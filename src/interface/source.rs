//! Where interface definitions come from.
//!
//! Validation works on already-extracted [`InterfaceDefinition`]s. Producing
//! them from platform source files (Swift, Kotlin, TypeScript) is left to
//! implementations of [`InterfaceSource`]; this crate ships only an in-memory
//! source, used by the CLI for JSON input and by tests.

use std::collections::BTreeMap;

use super::types::InterfaceDefinition;
use crate::error::{Error, Result};
use crate::platform::Platform;

/// Supplies the interface definition of a component on a platform.
///
/// A source-code backed implementation would locate the component's file
/// through [`crate::platform::PlatformConventions::file_path`] and extract
/// its public surface.
pub trait InterfaceSource: Send + Sync {
    /// Load the definition of `component` on `platform`.
    fn load(&self, platform: Platform, component: &str) -> Result<InterfaceDefinition>;
}

/// Definitions held in memory, keyed by component and platform.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    definitions: BTreeMap<(String, Platform), InterfaceDefinition>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from a list of definitions. Later entries win.
    pub fn from_definitions(definitions: impl IntoIterator<Item = InterfaceDefinition>) -> Self {
        definitions
            .into_iter()
            .fold(Self::new(), |source, def| source.with_definition(def))
    }

    /// Add a definition.
    pub fn with_definition(mut self, definition: InterfaceDefinition) -> Self {
        self.definitions
            .insert((definition.name.clone(), definition.platform), definition);
        self
    }

    /// Component names known to this source.
    pub fn components(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(|(n, _)| n.as_str()).collect();
        names.dedup();
        names
    }

    /// Platforms with a definition for `component`, in canonical order.
    pub fn platforms_for(&self, component: &str) -> Vec<Platform> {
        self.definitions
            .keys()
            .filter(|(name, _)| name == component)
            .map(|(_, platform)| *platform)
            .collect()
    }
}

impl InterfaceSource for InMemorySource {
    fn load(&self, platform: Platform, component: &str) -> Result<InterfaceDefinition> {
        self.definitions
            .get(&(component.to_string(), platform))
            .cloned()
            .ok_or_else(|| {
                Error::Config(format!(
                    "no definition of '{}' for platform {}",
                    component, platform
                ))
            })
    }
}
