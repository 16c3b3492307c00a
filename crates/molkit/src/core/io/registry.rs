//! Name-based dispatch over the registered molecule codecs.

use super::formula_format::FormulaFormat;
use super::traits::{FormatError, MoleculeFormat, ReadOptions, WriteOptions};
use crate::core::models::molecule::Molecule;
use std::collections::HashMap;
use tracing::debug;

/// Maps format names to their codecs.
///
/// Built-in codecs are registered by [`FormatRegistry::default`]; plugins
/// add themselves with [`FormatRegistry::register`]. Registering a name
/// twice replaces the earlier codec.
pub struct FormatRegistry {
    codecs: HashMap<&'static str, Box<dyn MoleculeFormat>>,
}

impl FormatRegistry {
    /// An empty registry with no codecs at all.
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    pub fn register(&mut self, codec: Box<dyn MoleculeFormat>) {
        debug!(format = codec.name(), "registered molecule format");
        self.codecs.insert(codec.name(), codec);
    }

    pub fn get(&self, name: &str) -> Option<&dyn MoleculeFormat> {
        self.codecs.get(name).map(Box::as_ref)
    }

    /// The registered format names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.codecs.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Parses `text` with the named codec.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownFormat`] for an unregistered name, or
    /// the codec's own parse failure.
    pub fn parse(
        &self,
        format: &str,
        text: &str,
        options: &ReadOptions,
    ) -> Result<Molecule, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::UnknownFormat(format.to_string()))?
            .parse_molecule(text, options)
    }

    /// Renders `molecule` with the named codec.
    pub fn write(
        &self,
        format: &str,
        molecule: &Molecule,
        options: &WriteOptions,
    ) -> Result<String, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::UnknownFormat(format.to_string()))?
            .write_molecule(molecule, options)
    }
}

impl Default for FormatRegistry {
    /// A registry with the built-in codecs registered.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(FormulaFormat));
        registry
    }
}
