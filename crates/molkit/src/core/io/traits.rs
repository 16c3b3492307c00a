//! The codec interface between the molecule core and text-format plugins.

use crate::core::formula::FormulaError;
use crate::core::formula::writer::FormulaOrder;
use crate::core::models::molecule::{Molecule, MoleculeError};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Unknown format: '{0}'")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error in {format} input: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error(transparent)]
    Molecule(#[from] MoleculeError),

    #[error(transparent)]
    Formula(#[from] FormulaError),
}

/// Options a codec may consult while parsing.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Accept the condensed bracket/multiplier grammar where the codec
    /// distinguishes one (the formula codec does).
    pub condensed: bool,
}

/// Options a codec may consult while writing.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Formula template override; codecs fall back to their own default.
    pub template: Option<String>,
    /// Element ordering for formula rendering.
    pub order: FormulaOrder,
}

/// A text codec for molecules.
///
/// Each format plugin implements parsing text into a [`Molecule`] (built
/// incrementally through the molecule's own mutation API) and rendering a
/// molecule back to text. The provided path helpers wrap the string forms
/// with plain file I/O.
pub trait MoleculeFormat {
    /// The registered name of this format (e.g. `"formula"`).
    fn name(&self) -> &'static str;

    /// Parses `text` into a molecule.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] describing the first offending construct.
    fn parse_molecule(&self, text: &str, options: &ReadOptions) -> Result<Molecule, FormatError>;

    /// Renders `molecule` to text.
    fn write_molecule(
        &self,
        molecule: &Molecule,
        options: &WriteOptions,
    ) -> Result<String, FormatError>;

    /// Reads and parses a whole file.
    fn read_from_path<P: AsRef<Path>>(
        &self,
        path: P,
        options: &ReadOptions,
    ) -> Result<Molecule, FormatError>
    where
        Self: Sized,
    {
        let text = fs::read_to_string(path)?;
        self.parse_molecule(text.trim_end(), options)
    }

    /// Renders and writes a whole file.
    fn write_to_path<P: AsRef<Path>>(
        &self,
        molecule: &Molecule,
        path: P,
        options: &WriteOptions,
    ) -> Result<(), FormatError>
    where
        Self: Sized,
    {
        let text = self.write_molecule(molecule, options)?;
        fs::write(path, text)?;
        Ok(())
    }
}
