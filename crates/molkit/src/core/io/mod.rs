//! Pluggable text codecs for molecules.
//!
//! Format plugins implement [`traits::MoleculeFormat`] and are dispatched
//! by name through a [`registry::FormatRegistry`]. The formula
//! mini-language ships as the built-in codec; structure-file formats are
//! external plugins layered on the same trait.

pub mod formula_format;
pub mod registry;
pub mod traits;
