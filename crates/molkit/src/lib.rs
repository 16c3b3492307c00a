//! # molkit
//!
//! A small object toolkit for representing molecules as graphs of atoms
//! and bonds, with pluggable text-format codecs and elementary 3D
//! geometry. It is a data-modeling library for computational-chemistry
//! scripting, not a simulation engine.
//!
//! ## Design
//!
//! - **[`core::models`]: The Graph.** A [`core::models::molecule::Molecule`]
//!   owns its atoms and bonds in arenas and is the only way to mutate
//!   them, keeping the id index and the bidirectional adjacency lists
//!   consistent under every add and delete.
//!
//! - **[`core::formula`]: The Mini-Language.** Element-count formulas
//!   parse into maps and render back through a printf-like template
//!   (`"%s%d{<sub>%d</sub>}"`), with alphabetical ordering by default and
//!   Hill ordering as a preset.
//!
//! - **[`core::io`]: The Boundary.** File formats are plugins behind one
//!   codec trait and a name-keyed registry; the formula language itself is
//!   the built-in codec.

pub mod core;

pub use crate::core::models::atom::{Atom, DistanceTarget};
pub use crate::core::models::bond::Bond;
pub use crate::core::models::ids::{AtomId, BondId};
pub use crate::core::models::molecule::{
    AtomSelector, BondSelector, Entity, Molecule, MoleculeError,
};
