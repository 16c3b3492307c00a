//! # Core Models Module
//!
//! The data structures representing a molecule as a graph of atoms and
//! bonds.
//!
//! ## Overview
//!
//! Atoms and bonds live in arenas owned by their [`molecule::Molecule`];
//! every cross-reference between them is an arena key from [`ids`], so the
//! inherently cyclic atom-bond-atom structure has a single owner, deep
//! copies are plain clones, and no reference counting or lifetime tricks
//! are involved.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom representation: element identity,
//!   coordinates, adjacency
//! - [`bond`] - Bonds as ordered lists of participant atoms with an order
//! - [`molecule`] - The owning graph container and its mutation API
//! - [`element`] - Static periodic-table lookups
//! - [`ids`] - Arena key types for atoms and bonds

pub mod atom;
pub mod bond;
pub mod element;
pub mod ids;
pub mod molecule;
