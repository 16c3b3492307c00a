//! # Core Module
//!
//! The building blocks of the toolkit: the molecule graph model, the
//! formula mini-language, graph algorithms, and the codec boundary.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, and the
//!   molecule graph container that owns them
//! - **Formula Codec** ([`formula`]) - The element-count mini-language,
//!   parsing and template-driven rendering
//! - **Graph Algorithms** ([`graph`]) - Connected-component separation and
//!   minimum-distance queries
//! - **File I/O Boundary** ([`io`]) - The trait and registry that text
//!   format plugins implement
//! - **Attributes** ([`attributes`]) - Open string-keyed property bags for
//!   plugin metadata
//! - **Geometry** ([`utils`]) - Distance, angle, and dihedral computations
//!
//! The molecule is the sole mutation authority for its graph: all adds and
//! deletes go through it so the id index and the reciprocal adjacency
//! lists never drift apart. Everything here is synchronous and
//! single-threaded; a molecule shared across threads needs external
//! locking.

pub mod attributes;
pub mod formula;
pub mod graph;
pub mod io;
pub mod models;
pub mod utils;
