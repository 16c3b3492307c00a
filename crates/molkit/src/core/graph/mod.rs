//! Graph algorithms over finished molecules: connected-component
//! decomposition and minimum-distance queries. Both are read-only
//! consumers of the molecule, except that separation constructs new
//! molecules for the parts.

pub mod connectivity;
pub mod distance;
