//! Minimum-distance search between two molecules.

use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use crate::core::utils::geometry;

/// Finds the closest pair of atoms between two molecules.
///
/// Naive O(n*m) pairwise scan; there is deliberately no spatial index, so
/// this is not meant for very large structures.
///
/// # Return
///
/// Returns `(distance, atom_in_left, atom_in_right)`, or `None` when either
/// molecule has no atoms.
pub fn min_distance(left: &Molecule, right: &Molecule) -> Option<(f64, AtomId, AtomId)> {
    let mut best: Option<(f64, AtomId, AtomId)> = None;
    for (left_key, left_atom) in left.atoms_iter() {
        for (right_key, right_atom) in right.atoms_iter() {
            let d = geometry::distance(&left_atom.position, &right_atom.position);
            if best.is_none_or(|(current, _, _)| d < current) {
                best = Some((d, left_key, right_key));
            }
        }
    }
    best
}
