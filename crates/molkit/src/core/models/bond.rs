use super::ids::AtomId;
use super::molecule::Molecule;
use crate::core::attributes::Attributes;
use crate::core::utils::geometry;

/// A bond between atoms of one molecule.
///
/// A bond holds non-owning arena keys to its participant atoms; it is
/// usually binary but arity 1 and 3+ are allowed (lone pairs, multi-center
/// bonds). The owning [`Molecule`] keeps every participant atom's adjacency
/// list reciprocal with this list when the bond is attached or detached.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub(crate) id: String,
    /// Bond order (1 single, 2 double, 1.5 aromatic, ...).
    pub order: f64,
    /// Free-form bond kind used by format plugins (e.g. "covalent").
    pub kind: String,
    pub(crate) atoms: Vec<AtomId>,
    pub attrs: Attributes,
}

impl Bond {
    /// Creates a detached bond over the given atoms with order 1.
    ///
    /// The atoms must already belong to the molecule the bond will be added
    /// to; `Molecule::add_bond` validates this and wires the reciprocal
    /// adjacency entries.
    pub fn new(atoms: &[AtomId]) -> Self {
        Self {
            id: String::new(),
            order: 1.0,
            kind: String::new(),
            atoms: atoms.to_vec(),
            attrs: Attributes::new(),
        }
    }

    pub fn with_order(atoms: &[AtomId], order: f64) -> Self {
        Self {
            order,
            ..Self::new(atoms)
        }
    }

    /// The unique id of this bond within its molecule.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets an explicit id. Must happen before the bond is added to a
    /// molecule; the molecule validates uniqueness at add time.
    pub fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    /// The participant atoms, in the order they were given.
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }

    /// Given one participant, the atoms on the other end(s) of this bond.
    pub fn others(&self, atom_id: AtomId) -> Vec<AtomId> {
        self.atoms
            .iter()
            .copied()
            .filter(|&a| a != atom_id)
            .collect()
    }

    /// The length of this bond: the distance between its two participant
    /// atoms. Bonds with any other arity have length `0.0` by convention,
    /// so printing code never has to special-case them.
    pub fn length(&self, molecule: &Molecule) -> f64 {
        match self.atoms.as_slice() {
            [a, b] => match (molecule.atom(*a), molecule.atom(*b)) {
                (Some(a), Some(b)) => geometry::distance(&a.position, &b.position),
                _ => 0.0,
            },
            _ => 0.0,
        }
    }
}
