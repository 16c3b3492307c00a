use super::atom::{Atom, DistanceTarget};
use super::bond::Bond;
use super::ids::{AtomId, BondId};
use crate::core::attributes::Attributes;
use crate::core::utils::geometry;
use nalgebra::Point3;
use regex::Regex;
use slotmap::SlotMap;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by graph mutations and lookups.
#[derive(Debug, Error, PartialEq)]
pub enum MoleculeError {
    #[error("{what} not found: {selector}")]
    NotFound {
        what: &'static str,
        selector: String,
    },

    #[error("Duplicate id in molecule: '{id}'")]
    DuplicateId { id: String },

    #[error("Bond '{bond_id}' references an atom that is not in the molecule")]
    AtomNotPresent { bond_id: String },

    #[error("Invalid atom name pattern: {0}")]
    BadPattern(String),
}

/// A member of the molecule-wide id namespace: atoms and bonds share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Atom(AtomId),
    Bond(BondId),
}

/// Designates an atom for deletion or lookup: by unique id, by 1-based
/// position in the ordered sequence, or by arena key.
#[derive(Debug, Clone, Copy)]
pub enum AtomSelector<'a> {
    Id(&'a str),
    Index(usize),
    Key(AtomId),
}

/// Designates a bond the same three ways.
#[derive(Debug, Clone, Copy)]
pub enum BondSelector<'a> {
    Id(&'a str),
    Index(usize),
    Key(BondId),
}

/// A molecule: the owning container and sole mutation authority for a graph
/// of atoms and bonds.
///
/// Atoms and bonds live in arenas; every cross-reference (bond participants,
/// adjacency entries) is an arena key, never a pointer, so the cyclic
/// atom-bond-atom structure has a single owner and deep-copying is a plain
/// `clone()`. All mutations go through this type, which maintains:
///
/// - a molecule-wide id index shared by atoms and bonds,
/// - reciprocal adjacency: if a bond references an atom, that atom's
///   adjacency list has an entry for the bond and each other participant,
/// - the insertion-ordered sequences behind 1-based positional access.
///
/// Positional (1-based) indices are stable only until a deletion: deleting
/// an entry shifts every later position, so callers must not cache
/// positions across deletions. There is no internal locking; wrap the
/// molecule in a mutex for cross-thread mutation.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub id: String,
    pub name: String,
    atoms: SlotMap<AtomId, Atom>,
    bonds: SlotMap<BondId, Bond>,
    atom_order: Vec<AtomId>,
    bond_order: Vec<BondId>,
    id_index: HashMap<String, Entity>,
    next_atom_serial: usize,
    next_bond_serial: usize,
    pub attrs: Attributes,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::default()
        }
    }

    // ---- lookups ----

    /// O(1) lookup in the shared atom/bond id namespace.
    pub fn by_id(&self, id: &str) -> Option<Entity> {
        self.id_index.get(id).copied()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(id)
    }

    pub fn bond_mut(&mut self, id: BondId) -> Option<&mut Bond> {
        self.bonds.get_mut(id)
    }

    /// All atoms in insertion order. Position `i` here is 1-based index
    /// `i + 1` for the selector forms.
    pub fn atoms(&self) -> &[AtomId] {
        &self.atom_order
    }

    /// All bonds in insertion order.
    pub fn bonds(&self) -> &[BondId] {
        &self.bond_order
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order.iter().map(|&id| (id, &self.atoms[id]))
    }

    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bond_order.iter().map(|&id| (id, &self.bonds[id]))
    }

    pub fn atom_count(&self) -> usize {
        self.atom_order.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bond_order.len()
    }

    /// Selects atoms by 1-based positions, in the order requested.
    /// Repeated and non-contiguous positions are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::NotFound`] for position 0 or positions past
    /// the end of the sequence.
    pub fn select_atoms(&self, positions: &[usize]) -> Result<Vec<AtomId>, MoleculeError> {
        positions
            .iter()
            .map(|&p| {
                p.checked_sub(1)
                    .and_then(|i| self.atom_order.get(i).copied())
                    .ok_or(MoleculeError::NotFound {
                        what: "atom",
                        selector: format!("index {p}"),
                    })
            })
            .collect()
    }

    /// Selects bonds by 1-based positions; see [`Molecule::select_atoms`].
    pub fn select_bonds(&self, positions: &[usize]) -> Result<Vec<BondId>, MoleculeError> {
        positions
            .iter()
            .map(|&p| {
                p.checked_sub(1)
                    .and_then(|i| self.bond_order.get(i).copied())
                    .ok_or(MoleculeError::NotFound {
                        what: "bond",
                        selector: format!("index {p}"),
                    })
            })
            .collect()
    }

    /// All atoms whose `name` matches the pattern, in insertion order. The
    /// pattern is a fully-anchored regular expression: `"C."` matches "CA"
    /// but not "HCA1".
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::BadPattern`] when the pattern does not
    /// compile.
    pub fn atoms_by_name(&self, pattern: &str) -> Result<Vec<AtomId>, MoleculeError> {
        // The pattern must compile on its own: wrapped in the anchors, an
        // unbalanced pattern like `C)|(.*` would otherwise form a valid
        // but unanchored expression.
        Regex::new(pattern).map_err(|e| MoleculeError::BadPattern(e.to_string()))?;
        let re = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| MoleculeError::BadPattern(e.to_string()))?;
        Ok(self
            .atoms_iter()
            .filter(|(_, atom)| re.is_match(&atom.name))
            .map(|(id, _)| id)
            .collect())
    }

    /// The first atom whose `name` matches the fully-anchored pattern.
    pub fn first_atom_by_name(&self, pattern: &str) -> Result<Option<AtomId>, MoleculeError> {
        Ok(self.atoms_by_name(pattern)?.into_iter().next())
    }

    // ---- mutation ----

    /// Adds an atom, assigning a sequential id (`a1`, `a2`, ...) when the
    /// atom carries none.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::DuplicateId`] when the atom's explicit id is
    /// already taken by any atom or bond of this molecule.
    pub fn add_atom(&mut self, mut atom: Atom) -> Result<AtomId, MoleculeError> {
        if atom.id.is_empty() {
            atom.id = loop {
                self.next_atom_serial += 1;
                let candidate = format!("a{}", self.next_atom_serial);
                if !self.id_index.contains_key(&candidate) {
                    break candidate;
                }
            };
        } else if self.id_index.contains_key(&atom.id) {
            return Err(MoleculeError::DuplicateId { id: atom.id });
        }
        let string_id = atom.id.clone();
        let key = self.atoms.insert(atom);
        self.atom_order.push(key);
        self.id_index.insert(string_id.clone(), Entity::Atom(key));
        trace!(molecule = %self.id, atom = %string_id, "added atom");
        Ok(key)
    }

    /// Adds atoms one by one, stopping at the first failure. Atoms applied
    /// before the failing one remain in the molecule.
    pub fn add_atoms(
        &mut self,
        atoms: impl IntoIterator<Item = Atom>,
    ) -> Result<Vec<AtomId>, MoleculeError> {
        atoms.into_iter().map(|a| self.add_atom(a)).collect()
    }

    /// Constructs and adds an atom in one step.
    pub fn new_atom(
        &mut self,
        symbol: &str,
        position: impl super::atom::IntoPosition,
    ) -> Result<AtomId, MoleculeError> {
        self.add_atom(Atom::new(symbol, position))
    }

    /// Deletes an atom, cascading to every bond that references it.
    ///
    /// Positional indices obtained before the call are invalidated: the
    /// deletion splices the ordered sequence, shifting every later position
    /// down by one.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::NotFound`] when the selector does not
    /// resolve to an atom of this molecule.
    pub fn delete_atom(&mut self, selector: AtomSelector<'_>) -> Result<Atom, MoleculeError> {
        let key = self.resolve_atom(selector)?;

        // Cascade over the full bond list rather than the adjacency cache,
        // so bonds of arity 1 (which produce no adjacency entries) are
        // removed too.
        let doomed: Vec<BondId> = self
            .bond_order
            .iter()
            .copied()
            .filter(|&b| self.bonds[b].contains(key))
            .collect();
        for bond_key in doomed {
            self.delete_bond(BondSelector::Key(bond_key))?;
        }

        let atom = self.atoms.remove(key).expect("resolved atom must exist");
        self.id_index.remove(&atom.id);
        self.atom_order.retain(|&a| a != key);
        trace!(molecule = %self.id, atom = %atom.id, "deleted atom");
        Ok(atom)
    }

    /// Adds a bond, assigning a sequential id (`b1`, `b2`, ...) when the
    /// bond carries none, and wires the reciprocal adjacency entries into
    /// every participant atom.
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::AtomNotPresent`] if any participant atom is
    /// not in this molecule, and [`MoleculeError::DuplicateId`] on an id
    /// collision. Neither failure leaves a partially wired bond behind.
    pub fn add_bond(&mut self, mut bond: Bond) -> Result<BondId, MoleculeError> {
        if bond
            .atoms
            .iter()
            .any(|&a| !self.atoms.contains_key(a))
        {
            return Err(MoleculeError::AtomNotPresent {
                bond_id: bond.id.clone(),
            });
        }
        if bond.id.is_empty() {
            bond.id = loop {
                self.next_bond_serial += 1;
                let candidate = format!("b{}", self.next_bond_serial);
                if !self.id_index.contains_key(&candidate) {
                    break candidate;
                }
            };
        } else if self.id_index.contains_key(&bond.id) {
            return Err(MoleculeError::DuplicateId { id: bond.id });
        }
        let string_id = bond.id.clone();
        let participants = bond.atoms.clone();
        let key = self.bonds.insert(bond);
        self.bond_order.push(key);
        self.id_index.insert(string_id.clone(), Entity::Bond(key));

        for &atom_key in &participants {
            for &other in participants.iter().filter(|&&o| o != atom_key) {
                self.atoms[atom_key].add_adjacency(other, key);
            }
        }
        trace!(molecule = %self.id, bond = %string_id, "added bond");
        Ok(key)
    }

    /// Adds bonds one by one, stopping at the first failure; see
    /// [`Molecule::add_atoms`].
    pub fn add_bonds(
        &mut self,
        bonds: impl IntoIterator<Item = Bond>,
    ) -> Result<Vec<BondId>, MoleculeError> {
        bonds.into_iter().map(|b| self.add_bond(b)).collect()
    }

    /// Constructs and adds a bond of order 1 in one step.
    pub fn new_bond(&mut self, atoms: &[AtomId]) -> Result<BondId, MoleculeError> {
        self.add_bond(Bond::new(atoms))
    }

    /// Deletes a bond and drops it from every participant atom's adjacency
    /// list. Positional bond indices shift as with [`Molecule::delete_atom`].
    ///
    /// # Errors
    ///
    /// Returns [`MoleculeError::NotFound`] when the selector does not
    /// resolve to a bond of this molecule.
    pub fn delete_bond(&mut self, selector: BondSelector<'_>) -> Result<Bond, MoleculeError> {
        let key = self.resolve_bond(selector)?;
        let bond = self.bonds.remove(key).expect("resolved bond must exist");
        for &atom_key in &bond.atoms {
            if let Some(atom) = self.atoms.get_mut(atom_key) {
                atom.remove_bond(key);
            }
        }
        self.id_index.remove(&bond.id);
        self.bond_order.retain(|&b| b != key);
        trace!(molecule = %self.id, bond = %bond.id, "deleted bond");
        Ok(bond)
    }

    fn resolve_atom(&self, selector: AtomSelector<'_>) -> Result<AtomId, MoleculeError> {
        let missing = |selector: String| MoleculeError::NotFound {
            what: "atom",
            selector,
        };
        match selector {
            AtomSelector::Key(key) => self
                .atoms
                .contains_key(key)
                .then_some(key)
                .ok_or_else(|| missing(format!("{key:?}"))),
            AtomSelector::Index(p) => p
                .checked_sub(1)
                .and_then(|i| self.atom_order.get(i).copied())
                .ok_or_else(|| missing(format!("index {p}"))),
            AtomSelector::Id(id) => match self.by_id(id) {
                Some(Entity::Atom(key)) => Ok(key),
                _ => Err(missing(format!("id '{id}'"))),
            },
        }
    }

    fn resolve_bond(&self, selector: BondSelector<'_>) -> Result<BondId, MoleculeError> {
        let missing = |selector: String| MoleculeError::NotFound {
            what: "bond",
            selector,
        };
        match selector {
            BondSelector::Key(key) => self
                .bonds
                .contains_key(key)
                .then_some(key)
                .ok_or_else(|| missing(format!("{key:?}"))),
            BondSelector::Index(p) => p
                .checked_sub(1)
                .and_then(|i| self.bond_order.get(i).copied())
                .ok_or_else(|| missing(format!("index {p}"))),
            BondSelector::Id(id) => match self.by_id(id) {
                Some(Entity::Bond(key)) => Ok(key),
                _ => Err(missing(format!("id '{id}'"))),
            },
        }
    }

    // ---- combination ----

    /// Merges deep copies of another molecule's atoms and bonds into this
    /// one. The other molecule is never mutated; its entity ids are kept,
    /// so combining fails with [`MoleculeError::DuplicateId`] if any id is
    /// already taken here. Entities applied before a failure remain.
    pub fn combine(&mut self, other: &Molecule) -> Result<Vec<AtomId>, MoleculeError> {
        let mut key_map: HashMap<AtomId, AtomId> = HashMap::with_capacity(other.atom_count());
        let mut added = Vec::with_capacity(other.atom_count());
        for (old_key, atom) in other.atoms_iter() {
            let mut copy = atom.clone();
            copy.adjacency.clear(); // rewired below by add_bond
            let new_key = self.add_atom(copy)?;
            key_map.insert(old_key, new_key);
            added.push(new_key);
        }
        for (_, bond) in other.bonds_iter() {
            let mut copy = bond.clone();
            copy.atoms = bond.atoms.iter().map(|a| key_map[a]).collect();
            self.add_bond(copy)?;
        }
        debug!(
            molecule = %self.id,
            other = %other.id,
            atoms = added.len(),
            "combined molecules"
        );
        Ok(added)
    }

    /// Builds a fresh molecule combining copies of all the given ones.
    pub fn combine_all<'a>(
        molecules: impl IntoIterator<Item = &'a Molecule>,
    ) -> Result<Molecule, MoleculeError> {
        let mut combined = Molecule::new();
        for molecule in molecules {
            combined.combine(molecule)?;
        }
        Ok(combined)
    }

    /// Partitions this molecule into one new molecule per connected
    /// component; see [`crate::core::graph::connectivity::separate`].
    pub fn separate(&self) -> Vec<Molecule> {
        crate::core::graph::connectivity::separate(self)
    }

    // ---- measurement ----

    /// Minimum distance from any atom of this molecule to the target.
    /// O(n) against an atom or point and O(n*m) against a molecule; there
    /// is deliberately no spatial index, so this does not scale to very
    /// large structures.
    ///
    /// # Return
    ///
    /// Returns `None` when either side has no atoms.
    pub fn distance_to(&self, target: DistanceTarget<'_>) -> Option<f64> {
        match target {
            DistanceTarget::Point(p) => self.closest_to_point(&p).map(|(d, _)| d),
            DistanceTarget::Atom(other) => self.closest_to_point(&other.position).map(|(d, _)| d),
            DistanceTarget::Molecule(other) => {
                crate::core::graph::distance::min_distance(self, other).map(|(d, _, _)| d)
            }
        }
    }

    /// The closest pair of atoms between this molecule and another,
    /// with their separation.
    pub fn closest_pair(&self, other: &Molecule) -> Option<(f64, AtomId, AtomId)> {
        crate::core::graph::distance::min_distance(self, other)
    }

    /// The atom of this molecule closest to a point, with its distance.
    pub fn closest_to_point(&self, point: &Point3<f64>) -> Option<(f64, AtomId)> {
        self.atoms_iter()
            .map(|(id, atom)| (geometry::distance(&atom.position, point), id))
            .min_by(|(d1, _), (d2, _)| d1.total_cmp(d2))
    }

    /// Total mass in daltons. Atoms whose mass is unknown (unrecognized
    /// element, no explicit mass) contribute zero.
    pub fn mass(&self) -> f64 {
        self.atoms_iter()
            .filter_map(|(_, atom)| atom.mass())
            .sum()
    }

    /// Element symbol to atom count, one pass over the atoms. Atoms with
    /// no symbol are skipped.
    pub fn formula_hash(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, atom) in self.atoms_iter() {
            if let Some(symbol) = atom.symbol() {
                *counts.entry(symbol.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Renders the formula with the given template (default `"%s%d"`),
    /// elements in ascending alphabetical order of symbol.
    pub fn formula(&self, template: Option<&str>) -> String {
        crate::core::formula::writer::format_formula(
            &self.formula_hash(),
            template.unwrap_or(crate::core::formula::writer::DEFAULT_TEMPLATE),
        )
    }

    /// Builds a molecule with `count` bondless atoms per symbol of the
    /// parsed formula.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::formula::FormulaError`] when the text does
    /// not match the formula grammar.
    pub fn from_formula(text: &str) -> Result<Molecule, crate::core::formula::FormulaError> {
        let counts = crate::core::formula::parser::parse_formula(text)?;
        Ok(Self::from_counts(&counts))
    }

    /// Builds a molecule with `count` bondless atoms per symbol, atoms in
    /// map order at the origin.
    pub fn from_counts(counts: &BTreeMap<String, usize>) -> Molecule {
        let mut molecule = Molecule::new();
        for (symbol, count) in counts {
            for _ in 0..*count {
                molecule
                    .add_atom(Atom::new(symbol, (0.0, 0.0, 0.0)))
                    .expect("fresh molecule cannot have id collisions");
            }
        }
        molecule
    }
}
