use super::element;
use super::ids::{AtomId, BondId};
use super::molecule::Molecule;
use crate::core::attributes::Attributes;
use crate::core::utils::geometry;
use nalgebra::{Point3, Vector3};

/// One entry in an atom's adjacency list: the neighbor on the other end of
/// a bond, plus the bond itself. Both are non-owning arena keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyEntry {
    pub neighbor: AtomId,
    pub bond: BondId,
}

/// The operand of a distance computation.
///
/// This is a closed set: anything a distance can be measured against is an
/// atom, a raw point, or a whole molecule (minimum over its atoms).
#[derive(Debug, Clone, Copy)]
pub enum DistanceTarget<'a> {
    Atom(&'a Atom),
    Point(Point3<f64>),
    Molecule(&'a Molecule),
}

/// An atom in a molecule graph.
///
/// Identity is the string `id`, unique within the owning molecule. The
/// element symbol and atomic number are kept mutually consistent: setting
/// either recomputes the other from the periodic table, and an unknown
/// value clears its counterpart. The adjacency list is maintained by the
/// owning [`Molecule`] as bonds are attached and detached.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub(crate) id: String,
    /// Free-form atom name (e.g. "CA"), matched by `Molecule::atoms_by_name`.
    pub name: String,
    symbol: Option<String>,
    atomic_number: Option<u8>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Explicitly assigned mass, overriding the periodic-table weight.
    pub explicit_mass: Option<f64>,
    pub(crate) adjacency: Vec<AdjacencyEntry>,
    pub attrs: Attributes,
}

/// Conversion into an atom position, accepting the common coordinate shapes.
pub trait IntoPosition {
    fn into_position(self) -> Point3<f64>;
}

impl IntoPosition for Point3<f64> {
    fn into_position(self) -> Point3<f64> {
        self
    }
}

impl IntoPosition for (f64, f64, f64) {
    fn into_position(self) -> Point3<f64> {
        Point3::new(self.0, self.1, self.2)
    }
}

impl IntoPosition for [f64; 3] {
    fn into_position(self) -> Point3<f64> {
        Point3::from(self)
    }
}

impl IntoPosition for Vector3<f64> {
    fn into_position(self) -> Point3<f64> {
        Point3::from(self)
    }
}

impl Atom {
    /// Creates a detached atom with the given element symbol and position.
    ///
    /// The id is empty until the atom is added to a molecule, which assigns
    /// a sequential one unless the caller set an explicit id first.
    pub fn new(symbol: &str, position: impl IntoPosition) -> Self {
        let mut atom = Self {
            id: String::new(),
            name: String::new(),
            symbol: None,
            atomic_number: None,
            position: position.into_position(),
            explicit_mass: None,
            adjacency: Vec::new(),
            attrs: Attributes::new(),
        };
        atom.set_symbol(symbol);
        atom
    }

    /// The unique id of this atom within its molecule.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets an explicit id. Must happen before the atom is added to a
    /// molecule; the molecule validates uniqueness at add time.
    pub fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn atomic_number(&self) -> Option<u8> {
        self.atomic_number
    }

    /// Sets the element symbol, stripping embedded whitespace, and
    /// recomputes the atomic number. An unknown symbol leaves the atomic
    /// number unset.
    pub fn set_symbol(&mut self, symbol: &str) {
        let cleaned: String = symbol.chars().filter(|c| !c.is_whitespace()).collect();
        self.atomic_number = element::symbol_to_number(&cleaned);
        self.symbol = if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        };
    }

    /// Sets the atomic number and recomputes the symbol. An out-of-range
    /// number leaves the symbol unset.
    pub fn set_atomic_number(&mut self, z: u8) {
        self.atomic_number = Some(z);
        self.symbol = element::number_to_symbol(z).map(str::to_string);
    }

    /// Moves the atom, accepting a point, an `(x, y, z)` tuple, a
    /// 3-element array, or a vector.
    pub fn set_position(&mut self, position: impl IntoPosition) {
        self.position = position.into_position();
    }

    /// The atoms directly bonded to this one, optionally excluding one
    /// neighbor. An atom bonded twice to the same neighbor appears twice.
    pub fn neighbors(&self, exclude: Option<AtomId>) -> Vec<AtomId> {
        self.adjacency
            .iter()
            .filter(|entry| Some(entry.neighbor) != exclude)
            .map(|entry| entry.neighbor)
            .collect()
    }

    /// The bonds this atom participates in, optionally excluding those to
    /// one neighbor.
    pub fn bonds(&self, exclude: Option<AtomId>) -> Vec<BondId> {
        self.adjacency
            .iter()
            .filter(|entry| Some(entry.neighbor) != exclude)
            .map(|entry| entry.bond)
            .collect()
    }

    pub fn adjacency(&self) -> &[AdjacencyEntry] {
        &self.adjacency
    }

    /// The mass of this atom in daltons: the explicitly assigned mass if
    /// present, otherwise the periodic-table weight for its symbol.
    pub fn mass(&self) -> Option<f64> {
        self.explicit_mass
            .or_else(|| self.atomic_number.and_then(element::atomic_weight))
    }

    /// Distance from this atom to another atom, a raw point, or the
    /// nearest atom of a molecule.
    ///
    /// # Return
    ///
    /// Returns `None` only when the target is a molecule with no atoms.
    pub fn distance_to(&self, target: DistanceTarget<'_>) -> Option<f64> {
        match target {
            DistanceTarget::Atom(other) => {
                Some(geometry::distance(&self.position, &other.position))
            }
            DistanceTarget::Point(p) => Some(geometry::distance(&self.position, &p)),
            DistanceTarget::Molecule(mol) => {
                mol.closest_to_point(&self.position).map(|(d, _)| d)
            }
        }
    }

    pub(crate) fn add_adjacency(&mut self, neighbor: AtomId, bond: BondId) {
        self.adjacency.push(AdjacencyEntry { neighbor, bond });
    }

    pub(crate) fn remove_bond(&mut self, bond: BondId) {
        self.adjacency.retain(|entry| entry.bond != bond);
    }
}
