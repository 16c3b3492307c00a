//! Connected-component decomposition of a molecule graph.

use crate::core::models::ids::AtomId;
use crate::core::models::molecule::Molecule;
use slotmap::SecondaryMap;
use tracing::debug;

/// Partitions a molecule into one new molecule per connected component.
///
/// Components are discovered by depth-first flood fill over the adjacency
/// lists, O(atoms + bonds). Each part receives copies of its atoms and
/// bonds, preserving their relative insertion order and entity ids; the
/// input molecule is left untouched. An atom with no bonds forms a
/// component of its own. Part ids are derived from the parent id
/// (`"<id>-1"`, `"<id>-2"`, ...).
pub fn separate(molecule: &Molecule) -> Vec<Molecule> {
    let mut component: SecondaryMap<AtomId, usize> = SecondaryMap::new();
    let mut component_count = 0;

    for &start in molecule.atoms() {
        if component.contains_key(start) {
            continue;
        }
        let mut stack = vec![start];
        component.insert(start, component_count);
        while let Some(atom_key) = stack.pop() {
            let atom = molecule.atom(atom_key).expect("ordered atom must exist");
            for entry in atom.adjacency() {
                if !component.contains_key(entry.neighbor) {
                    component.insert(entry.neighbor, component_count);
                    stack.push(entry.neighbor);
                }
            }
        }
        component_count += 1;
    }

    let mut parts: Vec<Molecule> = (0..component_count)
        .map(|i| {
            let mut part = Molecule::new();
            part.id = if molecule.id.is_empty() {
                format!("part-{}", i + 1)
            } else {
                format!("{}-{}", molecule.id, i + 1)
            };
            part.name = molecule.name.clone();
            part
        })
        .collect();

    let mut key_map: SecondaryMap<AtomId, AtomId> = SecondaryMap::new();
    for (old_key, atom) in molecule.atoms_iter() {
        let part = &mut parts[component[old_key]];
        let mut copy = atom.clone();
        copy.adjacency.clear(); // rewired by add_bond below
        let new_key = part
            .add_atom(copy)
            .expect("ids unique in parent stay unique per part");
        key_map.insert(old_key, new_key);
    }
    for (_, bond) in molecule.bonds_iter() {
        // A bond belongs to the component of its participants; they all
        // share one by construction of the flood fill.
        let Some(&first) = bond.atoms().first() else {
            continue;
        };
        let part = &mut parts[component[first]];
        let mut copy = bond.clone();
        copy.atoms = bond.atoms().iter().map(|&a| key_map[a]).collect();
        part.add_bond(copy)
            .expect("participants were copied into the same part");
    }

    debug!(
        molecule = %molecule.id,
        components = component_count,
        "separated molecule"
    );
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::molecule::BondSelector;
    use std::collections::BTreeMap;

    fn two_fragment_molecule() -> Molecule {
        let mut mol = Molecule::with_id("mix");
        let o = mol.new_atom("O", (0.0, 0.0, 0.0)).unwrap();
        let h1 = mol.new_atom("H", (1.0, 0.0, 0.0)).unwrap();
        mol.new_bond(&[o, h1]).unwrap();
        // A lone helium far away.
        mol.new_atom("He", (50.0, 0.0, 0.0)).unwrap();
        mol
    }

    #[test]
    fn connected_molecule_yields_one_part() {
        let mut mol = Molecule::with_id("water");
        let o = mol.new_atom("O", (0.0, 0.0, 0.0)).unwrap();
        let h1 = mol.new_atom("H", (1.0, 0.0, 0.0)).unwrap();
        let h2 = mol.new_atom("H", (-1.0, 0.0, 0.0)).unwrap();
        mol.new_bond(&[o, h1]).unwrap();
        mol.new_bond(&[o, h2]).unwrap();

        let parts = separate(&mol);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].id, "water-1");
        assert_eq!(parts[0].atom_count(), 3);
        assert_eq!(parts[0].bond_count(), 2);
    }

    #[test]
    fn empty_molecule_yields_no_parts() {
        assert!(separate(&Molecule::new()).is_empty());
    }

    #[test]
    fn isolated_atoms_become_singleton_parts() {
        let parts = separate(&two_fragment_molecule());
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].atom_count(), 2);
        assert_eq!(parts[0].bond_count(), 1);
        assert_eq!(parts[1].atom_count(), 1);
        assert_eq!(parts[1].bond_count(), 0);
    }

    #[test]
    fn parts_partition_atoms_with_no_overlap() {
        let mol = two_fragment_molecule();
        let parts = separate(&mol);

        let mut seen: Vec<String> = parts
            .iter()
            .flat_map(|p| p.atoms_iter().map(|(_, a)| a.id().to_string()))
            .collect();
        seen.sort();
        let mut expected: Vec<String> = mol
            .atoms_iter()
            .map(|(_, a)| a.id().to_string())
            .collect();
        expected.sort();
        assert_eq!(seen, expected);
        assert_eq!(mol.atom_count(), 4, "input must be untouched");
    }

    #[test]
    fn ethane_without_cc_bond_separates_into_two_methyls() {
        let mut mol = Molecule::with_id("ethane");
        let c1 = mol.new_atom("C", (0.0, 0.0, 0.0)).unwrap();
        let c2 = mol.new_atom("C", (1.54, 0.0, 0.0)).unwrap();
        let cc = mol.new_bond(&[c1, c2]).unwrap();
        for i in 0..3 {
            let h = mol.new_atom("H", (-0.5, i as f64, 0.0)).unwrap();
            mol.new_bond(&[c1, h]).unwrap();
            let h = mol.new_atom("H", (2.0, i as f64, 0.0)).unwrap();
            mol.new_bond(&[c2, h]).unwrap();
        }

        mol.delete_bond(BondSelector::Key(cc)).unwrap();
        let parts = separate(&mol);
        assert_eq!(parts.len(), 2);
        for part in &parts {
            let counts = part.formula_hash();
            let mut expected = BTreeMap::new();
            expected.insert("C".to_string(), 1);
            expected.insert("H".to_string(), 3);
            assert_eq!(counts, expected);
            assert_eq!(part.bond_count(), 3);
        }
    }

    #[test]
    fn combine_then_separate_is_idempotent() {
        let parts = separate(&two_fragment_molecule());
        let recombined = Molecule::combine_all(parts.iter()).unwrap();
        let reparts = separate(&recombined);

        assert_eq!(reparts.len(), parts.len());
        for (a, b) in parts.iter().zip(&reparts) {
            assert_eq!(a.formula_hash(), b.formula_hash());
            assert_eq!(a.bond_count(), b.bond_count());
        }
    }
}
