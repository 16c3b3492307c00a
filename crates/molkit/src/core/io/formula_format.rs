//! The formula mini-language registered as a molecule codec.
//!
//! Parsing builds a bondless molecule with the parsed atom counts, which
//! makes a formula string a quick molecule-construction shortcut; writing
//! renders the molecule's formula through the template language.

use super::traits::{FormatError, MoleculeFormat, ReadOptions, WriteOptions};
use crate::core::formula::writer::{self, DEFAULT_TEMPLATE};
use crate::core::formula::{condensed, parser};
use crate::core::models::molecule::Molecule;

pub struct FormulaFormat;

impl MoleculeFormat for FormulaFormat {
    fn name(&self) -> &'static str {
        "formula"
    }

    fn parse_molecule(&self, text: &str, options: &ReadOptions) -> Result<Molecule, FormatError> {
        let counts = if options.condensed {
            condensed::parse_condensed_formula(text)?
        } else {
            parser::parse_formula(text)?
        };
        let mut molecule = Molecule::from_counts(&counts);
        molecule.name = text.to_string();
        Ok(molecule)
    }

    fn write_molecule(
        &self,
        molecule: &Molecule,
        options: &WriteOptions,
    ) -> Result<String, FormatError> {
        let template = options.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        Ok(writer::format_formula_with(
            &molecule.formula_hash(),
            template,
            options.order,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formula::writer::FormulaOrder;

    #[test]
    fn parse_builds_bondless_atoms_and_keeps_source_as_name() {
        let mol = FormulaFormat
            .parse_molecule("C2H6", &ReadOptions::default())
            .unwrap();
        assert_eq!(mol.atom_count(), 8);
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(mol.name, "C2H6");
    }

    #[test]
    fn condensed_option_switches_grammar() {
        let strict = FormulaFormat.parse_molecule("Mg(OH)2", &ReadOptions::default());
        assert!(strict.is_err());

        let condensed = FormulaFormat
            .parse_molecule(
                "Mg(OH)2",
                &ReadOptions {
                    condensed: true,
                },
            )
            .unwrap();
        assert_eq!(condensed.atom_count(), 5);
    }

    #[test]
    fn write_round_trips_the_element_counts() {
        let mol = FormulaFormat
            .parse_molecule("H2O", &ReadOptions::default())
            .unwrap();
        let text = FormulaFormat
            .write_molecule(&mol, &WriteOptions::default())
            .unwrap();
        assert_eq!(text, "H2O");

        let reparsed = FormulaFormat
            .parse_molecule(&text, &ReadOptions::default())
            .unwrap();
        assert_eq!(reparsed.formula_hash(), mol.formula_hash());
    }

    #[test]
    fn write_honors_template_and_order_overrides() {
        let mol = FormulaFormat
            .parse_molecule("CH4O", &ReadOptions::default())
            .unwrap();
        let html = FormulaFormat
            .write_molecule(
                &mol,
                &WriteOptions {
                    template: Some("%s%d{<sub>%d</sub>}".to_string()),
                    order: FormulaOrder::Alphabetical,
                },
            )
            .unwrap();
        assert_eq!(html, "CH<sub>4</sub>O");
    }

    #[test]
    fn path_helpers_round_trip_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.formula");

        let mol = FormulaFormat
            .parse_molecule("H2O", &ReadOptions::default())
            .unwrap();
        FormulaFormat
            .write_to_path(&mol, &path, &WriteOptions::default())
            .unwrap();

        let read_back = FormulaFormat
            .read_from_path(&path, &ReadOptions::default())
            .unwrap();
        assert_eq!(read_back.formula_hash(), mol.formula_hash());
    }
}
