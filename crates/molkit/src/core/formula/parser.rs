//! The basic formula grammar: a repeated sequence of
//! `ElementSymbol Count?` tokens, anchored at both ends.

use super::FormulaError;
use std::collections::BTreeMap;

/// Parses an element-count formula such as `"H2O"` or `"C2H5OH"`.
///
/// Each token is one uppercase letter, zero or more lowercase letters, and
/// an optional digit run (absent means 1). Repeated symbols accumulate:
/// `"OHH"` and `"H2O"` parse to the same map. Symbols are not checked
/// against the periodic table; `"Xy3"` is grammatically valid.
///
/// Condensed notation such as `"CH3CH3"` accumulates per symbol rather
/// than per group; structural grouping needs
/// [`super::condensed::parse_condensed_formula`].
///
/// # Errors
///
/// Returns [`FormulaError::InvalidFormula`] with the offending byte
/// position if the whole input does not match the repeated-token pattern;
/// the empty string is invalid.
pub fn parse_formula(text: &str) -> Result<BTreeMap<String, usize>, FormulaError> {
    let invalid = |position: usize| FormulaError::InvalidFormula {
        input: text.to_string(),
        position,
    };

    let mut counts = BTreeMap::new();
    let mut chars = text.char_indices().peekable();
    if chars.peek().is_none() {
        return Err(invalid(0));
    }

    while let Some(&(start, c)) = chars.peek() {
        if !c.is_ascii_uppercase() {
            return Err(invalid(start));
        }
        chars.next();
        let mut symbol = String::from(c);
        while let Some(&(_, c)) = chars.peek() {
            if c.is_ascii_lowercase() {
                symbol.push(c);
                chars.next();
            } else {
                break;
            }
        }

        let mut digits = String::new();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                chars.next();
            } else {
                break;
            }
        }
        let count = if digits.is_empty() {
            1
        } else {
            digits.parse::<usize>().map_err(|_| invalid(start))?
        };

        *counts.entry(symbol).or_insert(0) += count;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs
            .iter()
            .map(|&(s, n)| (s.to_string(), n))
            .collect()
    }

    #[test]
    fn water_parses_to_two_h_one_o() {
        assert_eq!(parse_formula("H2O").unwrap(), map(&[("H", 2), ("O", 1)]));
    }

    #[test]
    fn absent_count_means_one() {
        assert_eq!(
            parse_formula("CHCl3").unwrap(),
            map(&[("C", 1), ("H", 1), ("Cl", 3)])
        );
    }

    #[test]
    fn repeated_symbols_accumulate() {
        assert_eq!(parse_formula("OHH").unwrap(), map(&[("H", 2), ("O", 1)]));
        assert_eq!(
            parse_formula("CH3CH3").unwrap(),
            map(&[("C", 2), ("H", 6)])
        );
    }

    #[test]
    fn multi_letter_symbols_use_maximal_munch() {
        assert_eq!(
            parse_formula("NaCl").unwrap(),
            map(&[("Na", 1), ("Cl", 1)])
        );
        // "CO" is carbon + oxygen, "Co" is one cobalt.
        assert_eq!(parse_formula("CO").unwrap(), map(&[("C", 1), ("O", 1)]));
        assert_eq!(parse_formula("Co").unwrap(), map(&[("Co", 1)]));
    }

    #[test]
    fn unknown_symbols_are_grammatically_fine() {
        assert_eq!(parse_formula("Xy3").unwrap(), map(&[("Xy", 3)]));
    }

    #[test]
    fn rejects_anything_outside_the_token_grammar() {
        for bad in ["", "h2o", "H2O ", " H2O", "H-O-H", "2HO", "H2(O)", "H2o3"] {
            let result = parse_formula(bad);
            assert!(
                matches!(result, Err(FormulaError::InvalidFormula { .. })),
                "expected {bad:?} to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn error_reports_offending_position() {
        assert_eq!(
            parse_formula("H2-O"),
            Err(FormulaError::InvalidFormula {
                input: "H2-O".to_string(),
                position: 2
            })
        );
    }
}
