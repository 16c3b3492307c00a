//! The extended, condensed formula grammar: bracket groups, group
//! abbreviations, and multipliers.
//!
//! This is a separate entry point; [`super::parser::parse_formula`] keeps
//! the guaranteed basic contract. The condensed grammar is
//!
//! ```text
//! seq   := group+
//! group := count? unit count?
//! unit  := symbol | '[' seq ']' | '(' seq ')'
//! ```
//!
//! where a leading and a trailing count both multiply the unit
//! (`"1[Ph(Me)3]2"` multiplies by 1 and then 2). A `symbol` token is first
//! matched against the periodic table; unknown symbols are then looked up
//! in a small table of group abbreviations (Me, Et, Bu, Ph, Bn) and
//! expanded to their element counts. A token that is neither is kept as a
//! literal symbol, matching the basic grammar's tolerance of unknown
//! elements.

use super::FormulaError;
use crate::core::models::element;
use phf::{Map, phf_map};
use std::collections::BTreeMap;

/// Common organic group abbreviations and their element counts.
static GROUP_ABBREVIATIONS: Map<&'static str, &'static [(&'static str, usize)]> = phf_map! {
    "Me" => &[("C", 1), ("H", 3)],
    "Et" => &[("C", 2), ("H", 5)],
    "Bu" => &[("C", 4), ("H", 9)],
    "Ph" => &[("C", 6), ("H", 5)],
    "Bn" => &[("C", 7), ("H", 7)],
};

/// Parses a condensed formula such as `"1[Ph(Me)3]2"` or `"Mg(OH)2"` into
/// an element-count map.
///
/// # Errors
///
/// Returns [`FormulaError::InvalidFormula`] with the offending byte
/// position on stray characters, unbalanced brackets, or empty input.
pub fn parse_condensed_formula(text: &str) -> Result<BTreeMap<String, usize>, FormulaError> {
    let mut parser = Parser {
        input: text,
        bytes: text.as_bytes(),
        pos: 0,
    };
    let counts = parser.parse_seq()?;
    if parser.pos != parser.bytes.len() || counts.is_empty() {
        return Err(parser.invalid());
    }
    Ok(counts)
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn invalid(&self) -> FormulaError {
        FormulaError::InvalidFormula {
            input: self.input.to_string(),
            position: self.pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Parses groups until a closing bracket or the end of input.
    fn parse_seq(&mut self) -> Result<BTreeMap<String, usize>, FormulaError> {
        let mut counts = BTreeMap::new();
        loop {
            match self.peek() {
                None | Some(b']') | Some(b')') => return Ok(counts),
                _ => {
                    let group = self.parse_group()?;
                    for (symbol, count) in group {
                        *counts.entry(symbol).or_insert(0) += count;
                    }
                }
            }
        }
    }

    fn parse_group(&mut self) -> Result<BTreeMap<String, usize>, FormulaError> {
        let leading = self.parse_count()?;
        let mut unit = match self.peek() {
            Some(b'[') => self.parse_bracketed(b'[', b']')?,
            Some(b'(') => self.parse_bracketed(b'(', b')')?,
            Some(c) if c.is_ascii_uppercase() => self.parse_symbol()?,
            _ => return Err(self.invalid()),
        };
        let trailing = self.parse_count()?;

        let factor = leading
            .unwrap_or(1)
            .checked_mul(trailing.unwrap_or(1))
            .ok_or_else(|| self.invalid())?;
        if factor != 1 {
            for count in unit.values_mut() {
                *count = count.checked_mul(factor).ok_or_else(|| self.invalid())?;
            }
        }
        Ok(unit)
    }

    fn parse_bracketed(
        &mut self,
        open: u8,
        close: u8,
    ) -> Result<BTreeMap<String, usize>, FormulaError> {
        debug_assert_eq!(self.peek(), Some(open));
        self.pos += 1;
        let counts = self.parse_seq()?;
        if self.peek() != Some(close) {
            return Err(self.invalid());
        }
        self.pos += 1;
        Ok(counts)
    }

    fn parse_symbol(&mut self) -> Result<BTreeMap<String, usize>, FormulaError> {
        let start = self.pos;
        self.pos += 1; // the uppercase letter
        while matches!(self.peek(), Some(c) if c.is_ascii_lowercase()) {
            self.pos += 1;
        }
        let word = &self.input[start..self.pos];

        let mut counts = BTreeMap::new();
        if element::symbol_to_number(word).is_some() {
            counts.insert(word.to_string(), 1);
        } else if let Some(expansion) = GROUP_ABBREVIATIONS.get(word) {
            for &(symbol, count) in expansion.iter() {
                *counts.entry(symbol.to_string()).or_insert(0) += count;
            }
        } else {
            // Unknown symbols pass through, as in the basic grammar.
            counts.insert(word.to_string(), 1);
        }
        Ok(counts)
    }

    /// Parses an optional digit run. A run too large for `usize` is an
    /// error, not an absent count.
    fn parse_count(&mut self) -> Result<Option<usize>, FormulaError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(None);
        }
        match self.input[start..self.pos].parse() {
            Ok(count) => Ok(Some(count)),
            Err(_) => Err(FormulaError::InvalidFormula {
                input: self.input.to_string(),
                position: start,
            }),
        }
    }
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
    fn plain_formulas_still_parse() {
        assert_eq!(
            parse_condensed_formula("H2O").unwrap(),
            map(&[("H", 2), ("O", 1)])
        );
    }

    #[test]
    fn parenthesized_groups_multiply() {
        assert_eq!(
            parse_condensed_formula("Mg(OH)2").unwrap(),
            map(&[("Mg", 1), ("O", 2), ("H", 2)])
        );
        assert_eq!(
            parse_condensed_formula("Ca3(PO4)2").unwrap(),
            map(&[("Ca", 3), ("P", 2), ("O", 8)])
        );
    }

    #[test]
    fn nested_multiplier_groups_with_abbreviations() {
        // Phenyl with three methyls, doubled.
        assert_eq!(
            parse_condensed_formula("1[Ph(Me)3]2").unwrap(),
            map(&[("C", 18), ("H", 28)])
        );
    }

    #[test]
    fn leading_and_trailing_counts_both_multiply() {
        assert_eq!(
            parse_condensed_formula("2(CH2)3").unwrap(),
            map(&[("C", 6), ("H", 12)])
        );
    }

    #[test]
    fn element_symbols_shadow_abbreviations() {
        // Pr is praseodymium, not propyl: the periodic table wins.
        assert_eq!(parse_condensed_formula("Pr").unwrap(), map(&[("Pr", 1)]));
        // Me is not an element, so the group table applies.
        assert_eq!(
            parse_condensed_formula("Me").unwrap(),
            map(&[("C", 1), ("H", 3)])
        );
    }

    #[test]
    fn overflowing_counts_are_errors_not_absent_counts() {
        // One past usize::MAX; the basic grammar rejects this too.
        let result = parse_condensed_formula("C18446744073709551616");
        assert!(
            matches!(result, Err(FormulaError::InvalidFormula { .. })),
            "expected overflow rejection, got {result:?}"
        );
        // Each factor fits on its own; their product does not.
        assert!(
            parse_condensed_formula("9999999999999999999(CH)9999999999999999999").is_err()
        );
        // Neither does a unit count times its multiplier.
        assert!(parse_condensed_formula("3(C9223372036854775807)").is_err());
    }

    #[test]
    fn rejects_unbalanced_and_stray_input() {
        for bad in ["", "(", "(OH", "OH)", "[OH)", "H2O!", "2", "()"] {
            let result = parse_condensed_formula(bad);
            assert!(
                matches!(result, Err(FormulaError::InvalidFormula { .. })),
                "expected {bad:?} to be rejected, got {result:?}"
            );
        }
    }
}
