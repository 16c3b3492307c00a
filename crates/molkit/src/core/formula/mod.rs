//! The formula mini-language: parsing element-count strings and rendering
//! element-count maps through a printf-like template.
//!
//! [`parser`] implements the guaranteed contract, the anchored token grammar
//! `(?:[A-Z][a-z]*\d*)+`. [`condensed`] is a separate, stricter-superset
//! entry point that also understands bracket groups, group abbreviations,
//! and multipliers (`"1[Ph(Me)3]2"`). [`writer`] renders an element-count
//! map with the `%s`/`%D`/`%d`/`%d{...}` template language.

pub mod condensed;
pub mod parser;
pub mod writer;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FormulaError {
    #[error("Invalid formula '{input}' at byte {position}")]
    InvalidFormula { input: String, position: usize },
}
