//! Rendering element-count maps through the formula template language.
//!
//! A template is literal text interspersed with control sequences, applied
//! once per element in the chosen order and concatenated:
//!
//! | token | meaning |
//! |---|---|
//! | `%s` | element symbol |
//! | `%D` | atom count, always emitted |
//! | `%d` | atom count, emitted only when the count exceeds 1 |
//! | `%d{text}` | `text` (itself a template) emitted only when the count exceeds 1 |
//! | `\X` | literal `X`, suppressing any control meaning |

use std::collections::BTreeMap;

/// The template used when a caller supplies none.
pub const DEFAULT_TEMPLATE: &str = "%s%d";

/// The order in which elements are rendered.
///
/// Plain alphabetical is the default for compatibility; Hill order
/// (carbon first, then hydrogen, then the rest alphabetically, falling back
/// to all-alphabetical for carbon-free formulas) is the conventional
/// preset. For anything else, order the symbols yourself and call
/// [`format_formula_ordered`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormulaOrder {
    #[default]
    Alphabetical,
    Hill,
}

/// Renders `counts` with `template`, elements in ascending alphabetical
/// order of symbol.
pub fn format_formula(counts: &BTreeMap<String, usize>, template: &str) -> String {
    format_formula_with(counts, template, FormulaOrder::Alphabetical)
}

/// Renders `counts` with `template` in the given preset order.
pub fn format_formula_with(
    counts: &BTreeMap<String, usize>,
    template: &str,
    order: FormulaOrder,
) -> String {
    let symbols: Vec<&str> = match order {
        FormulaOrder::Alphabetical => counts.keys().map(String::as_str).collect(),
        FormulaOrder::Hill => {
            if counts.contains_key("C") {
                let mut symbols = vec!["C"];
                if counts.contains_key("H") {
                    symbols.push("H");
                }
                symbols.extend(
                    counts
                        .keys()
                        .map(String::as_str)
                        .filter(|&s| s != "C" && s != "H"),
                );
                symbols
            } else {
                counts.keys().map(String::as_str).collect()
            }
        }
    };
    format_formula_ordered(counts, template, &symbols)
}

/// Renders `counts` with `template`, elements in the caller-supplied
/// order. Symbols absent from `counts` are skipped.
pub fn format_formula_ordered(
    counts: &BTreeMap<String, usize>,
    template: &str,
    symbols: &[&str],
) -> String {
    symbols
        .iter()
        .filter_map(|&symbol| {
            counts
                .get(symbol)
                .map(|&count| render_element(template, symbol, count))
        })
        .collect()
}

/// Applies the template once, for one element.
fn render_element(template: &str, symbol: &str, count: usize) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                // Escaped character passes through untouched; a trailing
                // backslash stays literal.
                match chars.next() {
                    Some((_, escaped)) => out.push(escaped),
                    None => out.push('\\'),
                }
            }
            '%' => match chars.next() {
                Some((_, 's')) => out.push_str(symbol),
                Some((_, 'D')) => out.push_str(&count.to_string()),
                Some((next, 'd')) => {
                    if let Some(&(_, '{')) = chars.peek() {
                        chars.next();
                        let body_start = next + 2;
                        let body_end = matching_brace(template, body_start);
                        if count > 1 {
                            out.push_str(&render_element(
                                &template[body_start..body_end],
                                symbol,
                                count,
                            ));
                        }
                        // Skip past the body and its closing brace.
                        while let Some(&(i, _)) = chars.peek() {
                            if i > body_end {
                                break;
                            }
                            chars.next();
                        }
                    } else if count > 1 {
                        out.push_str(&count.to_string());
                    }
                }
                Some((_, other)) => {
                    // Unknown control sequence stays literal.
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            },
            _ => out.push(c),
        }
    }
    out
}

/// Byte index of the `}` closing the brace group that starts at `start`
/// (just past the `{`), honoring nesting and escapes. An unterminated
/// group runs to the end of the template.
fn matching_brace(template: &str, start: usize) -> usize {
    let mut depth = 1usize;
    let mut chars = template[start..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return start + i;
                }
            }
            _ => {}
        }
    }
    template.len()
}
