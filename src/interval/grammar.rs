//! Fixed-width grammar for interval strings.
//!
//! The pattern is assembled from a handful of regex-style atoms, laid out
//! from the same field table the formatter uses, and compiled once.

use std::fmt;
use std::sync::OnceLock;

use super::fields::{Field, FIELD_COUNT};

/// Building blocks of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    /// Anchor at the start of the input
    Begin,
    /// Anchor at the end of the input
    End,
    /// Any ASCII digit
    Digit,
    /// One exact character
    Literal(char),
    /// Repeat the previous atom this many times in total
    Repeat(usize),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Begin => f.write_str("^"),
            Atom::End => f.write_str("$"),
            Atom::Digit => f.write_str("\\d"),
            Atom::Literal(ch @ ('.' | ':')) => write!(f, "\\{}", ch),
            Atom::Literal(ch) => write!(f, "{}", ch),
            Atom::Repeat(n) => write!(f, "{{{}}}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Digit,
    Exact(char),
}

impl Class {
    fn accepts(self, ch: char) -> bool {
        match self {
            Class::Digit => ch.is_ascii_digit(),
            Class::Exact(expected) => ch == expected,
        }
    }
}

/// A compiled anchored pattern: a run of character classes, each repeated
/// a fixed number of times.
#[derive(Debug, Clone)]
pub struct Grammar {
    atoms: Vec<Atom>,
    runs: Vec<(Class, usize)>,
}

impl Grammar {
    /// Compile a sequence of atoms. Fails if `Repeat` has nothing to repeat
    /// or the pattern is not anchored at both ends.
    pub fn compile(atoms: Vec<Atom>) -> Result<Self, String> {
        let mut runs: Vec<(Class, usize)> = Vec::new();
        let mut anchored_start = false;
        let mut anchored_end = false;
        let mut repeatable = false;

        for (position, atom) in atoms.iter().enumerate() {
            match *atom {
                Atom::Begin if position == 0 => anchored_start = true,
                Atom::End if position + 1 == atoms.len() => anchored_end = true,
                Atom::Begin | Atom::End => {
                    return Err(format!("anchor out of place at atom {}", position));
                }
                Atom::Digit => runs.push((Class::Digit, 1)),
                Atom::Literal(ch) => runs.push((Class::Exact(ch), 1)),
                Atom::Repeat(n) => match runs.last_mut() {
                    Some(last) if repeatable => last.1 = n,
                    _ => return Err(format!("nothing to repeat at atom {}", position)),
                },
            }
            repeatable = matches!(atom, Atom::Digit | Atom::Literal(_));
        }

        if !(anchored_start && anchored_end) {
            return Err("pattern must start with ^ and end with $".to_string());
        }

        Ok(Self { atoms, runs })
    }

    /// Total number of characters a match spans
    pub fn match_length(&self) -> usize {
        self.runs.iter().map(|(_, count)| count).sum()
    }

    /// Whether all of `input` matches
    pub fn is_match(&self, input: &str) -> bool {
        let mut chars = input.chars();
        for &(class, count) in &self.runs {
            for _ in 0..count {
                match chars.next() {
                    Some(ch) if class.accepts(ch) => {}
                    _ => return false,
                }
            }
        }
        chars.next().is_none()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.atoms.iter().try_for_each(|atom| write!(f, "{}", atom))
    }
}

/// Separator written before the field at `index` (none before the first).
/// The millisecond group is dot-separated, all others colon-separated.
pub(crate) fn separator_before(index: usize) -> Option<char> {
    match index {
        0 => None,
        i if i == FIELD_COUNT - 1 => Some('.'),
        _ => Some(':'),
    }
}

fn interval_atoms() -> Vec<Atom> {
    let mut atoms = vec![Atom::Begin];
    for (index, field) in Field::ALL.into_iter().enumerate() {
        if let Some(separator) = separator_before(index) {
            atoms.push(Atom::Literal(separator));
        }
        atoms.push(Atom::Digit);
        atoms.push(Atom::Repeat(field.width()));
    }
    atoms.push(Atom::End);
    atoms
}

/// The interval string grammar, built on first use
pub fn interval_grammar() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(|| match Grammar::compile(interval_atoms()) {
        Ok(grammar) => grammar,
        Err(e) => panic!("interval grammar is malformed: {}", e),
    })
}

/// Whether `s` is a well-formed interval string
pub fn is_interval_string(s: &str) -> bool {
    interval_grammar().is_match(s)
}
