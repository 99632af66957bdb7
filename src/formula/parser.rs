//! Loader for the weighted CNF (`.mwcnf`) instance format.
//!
//! The layout is positional:
//!
//! | line (1-based) | content                                         |
//! |----------------|-------------------------------------------------|
//! | 8              | instance name as the 4th whitespace token       |
//! | 9              | `p mwcnf <variable_count> <clause_count>`       |
//! | 10             | `w <weight_1> ... <weight_n> 0`                 |
//! | 12..           | one clause per line, terminated by `0`          |
//!
//! Everything else in the header is ignored. Blank clause lines are skipped.

use std::fs;
use std::path::Path;

use super::model::{Clause, Formula, Literal};
use crate::error::{FormatError, Result};

/// Number of header lines preceding the clause block.
pub const HEADER_LINES: usize = 11;

const NAME_LINE: usize = 7;
const PROBLEM_LINE: usize = 8;
const WEIGHT_LINE: usize = 9;

/// A loaded instance: its name and the validated formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: String,
    pub formula: Formula,
}

/// Reads and parses an instance file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let text = fs::read_to_string(path)?;
    Ok(parse_str(&text)?)
}

/// Parses instance text.
///
/// # Examples
///
/// ```
/// use u_mwsat::formula::parse_str;
///
/// let text = "c\nc\nc\nc\nc\nc\nc\nc SAT instance demo\np mwcnf 2 2\nw 4 7 0\nc\n1 -2 0\n2 0\n";
/// let instance = parse_str(text).unwrap();
/// assert_eq!(instance.name, "demo");
/// assert_eq!(instance.formula.clause_count(), 2);
/// ```
pub fn parse_str(text: &str) -> std::result::Result<Instance, FormatError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < HEADER_LINES {
        return Err(FormatError::TooFewLines {
            found: lines.len(),
            required: HEADER_LINES,
        });
    }

    let name = lines[NAME_LINE]
        .split_whitespace()
        .nth(3)
        .ok_or(FormatError::MissingField {
            line: NAME_LINE + 1,
            what: "instance name",
        })?
        .to_string();

    let problem: Vec<&str> = lines[PROBLEM_LINE].split_whitespace().collect();
    let variable_count = header_count(&problem, 2, "variable count")?;
    let clause_count = header_count(&problem, 3, "clause count")?;

    let weight_tokens: Vec<&str> = lines[WEIGHT_LINE].split_whitespace().collect();
    let weights = match weight_tokens.len() {
        0..=2 => Vec::new(),
        n => weight_tokens[1..n - 1]
            .iter()
            .map(|token| parse_token::<u64>(token, WEIGHT_LINE))
            .collect::<std::result::Result<Vec<_>, _>>()?,
    };

    let clauses = lines[HEADER_LINES..]
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_clause(line, HEADER_LINES + i))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let formula = Formula::new(variable_count, clause_count, clauses, weights)?;
    Ok(Instance { name, formula })
}

fn header_count(
    tokens: &[&str],
    position: usize,
    what: &'static str,
) -> std::result::Result<usize, FormatError> {
    let token = tokens.get(position).ok_or(FormatError::MissingField {
        line: PROBLEM_LINE + 1,
        what,
    })?;
    parse_token(token, PROBLEM_LINE)
}

/// All tokens but the trailing terminator.
fn parse_clause(line: &str, index: usize) -> std::result::Result<Clause, FormatError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens[..tokens.len() - 1]
        .iter()
        .map(|token| parse_token::<Literal>(token, index))
        .collect()
}

fn parse_token<T: std::str::FromStr>(
    token: &str,
    index: usize,
) -> std::result::Result<T, FormatError> {
    token.parse().map_err(|_| FormatError::InvalidToken {
        line: index + 1,
        token: token.to_string(),
    })
}
