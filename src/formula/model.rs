//! Immutable problem instance and the mutable search state.

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// A literal: 1-indexed variable, negative for negation.
pub type Literal = i32;

/// A disjunction of literals.
pub type Clause = Vec<Literal>;

/// A weighted CNF formula.
///
/// Built once at load time and never mutated afterwards. Every literal is
/// guaranteed to reference a variable in `1..=variable_count`, so the
/// evaluation functions can index assignments without bounds checks
/// failing.
///
/// # Examples
///
/// ```
/// use u_mwsat::formula::Formula;
///
/// let formula = Formula::new(2, 2, vec![vec![1, -2], vec![2]], vec![3, 4]).unwrap();
/// assert_eq!(formula.variable_count(), 2);
/// assert_eq!(formula.weight(2), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawFormula")
)]
pub struct Formula {
    clauses: Vec<Clause>,
    weights: Vec<u64>,
}

/// Unvalidated formula fields; converting checks them via [`Formula::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RawFormula {
    pub clauses: Vec<Clause>,
    pub weights: Vec<u64>,
}

impl TryFrom<RawFormula> for Formula {
    type Error = FormatError;

    fn try_from(raw: RawFormula) -> Result<Self, Self::Error> {
        Formula::new(raw.weights.len(), raw.clauses.len(), raw.clauses, raw.weights)
    }
}

/// Upper bound on any weight either scoring rule can produce: the larger of
/// the total variable weight and the weight of every positive occurrence.
/// `None` when it does not fit in `u64`.
fn max_weight(clauses: &[Clause], weights: &[u64]) -> Option<u64> {
    let total = weights.iter().try_fold(0u64, |acc, &w| acc.checked_add(w))?;
    let occurrences = clauses
        .iter()
        .flatten()
        .filter(|&&lit| lit > 0)
        .try_fold(0u64, |acc, &lit| acc.checked_add(weights[lit as usize - 1]))?;
    Some(total.max(occurrences))
}

impl Formula {
    /// Validates sizes and literal ranges, then builds the formula.
    ///
    /// Fails with [`FormatError::WeightOverflow`] when a score could exceed
    /// `u64`, so weight sums never overflow during the search.
    ///
    /// Duplicate literals, tautological clauses and zero weights are legal.
    pub fn new(
        variable_count: usize,
        clause_count: usize,
        clauses: Vec<Clause>,
        weights: Vec<u64>,
    ) -> Result<Self, FormatError> {
        if clauses.len() != clause_count {
            return Err(FormatError::ClauseCountMismatch {
                declared: clause_count,
                parsed: clauses.len(),
            });
        }
        if weights.len() != variable_count {
            return Err(FormatError::WeightCountMismatch {
                declared: variable_count,
                parsed: weights.len(),
            });
        }
        for (i, clause) in clauses.iter().enumerate() {
            if let Some(&literal) = clause
                .iter()
                .find(|lit| lit.unsigned_abs() == 0 || lit.unsigned_abs() as usize > variable_count)
            {
                return Err(FormatError::LiteralOutOfRange {
                    clause: i + 1,
                    literal,
                    variable_count,
                });
            }
        }
        max_weight(&clauses, &weights).ok_or(FormatError::WeightOverflow)?;
        Ok(Self { clauses, weights })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    /// Weight of a 1-indexed variable.
    pub fn weight(&self, variable: usize) -> u64 {
        self.weights[variable - 1]
    }

    pub fn variable_count(&self) -> usize {
        self.weights.len()
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}

/// One truth value per variable, in variable-index order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment(Vec<bool>);

impl Assignment {
    pub fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the variable at 0-based `index`.
    pub fn get(&self, index: usize) -> bool {
        self.0[index]
    }

    /// Inverts the variable at 0-based `index`.
    pub fn flip(&mut self, index: usize) {
        self.0[index] = !self.0[index];
    }

    /// Whether `literal` evaluates to true under this assignment.
    #[inline]
    pub fn satisfies(&self, literal: Literal) -> bool {
        let value = self.0[literal.unsigned_abs() as usize - 1];
        if literal > 0 {
            value
        } else {
            !value
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// The assignment as signed literals: `+i` for true, `-i` for false.
    pub fn to_literals(&self) -> Vec<Literal> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let var = (i + 1) as Literal;
                if v {
                    var
                } else {
                    -var
                }
            })
            .collect()
    }
}

impl From<Vec<bool>> for Assignment {
    fn from(values: Vec<bool>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, lit) in self.to_literals().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{lit}")?;
        }
        Ok(())
    }
}

/// Parses the signed-literal form produced by `Display`.
///
/// Literals must appear in variable order; a trailing `0` terminator is
/// accepted and ignored.
impl FromStr for Assignment {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::new();
        let mut tokens = s.split_whitespace().peekable();
        while let Some(token) = tokens.next() {
            let literal: Literal = token.parse().map_err(|_| FormatError::InvalidToken {
                line: 1,
                token: token.to_string(),
            })?;
            if literal == 0 && tokens.peek().is_none() {
                break;
            }
            if literal.unsigned_abs() as usize != values.len() + 1 {
                return Err(FormatError::LiteralOutOfOrder {
                    position: values.len() + 1,
                    literal,
                });
            }
            values.push(literal > 0);
        }
        Ok(Self(values))
    }
}
