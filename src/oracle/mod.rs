/*!
An incremental SAT oracle, in the style of the IPASIR IPA.

The gate analyzer treats satisfiability as an opaque question: clauses are
[added](Oracle::add) literal by literal with `0` as a terminator, a literal
may be [assumed](Oracle::assume) for the next solve only, and
[solve](Oracle::solve) reports one of three outcomes.
The formula held by an oracle is never retracted; probes are kept
independent by assuming fresh variables.

Information about the API may be found at <https://github.com/biotomas/ipasir>.

Note, 'solver' and 'oracle' are synonymous in this module.
An oracle is acquired on construction and released on drop, and lives
exactly as long as the gate-analysis session which owns it.

The library ships one oracle, [DpllOracle](dpll::DpllOracle).
Any IPASIR-compatible solver may be used in its place by implementing
[Oracle] over bindings to the solver.
*/

pub mod dpll;

/// The outcome of a solve.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Report {
    /// The formula is satisfiable under the assumptions made.
    Satisfiable,

    /// The formula is unsatisfiable under the assumptions made.
    Unsatisfiable,

    /// The oracle could not decide the formula, for some reason.
    Unknown,
}

impl Report {
    /// The outcome as an IPASIR return value.
    pub fn as_ipasir(&self) -> i32 {
        match self {
            Self::Satisfiable => 10,
            Self::Unsatisfiable => 20,
            Self::Unknown => 0,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Something which determines satisfiability of an incrementally built
/// formula, under one-shot assumptions.
pub trait Oracle {
    /// Adds a literal to the clause under construction, in integer form.
    /// `0` terminates the clause and commits it to the formula.
    fn add(&mut self, literal: i32);

    /// Assumes a literal for the next solve, and the next solve only.
    fn assume(&mut self, literal: i32);

    /// Determines satisfiability of the formula under the assumptions made
    /// since the previous solve.
    fn solve(&mut self) -> Report;
}
