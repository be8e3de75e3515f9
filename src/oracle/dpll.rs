//! A small DPLL oracle.
//!
//! Unit propagation to a fixed point, then a decision on some literal of an
//! unresolved clause, recursing on both polarities.
//! No learning, no heuristics — the probes posed by the gate analyzer are a
//! handful of short clauses, and exhausting their decision space is cheap.

use crate::misc::log::targets::{self};

use super::{Oracle, Report};

/// An incremental DPLL solver over integer-form literals.
#[derive(Debug, Default)]
pub struct DpllOracle {
    /// The committed clauses of the formula.
    clauses: Vec<Vec<i32>>,

    /// The clause under construction.
    buffer: Vec<i32>,

    /// Assumptions for the next solve.
    assumptions: Vec<i32>,

    /// The maximum variable mentioned by any clause or assumption.
    atom_max: u32,
}

impl DpllOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of committed clauses.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Satisfiability of the committed clauses, extending the given partial
    /// assignment.
    fn satisfiable(&self, assignment: &mut Vec<Option<bool>>) -> bool {
        // Unit propagation, to a fixed point.
        loop {
            let mut progress = false;

            for clause in &self.clauses {
                let mut satisfied = false;
                let mut open_count = 0;
                let mut open_literal = 0;

                for literal in clause {
                    match assignment[literal.unsigned_abs() as usize] {
                        Some(value) if value == literal.is_positive() => {
                            satisfied = true;
                            break;
                        }
                        Some(_) => {}
                        None => {
                            open_count += 1;
                            open_literal = *literal;
                        }
                    }
                }

                if satisfied {
                    continue;
                }

                match open_count {
                    0 => return false,
                    1 => {
                        assignment[open_literal.unsigned_abs() as usize] =
                            Some(open_literal.is_positive());
                        progress = true;
                    }
                    _ => {}
                }
            }

            if !progress {
                break;
            }
        }

        // A decision, on some literal of an unresolved clause.
        let mut choice: Option<i32> = None;
        'clause_examination: for clause in &self.clauses {
            let mut candidate: Option<i32> = None;
            for literal in clause {
                match assignment[literal.unsigned_abs() as usize] {
                    Some(value) if value == literal.is_positive() => continue 'clause_examination,
                    Some(_) => {}
                    None => candidate = Some(*literal),
                }
            }
            if candidate.is_some() {
                choice = candidate;
                break 'clause_examination;
            }
        }

        let Some(literal) = choice else {
            // Every clause is satisfied.
            return true;
        };
        let atom = literal.unsigned_abs() as usize;

        let mut first = assignment.clone();
        first[atom] = Some(literal.is_positive());
        if self.satisfiable(&mut first) {
            *assignment = first;
            return true;
        }

        assignment[atom] = Some(!literal.is_positive());
        self.satisfiable(assignment)
    }
}

impl Oracle for DpllOracle {
    fn add(&mut self, literal: i32) {
        if literal == 0 {
            let clause = std::mem::take(&mut self.buffer);
            self.clauses.push(clause);
        } else {
            self.atom_max = std::cmp::max(self.atom_max, literal.unsigned_abs());
            self.buffer.push(literal);
        }
    }

    fn assume(&mut self, literal: i32) {
        self.atom_max = std::cmp::max(self.atom_max, literal.unsigned_abs());
        self.assumptions.push(literal);
    }

    fn solve(&mut self) -> Report {
        // Assumptions are one-shot: taken here, they do not survive the solve.
        let assumptions = std::mem::take(&mut self.assumptions);

        let mut assignment: Vec<Option<bool>> = vec![None; self.atom_max as usize + 1];
        for literal in assumptions {
            let atom = literal.unsigned_abs() as usize;
            let value = literal.is_positive();
            match assignment[atom] {
                None => assignment[atom] = Some(value),
                Some(previous) if previous == value => {}
                Some(_) => return Report::Unsatisfiable,
            }
        }

        let report = match self.satisfiable(&mut assignment) {
            true => Report::Satisfiable,
            false => Report::Unsatisfiable,
        };
        log::trace!(target: targets::ORACLE, "Solve: {report}");
        report
    }
}

#[cfg(test)]
mod dpll_tests {
    use super::*;

    fn add_clause(oracle: &mut DpllOracle, literals: &[i32]) {
        for literal in literals {
            oracle.add(*literal);
        }
        oracle.add(0);
    }

    #[test]
    fn simple_satisfiable() {
        let mut oracle = DpllOracle::new();
        add_clause(&mut oracle, &[1, 2]);
        add_clause(&mut oracle, &[-1, 2]);

        assert_eq!(oracle.solve(), Report::Satisfiable);
    }

    #[test]
    fn simple_unsatisfiable() {
        let mut oracle = DpllOracle::new();
        add_clause(&mut oracle, &[1, 2]);
        add_clause(&mut oracle, &[1, -2]);
        add_clause(&mut oracle, &[-1, 2]);
        add_clause(&mut oracle, &[-1, -2]);

        assert_eq!(oracle.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn assumptions_are_one_shot() {
        let mut oracle = DpllOracle::new();
        add_clause(&mut oracle, &[1, 2]);

        oracle.assume(-1);
        oracle.assume(-2);
        assert_eq!(oracle.solve(), Report::Unsatisfiable);

        // The formula itself is satisfiable once the assumptions are spent.
        assert_eq!(oracle.solve(), Report::Satisfiable);
    }

    #[test]
    fn conflicting_assumptions() {
        let mut oracle = DpllOracle::new();
        add_clause(&mut oracle, &[1]);

        oracle.assume(2);
        oracle.assume(-2);
        assert_eq!(oracle.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn incremental_addition() {
        let mut oracle = DpllOracle::new();
        add_clause(&mut oracle, &[1]);
        assert_eq!(oracle.solve(), Report::Satisfiable);

        add_clause(&mut oracle, &[-1]);
        assert_eq!(oracle.solve(), Report::Unsatisfiable);
    }
}
