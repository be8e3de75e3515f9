/*!
An occurrence index over a formula.

For each literal the index holds the list of (live) clauses containing the
literal, in insertion order.
Clauses leave the index in two ways:

- [estimate_roots](OccurrenceIndex::estimate_roots) unlinks the clauses it
  returns — they are top-level candidates, and excluding them from the index
  is what lets their outputs be recognized as gates (a clause asserting an
  output would otherwise break the blocked-set condition on that output).
- [remove](OccurrenceIndex::remove) unlinks every clause mentioning a
  variable, once the variable is recognized as a gate output.

Unlinking tracks purity: when the occurrences of a literal run out while its
negation still occurs, the negation can no longer be defined as a gate output
through those clauses, and its clauses are surfaced by the next root
estimate.
*/

use crate::{
    formula::{ClauseIndex, Formula},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::Clause,
        literal::{CLiteral, Literal},
    },
};

/// Per-literal clause lists over a formula, with liveness tracking.
pub struct OccurrenceIndex {
    /// For each literal index, the live clauses containing the literal.
    occurrences: Vec<Vec<ClauseIndex>>,

    /// Liveness of each clause: false once unlinked (rooted or removed).
    live: Vec<bool>,

    /// Literals which became pure since the last root estimate.
    exposed: Vec<CLiteral>,
}

impl OccurrenceIndex {
    /// Builds the index over every clause of the formula.
    pub fn build(formula: &Formula) -> Self {
        let mut index = Self {
            occurrences: vec![Vec::default(); 2 * formula.atom_max() as usize + 2],
            live: vec![true; formula.clause_count()],
            exposed: Vec::default(),
        };

        for (clause_index, clause) in formula.clauses().enumerate() {
            for literal in clause.literals() {
                index.occurrences[literal.index()].push(clause_index);
            }
        }

        // Initially pure literals seed the first root estimate.
        for atom in 1..=formula.atom_max() {
            for polarity in [true, false] {
                let literal = CLiteral::new(atom, polarity);
                if !index.occ(literal).is_empty() && index.occ(literal.negate()).is_empty() {
                    index.exposed.push(literal);
                }
            }
        }

        index
    }

    /// The live clauses containing the literal, in insertion order.
    pub fn occ(&self, literal: CLiteral) -> &[ClauseIndex] {
        &self.occurrences[literal.index()]
    }

    /// Whether the clause is still part of the index.
    pub fn is_live(&self, clause: ClauseIndex) -> bool {
        self.live[clause]
    }

    /// Whether `occ(¬o)` blocks `occ(o)`: every pair of clauses across the
    /// two lists resolves to a tautology on some variable other than the
    /// variable of `o`.
    pub fn is_blocked_set(&self, output: CLiteral, formula: &Formula) -> bool {
        for fwd_index in self.occ(output.negate()) {
            let fwd_clause = formula.clause(*fwd_index);
            for bwd_index in self.occ(output) {
                let bwd_clause = formula.clause(*bwd_index);

                let mut tautological = false;
                for literal in fwd_clause.literals() {
                    if literal.atom() != output.atom() && bwd_clause.contains(literal.negate()) {
                        tautological = true;
                        break;
                    }
                }
                if !tautological {
                    return false;
                }
            }
        }
        true
    }

    /// Estimates clauses for the current top level and unlinks them from the
    /// index.
    ///
    /// Clauses of pure literals are preferred — nothing can define a pure
    /// literal as a gate output, so its clauses cannot be explained and must
    /// be top level.
    /// When no literal is pure the estimate falls back to the occurrence list
    /// of the most frequent literal.
    /// An empty estimate means the index is exhausted.
    pub fn estimate_roots(&mut self, formula: &Formula) -> Vec<ClauseIndex> {
        let mut estimate: Vec<ClauseIndex> = Vec::default();

        for literal in std::mem::take(&mut self.exposed) {
            estimate.extend_from_slice(self.occ(literal));
        }
        estimate.sort_unstable();
        estimate.dedup();

        if estimate.is_empty() {
            let mut the_max: usize = 0;
            let mut the_literal: Option<usize> = None;
            for index in 2..self.occurrences.len() {
                if self.occurrences[index].len() > the_max {
                    the_max = self.occurrences[index].len();
                    the_literal = Some(index);
                }
            }
            if let Some(index) = the_literal {
                estimate = self.occurrences[index].clone();
            }
        }

        log::trace!(target: targets::OCCURRENCE, "Root estimate: {} clause(s)", estimate.len());

        for clause in &estimate {
            self.unlink(*clause, formula);
        }
        estimate
    }

    /// Unlinks every live clause mentioning the variable.
    pub fn remove(&mut self, atom: Atom, formula: &Formula) {
        let mut unlinked: Vec<ClauseIndex> = Vec::default();
        for polarity in [true, false] {
            unlinked.extend_from_slice(self.occ(CLiteral::new(atom, polarity)));
        }

        for clause in unlinked {
            self.unlink(clause, formula);
        }
    }

    /// The live clauses of the index, in insertion order.
    pub fn remaining(&self) -> Vec<ClauseIndex> {
        self.live
            .iter()
            .enumerate()
            .filter_map(|(index, live)| live.then_some(index))
            .collect()
    }

    /// Unlinks a clause from every occurrence list, noting literals whose
    /// negation thereby became pure.
    fn unlink(&mut self, clause: ClauseIndex, formula: &Formula) {
        if !self.live[clause] {
            return;
        }
        self.live[clause] = false;

        for literal in formula.clause(clause).literals() {
            self.occurrences[literal.index()].retain(|index| *index != clause);

            let negation = literal.negate();
            if self.occurrences[literal.index()].is_empty() && !self.occ(negation).is_empty() {
                self.exposed.push(negation);
            }
        }
    }
}

#[cfg(test)]
mod occurrence_tests {
    use super::*;
    use crate::formula::Formula;

    fn formula_of(clauses: &[&[i32]]) -> Formula {
        let mut formula = Formula::new();
        for clause in clauses {
            formula.add_clause(clause.iter().map(CLiteral::from).collect());
        }
        formula
    }

    fn literal(int: i32) -> CLiteral {
        CLiteral::from(int)
    }

    #[test]
    fn occurrences_in_insertion_order() {
        let formula = formula_of(&[&[1, 2], &[-1, 2], &[1, -2]]);
        let index = OccurrenceIndex::build(&formula);

        assert_eq!(index.occ(literal(1)), &[0, 2]);
        assert_eq!(index.occ(literal(-1)), &[1]);
        assert_eq!(index.occ(literal(2)), &[0, 1]);
    }

    #[test]
    fn blocked_set_on_a_pair() {
        // occ(-1) and occ(1) resolve tautologically on 2.
        let formula = formula_of(&[&[1, 2], &[-1, -2]]);
        let index = OccurrenceIndex::build(&formula);

        assert!(index.is_blocked_set(literal(1), &formula));

        // While occ(-1) and occ(1) here resolve on 1 alone.
        let formula = formula_of(&[&[1, 2], &[-1, 2]]);
        let index = OccurrenceIndex::build(&formula);

        assert!(!index.is_blocked_set(literal(1), &formula));
    }

    #[test]
    fn pure_literals_seed_the_estimate() {
        // 3 occurs only positively, so clause 1 is top level.
        let formula = formula_of(&[&[1, -2], &[2, 3], &[-1, 2]]);
        let mut index = OccurrenceIndex::build(&formula);

        assert_eq!(index.estimate_roots(&formula), vec![1]);
        assert!(!index.is_live(1));
    }

    #[test]
    fn fallback_estimate_is_by_occurrence_count() {
        // No pure literal; 1 is the most frequent literal.
        let formula = formula_of(&[&[1, -2], &[1, 2], &[-1, 2], &[-2, -1]]);
        let mut index = OccurrenceIndex::build(&formula);

        assert_eq!(index.estimate_roots(&formula), vec![0, 1]);
    }

    #[test]
    fn removal_exposes_fresh_roots() {
        // Removing 1 exhausts occ(-2), making -2's negation (2) pure.
        let formula = formula_of(&[&[1, -2], &[2, 3], &[-1, -3]]);
        let mut index = OccurrenceIndex::build(&formula);
        // Drain the initial estimate so only removal-driven exposure remains.
        let _ = index.estimate_roots(&formula);

        index.remove(1, &formula);

        assert!(!index.is_live(0));
        assert!(!index.is_live(2));
    }

    #[test]
    fn exhausted_index_estimates_nothing() {
        let formula = formula_of(&[&[1, 2]]);
        let mut index = OccurrenceIndex::build(&formula);

        index.remove(1, &formula);

        assert!(index.estimate_roots(&formula).is_empty());
        assert!(index.remaining().is_empty());
    }
}
