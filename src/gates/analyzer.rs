use rustc_hash::FxHashSet;

use crate::{
    config::GateConfig,
    db::{gate::GateFormula, occurrence::OccurrenceIndex},
    formula::{ClauseIndex, Formula},
    misc::log::targets::{self},
    oracle::{dpll::DpllOracle, Oracle, Report},
    structures::{
        atom::Atom,
        clause::Clause,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// A gate analyzer over a formula, generic in the SAT oracle used for
/// semantic checks.
pub struct GateAnalyzer<'f, O: Oracle> {
    /// The formula under analysis.
    formula: &'f Formula,

    /// The occurrence index, consumed as the formula is peeled.
    index: OccurrenceIndex,

    /// The recognized structure.
    gate_formula: GateFormula,

    /// The oracle, present exactly when semantic checks are enabled.
    oracle: Option<O>,

    /// The next atom free for a semantic probe.
    probe_atom: Atom,

    /// The configuration of the analysis.
    config: GateConfig,
}

impl<'f> GateAnalyzer<'f, DpllOracle> {
    /// An analyzer over the formula using the library's own oracle for
    /// semantic checks, if such checks are enabled.
    pub fn from_formula(
        formula: &'f Formula,
        config: GateConfig,
    ) -> Result<Self, err::ErrorKind> {
        let oracle = match config.semantic.value {
            true => Some(DpllOracle::new()),
            false => None,
        };
        Ok(Self::with_oracle(formula, config, oracle))
    }
}

impl<'f, O: Oracle> GateAnalyzer<'f, O> {
    /// An analyzer over the formula using the given oracle for semantic
    /// checks.
    pub fn with_oracle(formula: &'f Formula, config: GateConfig, oracle: Option<O>) -> Self {
        Self {
            formula,
            index: OccurrenceIndex::build(formula),
            gate_formula: GateFormula::new(formula),
            oracle,
            probe_atom: formula.atom_max() + 1,
            config,
        }
    }

    /// Starting-point of gate analysis: iterative root selection.
    ///
    /// Each pass estimates root clauses, marks their literals used, and runs
    /// gate recognition from those literals.
    /// Analysis terminates when the estimate is empty or the configured pass
    /// count is exhausted; whatever is then left of the occurrence index is
    /// the remainder.
    pub fn analyze(&mut self) {
        let mut pass = 0;
        while pass < self.config.max_passes.value {
            // Estimation unlinks the returned clauses, so it runs only when a
            // pass is there to record them as roots.
            let root_clauses = self.index.estimate_roots(self.formula);
            if root_clauses.is_empty() {
                break;
            }

            let mut candidates: Vec<CLiteral> = Vec::default();

            for clause in root_clauses {
                self.gate_formula.roots.push(clause);
                for literal in self.formula.clause(clause).literals() {
                    candidates.push(literal);
                    self.gate_formula.set_used_as_input(literal);
                }
            }

            self.gate_recognition(candidates);

            pass += 1;
        }

        self.gate_formula.remainder = self.index.remaining();

        log::info!(
            target: targets::GATES,
            "Recognized {} gate(s), {} root(s), {} clause(s) remain",
            self.gate_formula.gate_count(),
            self.gate_formula.root_count(),
            self.gate_formula.remainder.len(),
        );
    }

    /// The recognized structure.
    pub fn gate_formula(&self) -> &GateFormula {
        &self.gate_formula
    }

    /// The recognized structure, consuming the analyzer (and releasing the
    /// oracle).
    pub fn into_gate_formula(self) -> GateFormula {
        self.gate_formula
    }

    /// Hierarchical gate recognition from the given root literals.
    ///
    /// Breadth-first by design: depth-first exploration loses the
    /// monotonicity guarantees of the used-as-input marks.
    fn gate_recognition(&mut self, roots: Vec<CLiteral>) {
        log::debug!(target: targets::GATES, "Starting gate recognition with {} root literal(s)", roots.len());

        let mut frontier = roots;
        let mut candidates: Vec<CLiteral> = Vec::default();

        while !frontier.is_empty() {
            std::mem::swap(&mut candidates, &mut frontier);

            // Visit each candidate output only once per round.
            let mut seen: FxHashSet<CLiteral> = FxHashSet::default();
            candidates.retain(|literal| seen.insert(*literal));

            for index in 0..candidates.len() {
                let candidate = candidates[index];
                if self.is_gate(candidate) {
                    let middle = frontier.len();
                    if let Some(gate) = self.gate_formula.gate(candidate) {
                        frontier.extend_from_slice(&gate.inp);
                    }
                    // Gate inputs are sorted, so a merge keeps the frontier sorted.
                    merge_sorted(&mut frontier, middle);
                }
            }
            candidates.clear();
        }
    }

    /// Tests whether the index contains a gate definition for the candidate
    /// output literal, recording the gate and peeling its clauses on success.
    fn is_gate(&mut self, out: CLiteral) -> bool {
        if self.index.occ(out.negate()).is_empty() || !self.index.is_blocked_set(out, self.formula)
        {
            return false;
        }

        let fwd: Vec<ClauseIndex> = self.index.occ(out.negate()).to_vec();
        let bwd: Vec<ClauseIndex> = self.index.occ(out).to_vec();
        let monotonic = self.gate_formula.is_nested_monotonic(out);

        if monotonic
            || (self.config.patterns.value && self.pattern_match(out, &fwd, &bwd))
            || (self.config.semantic.value && self.semantic_match(out, &fwd, &bwd))
        {
            log::debug!(target: targets::GATES, "Gate with output {out}");
            self.gate_formula.add_gate(out, fwd, bwd, self.formula);
            self.index.remove(out.atom(), self.formula);
            return true;
        }
        false
    }

    /// Clause patterns of full encodings.
    ///
    /// # Premise
    /// `fwd` blocks `bwd` on the output literal.
    fn pattern_match(&self, out: CLiteral, fwd: &[ClauseIndex], bwd: &[ClauseIndex]) -> bool {
        // Check that fwd and bwd constrain exactly the same inputs (in opposite polarity).
        let mut fwd_inp: FxHashSet<Atom> = FxHashSet::default();
        let mut bwd_inp: FxHashSet<Atom> = FxHashSet::default();
        for clause in fwd {
            for literal in self.formula.clause(*clause).literals() {
                if literal != out.negate() {
                    fwd_inp.insert(literal.atom());
                }
            }
        }
        for clause in bwd {
            for literal in self.formula.clause(*clause).literals() {
                if literal != out {
                    bwd_inp.insert(literal.atom());
                }
            }
        }
        if fwd_inp != bwd_inp {
            return false;
        }

        // Equivalence gates.
        if fwd.len() == 1
            && bwd.len() == 1
            && self.formula.clause(fwd[0]).size() == 2
            && self.formula.clause(bwd[0]).size() == 2
        {
            return true;
        }
        // Or gates.
        if fwd.len() == 1 && self.fixed_clause_size(bwd, 2) {
            return true;
        }
        // And gates.
        if bwd.len() == 1 && self.fixed_clause_size(fwd, 2) {
            return true;
        }
        // A full encoding: 2^(k-1) forward and 2^(k-1) backward clauses over
        // k inputs represent all input combinations, each combined with one
        // output literal — and the forward literals cover both polarities of
        // every input.
        if fwd.len() == bwd.len()
            && fwd_inp.len() < usize::BITS as usize
            && 2 * fwd.len() == 1 << fwd_inp.len()
        {
            let mut fwd_lits: FxHashSet<CLiteral> = FxHashSet::default();
            for clause in fwd {
                for literal in self.formula.clause(*clause).literals() {
                    if literal != out.negate() {
                        fwd_lits.insert(literal);
                    }
                }
            }
            return 2 * fwd_inp.len() == fwd_lits.len();
        }
        false
    }

    /// Tests the candidate definition with the oracle: the output is a gate
    /// output exactly when it cannot take both values under the definition.
    ///
    /// Every literal of the output variable is replaced by the negation of a
    /// fresh probe variable, and the probe is assumed positive: under the
    /// assumption each clause reduces to its input part, and unsatisfiability
    /// means the forward and backward parts contradict — the output is
    /// functionally determined.
    /// Freshness keeps the probes of an oracle independent: clauses of a
    /// spent probe are satisfiable through the unconstrained probe variable.
    fn semantic_match(&mut self, out: CLiteral, fwd: &[ClauseIndex], bwd: &[ClauseIndex]) -> bool {
        let Some(oracle) = self.oracle.as_mut() else {
            return false;
        };

        let probe = self.probe_atom as i32;
        self.probe_atom += 1;

        for clause in fwd.iter().chain(bwd) {
            for literal in self.formula.clause(*clause).literals() {
                match literal.atom() == out.atom() {
                    true => oracle.add(-probe),
                    false => oracle.add(literal.as_int()),
                }
            }
            oracle.add(0);
        }

        oracle.assume(probe);
        oracle.solve() == Report::Unsatisfiable
    }

    fn fixed_clause_size(&self, clauses: &[ClauseIndex], size: usize) -> bool {
        clauses
            .iter()
            .all(|clause| self.formula.clause(*clause).size() == size)
    }
}

/// Merges the sorted tail `frontier[middle..]` into the sorted head
/// `frontier[..middle]`.
fn merge_sorted(frontier: &mut Vec<CLiteral>, middle: usize) {
    if middle == 0 || middle == frontier.len() {
        return;
    }
    if frontier[middle - 1] <= frontier[middle] {
        return;
    }

    let tail = frontier.split_off(middle);
    let head = std::mem::take(frontier);

    let mut head_iter = head.into_iter().peekable();
    let mut tail_iter = tail.into_iter().peekable();

    loop {
        match (head_iter.peek(), tail_iter.peek()) {
            (Some(a), Some(b)) => {
                if a <= b {
                    frontier.extend(head_iter.next());
                } else {
                    frontier.extend(tail_iter.next());
                }
            }
            (Some(_), None) => frontier.extend(head_iter.next()),
            (None, Some(_)) => frontier.extend(tail_iter.next()),
            (None, None) => break,
        }
    }
}
