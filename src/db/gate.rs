/*!
The gate formula: recognized gate structure over a CNF formula.

A [Gate] records a definition of its output literal:
- `fwd` holds the clauses containing the negated output — read as
  implications from the output to its inputs.
- `bwd` holds the clauses containing the output.
- `inp` is the deduplicated union of the input literals of the `fwd`
  clauses.
- `not_mono` notes that the output was reached from a non-monotonic
  context when the gate was recognized.

A [GateFormula] holds at most one gate per output variable, the root
clauses analysis started from, the remainder of unexplained clauses, and
the used-as-input marks consulted for the nested-monotonicity test.
*/

use crate::{
    formula::{ClauseIndex, Formula},
    structures::{
        clause::Clause,
        literal::{CLiteral, Literal},
    },
};

/// A recognized gate definition.
#[derive(Debug)]
pub struct Gate {
    /// The output literal of the gate.
    pub out: CLiteral,

    /// Clauses containing the negation of the output.
    pub fwd: Vec<ClauseIndex>,

    /// Clauses containing the output.
    pub bwd: Vec<ClauseIndex>,

    /// The sorted, deduplicated input literals of the gate.
    pub inp: Vec<CLiteral>,

    /// True when the output was reached from a non-monotonic context.
    pub not_mono: bool,
}

/// The gate structure recognized over a formula.
pub struct GateFormula {
    /// At most one gate per output variable, indexed by atom.
    gates: Vec<Option<Gate>>,

    /// Top-level clauses, in the order root estimation surfaced them.
    pub roots: Vec<ClauseIndex>,

    /// Marks for literals used as an input to a gate or a root, indexed by
    /// literal index.
    inputs: Vec<bool>,

    /// Clauses left unexplained once analysis terminated.
    pub remainder: Vec<ClauseIndex>,

    /// The unit clause introduced by root normalization, if it has run.
    artificial_root: Option<ClauseIndex>,
}

impl GateFormula {
    pub fn new(formula: &Formula) -> Self {
        Self {
            gates: (0..=formula.atom_max()).map(|_| None).collect(),
            roots: Vec::default(),
            inputs: vec![false; 2 * formula.atom_max() as usize + 2],
            remainder: Vec::default(),
            artificial_root: None,
        }
    }

    /// Marks the literal as used as an input.
    pub fn set_used_as_input(&mut self, literal: CLiteral) {
        self.inputs[literal.index()] = true;
    }

    /// Whether the literal is marked as used as an input.
    pub fn is_used_as_input(&self, literal: CLiteral) -> bool {
        self.inputs[literal.index()]
    }

    /// Whether every use of the literal as an input is of a single polarity.
    pub fn is_nested_monotonic(&self, literal: CLiteral) -> bool {
        !(self.is_used_as_input(literal) && self.is_used_as_input(literal.negate()))
    }

    /// Records a gate definition for the output.
    ///
    /// The inputs of the gate are the literals of the `fwd` clauses other
    /// than the negated output, deduplicated.
    /// Each input is marked as used — and, when the gate is reached from a
    /// non-monotonic context, so is its negation.
    pub fn add_gate(
        &mut self,
        out: CLiteral,
        fwd: Vec<ClauseIndex>,
        bwd: Vec<ClauseIndex>,
        formula: &Formula,
    ) {
        let not_mono = !self.is_nested_monotonic(out);

        let mut inp: Vec<CLiteral> = Vec::default();
        for clause in &fwd {
            for literal in formula.clause(*clause).literals() {
                if literal != out.negate() {
                    inp.push(literal);
                }
            }
        }
        inp.sort_unstable();
        inp.dedup();

        for literal in &inp {
            self.set_used_as_input(*literal);
            if not_mono {
                self.set_used_as_input(literal.negate());
            }
        }

        self.gates[out.atom() as usize] = Some(Gate {
            out,
            fwd,
            bwd,
            inp,
            not_mono,
        });
    }

    /// The gate whose output variable is the variable of the literal, if one
    /// has been recognized.
    pub fn gate(&self, literal: CLiteral) -> Option<&Gate> {
        self.gates[literal.atom() as usize].as_ref()
    }

    /// Whether a gate has been recognized for the variable of the literal.
    pub fn is_gate_output(&self, literal: CLiteral) -> bool {
        self.gates[literal.atom() as usize].is_some()
    }

    /// An iterator over the recognized gates.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter().flatten()
    }

    /// The count of recognized gates.
    pub fn gate_count(&self) -> usize {
        self.gates().count()
    }

    /// The count of recognized gates reached only from monotonic contexts.
    pub fn monotonic_gate_count(&self) -> usize {
        self.gates().filter(|gate| !gate.not_mono).count()
    }

    /// The count of root clauses.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// The sorted, deduplicated literals of the root clauses.
    pub fn root_literals(&self, formula: &Formula) -> Vec<CLiteral> {
        let mut literals: Vec<CLiteral> = Vec::default();
        for clause in &self.roots {
            literals.extend(formula.clause(*clause).literals());
        }
        literals.sort_unstable();
        literals.dedup();
        literals
    }

    /// The clauses reachable from the roots under the given model: the
    /// clauses of every satisfied branch of the gate structure.
    ///
    /// `model` assigns a value to each atom, indexed by atom.
    /// Traversal starts from the root literals; a gate contributes its `fwd`
    /// clauses when its output literal is satisfied under the model or the
    /// gate is non-monotonic, and additionally its `bwd` clauses when
    /// non-monotonic (blocked-clause elimination does not apply there).
    /// Each output variable is visited at most once.
    /// Remainder clauses are always included.
    pub fn pruned_problem(&self, model: &[bool], formula: &Formula) -> Vec<ClauseIndex> {
        let mut result: Vec<ClauseIndex> = self.roots.clone();

        let mut literals = self.root_literals(formula);
        let mut visited = vec![false; self.gates.len()];

        while let Some(output) = literals.pop() {
            let Some(gate) = self.gate(output) else {
                continue;
            };

            let satisfied = model[output.atom() as usize] == output.polarity();

            if !visited[output.atom() as usize] && (gate.not_mono || satisfied) {
                result.extend_from_slice(&gate.fwd);
                if gate.not_mono {
                    result.extend_from_slice(&gate.bwd);
                }
                literals.extend_from_slice(&gate.inp);
                visited[output.atom() as usize] = true;
            }
        }

        result.extend_from_slice(&self.remainder);
        result
    }

    /// Transforms the many roots of an analyzed formula into a single big
    /// gate with one output.
    ///
    /// A fresh variable `r` is introduced: every root and remainder clause
    /// gains the literal `¬r` and becomes a forward clause of a gate with
    /// output `r`, and the unit clause `{r}` replaces the roots.
    /// The gate table and the input marks grow in lockstep with the fresh
    /// variable.
    pub fn normalize_roots(&mut self, formula: &mut Formula) {
        let root_atom = formula.fresh_atom();
        let out = CLiteral::new(root_atom, true);

        self.gates.push(None);
        self.inputs.resize(2 * root_atom as usize + 2, false);

        let mut fwd = std::mem::take(&mut self.roots);
        fwd.append(&mut self.remainder);

        let mut inp: Vec<CLiteral> = Vec::default();
        for clause in &fwd {
            inp.extend(formula.clause(*clause).literals());
            // ¬r has the greatest index of any literal, so the clause stays sorted.
            formula.clause_mut(*clause).push(out.negate());
        }
        inp.sort_unstable();
        inp.dedup();

        for literal in &inp {
            self.set_used_as_input(*literal);
        }

        self.gates[root_atom as usize] = Some(Gate {
            out,
            fwd,
            bwd: Vec::default(),
            inp,
            not_mono: false,
        });

        formula.add_clause(vec![out]);
        let artificial = formula.clause_count() - 1;
        self.artificial_root = Some(artificial);
        self.roots.push(artificial);
    }

    /// Whether root normalization has introduced an artificial root.
    pub fn has_artificial_root(&self) -> bool {
        self.artificial_root.is_some()
    }

    /// The artificial root clause, if root normalization has run.
    pub fn artificial_root(&self) -> Option<ClauseIndex> {
        self.artificial_root
    }
}
