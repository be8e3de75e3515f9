/*!
Hierarchical recognition of gate structure in a CNF formula.

Many CNF formulas are circuit encodings: most clauses define an output
variable as a boolean function of input variables, and only a few clauses
constrain the circuit at the top level.
The [GateAnalyzer](analyzer::GateAnalyzer) recovers that structure: it
estimates top-level (root) clauses, then walks candidate output literals
breadth-first, peeling a gate definition off the formula whenever the
occurrence lists of a candidate pass the blocked-set condition together
with one of three tests:

- **Monotonicity** — the candidate is nested monotonic, i.e. never used as
  an input with both polarities. Cheap, and sufficient for AND/OR-only
  structure.
- **Patterns** — the clauses match a known encoding shape (equivalence,
  or-gate, and-gate, full DNF/CNF encoding).
- **Semantic** — a SAT [oracle](crate::oracle) refutes the possibility of
  the output taking both values under the candidate definition.

Breadth-first order is load-bearing: depth-first exploration loses the
monotonicity guarantees the used-as-input marks provide.
*/

pub mod analyzer;
