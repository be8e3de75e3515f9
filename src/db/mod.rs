/*!
Databases built over a formula during gate analysis.

  - [The occurrence index](occurrence)
    + Per-literal clause lists, supporting blocked-set queries, root
      estimation, and removal of a variable.
      The index is consumed as analysis peels the formula: clauses leave it
      by becoming roots or parts of gate definitions, and whatever is left
      at the end is the remainder.
  - [The gate formula](gate)
    + The recognized structure: one gate per output variable, the root
      clauses, the used-as-input marks which track monotonicity, and the
      remainder.

Both databases address clauses by [ClauseIndex](crate::formula::ClauseIndex)
into the formula arena, never by reference.
*/

pub mod gate;
pub mod occurrence;
