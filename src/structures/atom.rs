/*!
(The internal representation of) an atom, aka. a 'variable'.

Atoms are the things a CNF formula constrains, and the things renaming
moves around when two formulas are isomorphic.

Each atom is a u32 *v* with 1 ≤ *v* ≤ [ATOM_MAX]:
- Atoms are numbered from 1, as in the DIMACS format.
- The atom `0` is reserved, and is never part of a formula.
  Keeping the DIMACS numbering means every atom-indexed structure carries
  one unused slot, and in exchange no translation happens on any path
  between a file and a digest.

# Notes
- In the SAT literature these are often called 'variables' while in the logic
  literature these are often called 'atoms'.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
///
/// Bounded by [i32::MAX] so every literal has a DIMACS integer form.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();
