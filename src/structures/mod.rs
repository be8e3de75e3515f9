//! Structures, abstract and concrete, of the formulas under analysis.
//!
//! - [Atoms](atom) are variables, numbered from 1 as in the DIMACS format.
//! - [Literals](literal) are atoms paired with a polarity.
//! - [Clauses](clause) are collections of literals, interpreted as disjunctions.
//!
//! Literals and clauses are defined first as traits whose canonical
//! instantiations ([CLiteral](literal::CLiteral), [CClause](clause::CClause))
//! are used throughout the library.

pub mod atom;
pub mod clause;
pub mod literal;
