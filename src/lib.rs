//! A library for canonical, isomorphism-invariant fingerprints ('isohashes')
//! and gate structure of boolean formulas written in conjunctive normal form.
//!
//! cnf_ident ingests a DIMACS-CNF file and produces fingerprints which are
//! equal for isomorphic formulas — independent of variable renaming, uniform
//! literal flipping, and clause or literal reordering — together with the
//! definitional gate structure of the formula.
//! Fingerprints identify benchmark instances, and compare their structure,
//! without fixing any particular presentation of the instance.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context]: one
//! analysis session owning one formula.
//!
//! Contexts are built with a configuration, and a formula is added through
//! its [DIMACS](crate::formula::Formula::read_dimacs) representation or
//! [programatically](crate::formula::Formula::add_clause).
//! Two analyses are offered over the formula:
//!
//! - The [Weisfeiler–Leman hasher](crate::hash::wl) runs color refinement
//!   over the literal hypergraph of the formula and summarizes the stable
//!   partition as a single hash.
//! - The [gate analyzer](crate::gates) peels definitional gates off the
//!   formula breadth-first, recovering the circuit most CNF encodings were
//!   distilled from.
//!
//! Useful starting points, then, may be:
//! - The [context] to see how digests are produced.
//! - The [structures] to familiarise yourself with the elements of a formula
//!   (atoms, literals, clauses) and their representation.
//! - The [configuration](crate::config) to see what knobs the analyses have.
//!
//! If you're in search of cnf formulas consider:
//! - The SATLIB benchmark problems at [www.cs.ubc.ca/~hoos/SATLIB/benchm.html](https://www.cs.ubc.ca/~hoos/SATLIB/benchm.html)
//! - The Global Benchmark Database at [benchmark-database.de](https://benchmark-database.de)
//!
//! # Example
//!
//! Isomorphic formulas share a fingerprint:
//!
//! ```rust
//! # use cnf_ident::config::Config;
//! # use cnf_ident::context::Context;
//! # use std::io::Write;
//! let mut one = vec![];
//! let _ = one.write(b"1 2 0 -1 -2 0");
//!
//! // The same formula over renamed variables, in a different clause order.
//! let mut two = vec![];
//! let _ = two.write(b"-2 -1 0 2 1 0");
//!
//! let mut context_one = Context::from_config(Config::default());
//! context_one.read_dimacs(one.as_slice());
//!
//! let mut context_two = Context::from_config(Config::default());
//! context_two.read_dimacs(two.as_slice());
//!
//! assert_eq!(context_one.wl_digest(), context_two.wl_digest());
//! ```
//!
//! # Determinism
//!
//! A digest is a deterministic function of the input file and the
//! configuration: iteration over clauses, and over literals within a clause,
//! is in insertion order, and hashes are combined commutatively wherever an
//! order is not guaranteed.
//!
//! # Logs
//!
//! To help diagnose issues calls to [log!](log) are made with a variety of
//! targets, listed in [misc::log].
//! As logging is only built on request, no log implementation is provided.

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod formula;

pub mod db;
pub mod gates;
pub mod oracle;

pub mod hash;

pub mod misc;
pub mod reports;
