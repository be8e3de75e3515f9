/*!
The Weisfeiler–Leman hasher: iterative color refinement over the literal
hypergraph of a CNF formula.

Each variable carries a pair of colors, one per polarity — the pair is the
atomic refinement state.
An iteration step reads the old color function and writes the new one:

1. **Cross-reference** (optional): each pair `(n, p)` becomes
   `(hash(p, n), hash(n, p))`, binding the two polarities of a variable so
   that later sums distinguish them from two independent literals.
2. **Clause folding**: each clause is summarized as the commutative
   combination of the colors of its literals (hashed once more when clause
   rehashing is on). In an optimized first iteration the summary is a hash
   of the clause size — all initial colors are equal, so the sum carries no
   further information.
3. **Literal update**: the summary of each clause is combined into the new
   color of each of its literals.

A variable summary hashes each pair with the smaller color first — which is
what makes the scheme invariant under uniformly flipping the polarity of a
variable — and combines across variables.
A formula summary combines clause hashes instead, after a final
cross-reference.

Refinement runs for at most `⌊depth/2⌋` steps, with the parity of the depth
selecting the final summary.
From a configured iteration on, each step is preceded by a progress check:
when the count of distinct variable hashes stops growing the partition is
stable and the current variable summary is returned — later iterations
cannot distinguish more.

Commutative combining is what permits clause and variable summaries to be
folded in any order; see [the hash primitives](crate::hash) for the
combiner.
*/

use rustc_hash::FxHashSet;

use crate::{
    config::WlConfig,
    formula::Formula,
    hash::{combine, hash_pair, hash_word, HashWord},
    misc::log::targets::{self},
    structures::{
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
};

/// The pair of colors of a variable: one per polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LitColors<H: HashWord> {
    /// The color of the negative literal.
    n: H,

    /// The color of the positive literal.
    p: H,
}

impl<H: HashWord> LitColors<H> {
    /// Rewrites the pair as `(hash(p, n), hash(n, p))`.
    fn cross_reference(&mut self, prime_ring: bool) {
        let positive = hash_pair(self.p, self.n, prime_ring);
        let negative = hash_pair(self.n, self.p, prime_ring);
        self.p = positive;
        self.n = negative;
    }

    /// The polarity-symmetric hash of the pair: the greater color first, so a
    /// uniform flip of the variable leaves the hash unchanged.
    fn variable_hash(&self, prime_ring: bool) -> H {
        match self.n > self.p {
            true => hash_pair(self.n, self.p, prime_ring),
            false => hash_pair(self.p, self.n, prime_ring),
        }
    }
}

/// A color function: one pair of colors per variable, indexed by atom.
struct ColorFunction<H: HashWord> {
    colors: Vec<LitColors<H>>,
}

impl<H: HashWord> ColorFunction<H> {
    fn new(atom_count: usize, initial: H) -> Self {
        Self {
            colors: vec![
                LitColors {
                    n: initial,
                    p: initial,
                };
                atom_count + 1
            ],
        }
    }

    fn color(&self, literal: CLiteral) -> H {
        let pair = &self.colors[literal.atom() as usize];
        match literal.polarity() {
            true => pair.p,
            false => pair.n,
        }
    }

    fn color_mut(&mut self, literal: CLiteral) -> &mut H {
        let pair = &mut self.colors[literal.atom() as usize];
        match literal.polarity() {
            true => &mut pair.p,
            false => &mut pair.n,
        }
    }

    /// The pairs of the function, one per variable, excluding the reserved
    /// atom 0.
    fn pairs(&self) -> impl Iterator<Item = &LitColors<H>> {
        self.colors[1..].iter()
    }

    fn pairs_mut(&mut self) -> impl Iterator<Item = &mut LitColors<H>> {
        self.colors[1..].iter_mut()
    }
}

/// A Weisfeiler–Leman hasher over a formula.
///
/// One hasher serves one run: the color state is consumed by
/// [run](WeisfeilerLemanHasher::run).
pub struct WeisfeilerLemanHasher<'f, H: HashWord> {
    /// The formula under refinement.
    formula: &'f Formula,

    /// The configuration of the run.
    cfg: WlRun,

    /// The old and new color function, swapping roles each iteration.
    color_functions: [ColorFunction<H>; 2],

    /// The count of completed iteration steps.
    iteration: u32,

    /// The distinct variable hashes of the present progress check.
    unique_hashes: FxHashSet<H>,

    /// The count of distinct variable hashes at the previous progress check.
    previous_unique_hashes: usize,
}

/// The option values of a run, read once from a [WlConfig].
struct WlRun {
    depth: u32,
    cross_reference_literals: bool,
    rehash_clauses: bool,
    optimize_first_iteration: bool,
    first_progress_check_iteration: u32,
    use_prime_ring: bool,
}

impl<'f, H: HashWord> WeisfeilerLemanHasher<'f, H> {
    pub fn new(formula: &'f Formula, config: &WlConfig) -> Self {
        let cfg = WlRun {
            depth: config.depth.value,
            cross_reference_literals: config.cross_reference_literals.value,
            rehash_clauses: config.rehash_clauses.value,
            optimize_first_iteration: config.optimize_first_iteration.value,
            first_progress_check_iteration: config.first_progress_check_iteration.value,
            use_prime_ring: config.use_prime_ring.value,
        };

        let atom_count = formula.atom_max() as usize;
        let initial = H::truncate(1);

        Self {
            formula,
            cfg,
            color_functions: [
                ColorFunction::new(atom_count, initial),
                ColorFunction::new(atom_count, initial),
            ],
            iteration: 0,
            unique_hashes: FxHashSet::default(),
            previous_unique_hashes: 1,
        }
    }

    /// Runs refinement to convergence or the configured depth and returns the
    /// final summary hash.
    pub fn run(&mut self) -> H {
        while self.iteration < self.cfg.depth / 2 {
            if let Some(result) = self.check_progress() {
                log::info!(
                    target: targets::REFINEMENT,
                    "Refinement converged after {} iteration(s)",
                    self.iteration,
                );
                return result;
            }
            self.iteration_step();
        }

        match self.cfg.depth % 2 == 0 {
            true => self.variable_hash(),
            false => self.cnf_hash(),
        }
    }

    /// The count of completed iteration steps, bounded by the half depth.
    ///
    /// Fractional, as an odd depth spends an extra half iteration on clause
    /// labels.
    pub fn effective_iterations(&self) -> f64 {
        f64::min(self.iteration as f64, self.cfg.depth as f64 / 2.0)
    }

    fn old_index(&self) -> usize {
        (self.iteration % 2) as usize
    }

    /// Whether the present iteration is a first iteration with the
    /// optimization applied.
    fn in_optimized_iteration(&self) -> bool {
        self.iteration == 0 && self.cfg.optimize_first_iteration
    }

    /// Cross-references the pair of every variable of the old color function.
    fn cross_reference(&mut self) {
        if !self.cfg.cross_reference_literals || self.in_optimized_iteration() {
            return;
        }
        let prime_ring = self.cfg.use_prime_ring;
        let old_index = self.old_index();
        for pair in self.color_functions[old_index].pairs_mut() {
            pair.cross_reference(prime_ring);
        }
    }

    /// One refinement step: cross-reference, clause folding, literal update.
    fn iteration_step(&mut self) {
        self.cross_reference();

        let prime_ring = self.cfg.use_prime_ring;
        let optimized = self.in_optimized_iteration();
        let old_index = self.old_index();

        let (head, tail) = self.color_functions.split_at_mut(1);
        let (old, new) = match old_index == 0 {
            true => (&head[0], &mut tail[0]),
            false => (&tail[0], &mut head[0]),
        };

        for clause in self.formula.clauses() {
            let clause_hash = match optimized {
                false => clause_hash(old, clause, &self.cfg),
                true => match self.cfg.rehash_clauses {
                    true => hash_word(H::truncate(clause.size() as u64), prime_ring),
                    false => {
                        let size = H::truncate(clause.size() as u64);
                        match prime_ring {
                            true => size.reduce(),
                            false => size,
                        }
                    }
                },
            };

            for literal in clause.literals() {
                let color = new.color_mut(literal);
                *color = combine(*color, clause_hash, prime_ring);
            }
        }

        self.iteration += 1;
    }

    /// The variable summary of the old color function.
    fn variable_hash(&self) -> H {
        let prime_ring = self.cfg.use_prime_ring;
        let old = &self.color_functions[self.old_index()];

        if self.cfg.cross_reference_literals {
            let mut hash = H::default();
            for pair in old.pairs() {
                hash = combine(hash, pair.variable_hash(prime_ring), prime_ring);
            }
            return hash;
        }

        let mut hash = H::default();
        for pair in old.pairs() {
            hash = combine(hash, pair.n, prime_ring);
            hash = combine(hash, pair.p, prime_ring);
        }
        hash
    }

    /// The formula summary: a final cross-reference, then clause hashes
    /// combined across all clauses.
    fn cnf_hash(&mut self) -> H {
        self.cross_reference();

        let prime_ring = self.cfg.use_prime_ring;
        let old = &self.color_functions[self.old_index()];

        let mut hash = H::default();
        for clause in self.formula.clauses() {
            hash = combine(hash, clause_hash(old, clause, &self.cfg), prime_ring);
        }
        hash
    }

    /// Tests whether refinement still makes progress, returning the variable
    /// summary once it does not.
    ///
    /// Progress is a strict growth of the count of distinct variable hashes;
    /// the count never shrinks, so equality means the partition is stable.
    fn check_progress(&mut self) -> Option<H> {
        // Few hits at the start.
        if self.iteration < self.cfg.first_progress_check_iteration {
            return None;
        }

        let prime_ring = self.cfg.use_prime_ring;
        self.unique_hashes.reserve(self.previous_unique_hashes);

        let old = &self.color_functions[self.old_index()];
        let mut variable_hash = H::default();
        for pair in old.pairs() {
            let hash = pair.variable_hash(prime_ring);
            self.unique_hashes.insert(hash);
            variable_hash = combine(variable_hash, hash, prime_ring);
        }

        if self.unique_hashes.len() <= self.previous_unique_hashes {
            return Some(variable_hash);
        }
        self.previous_unique_hashes = self.unique_hashes.len();
        self.unique_hashes.clear();
        None
    }
}

/// The summary of a clause under a color function: the commutative
/// combination of the colors of its literals, hashed once more when clause
/// rehashing is on.
fn clause_hash<H: HashWord>(colors: &ColorFunction<H>, clause: &CClause, cfg: &WlRun) -> H {
    let mut hash = H::default();
    for literal in clause.literals() {
        hash = combine(hash, colors.color(literal), cfg.use_prime_ring);
    }
    if cfg.rehash_clauses {
        hash = hash_word(hash, cfg.use_prime_ring);
    }
    hash
}
