/*!
Reports for an analysis: digests and their optional measurements.
*/

use std::time::Duration;

/// Measurements of an analysis, appended to a digest on request.
#[derive(Clone, Copy, Debug, Default)]
pub struct Measurements {
    /// Time spent parsing the input.
    pub parse: Duration,

    /// Time spent computing the digest.
    pub compute: Duration,

    /// Growth of resident memory over the analysis, in KB.
    pub memory_kb: u64,

    /// The count of refinement iterations run, possibly fractional.
    pub iterations: f64,
}

impl std::fmt::Display for Measurements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.parse.as_nanos(),
            self.compute.as_nanos(),
            self.memory_kb,
            self.iterations,
        )
    }
}

/// A summary of recognized gate structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateReport {
    /// The count of recognized gates.
    pub gates: usize,

    /// The count of recognized gates reached only from monotonic contexts.
    pub monotonic: usize,

    /// The count of root clauses.
    pub roots: usize,

    /// The count of unexplained clauses.
    pub remainder: usize,
}

impl std::fmt::Display for GateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "gates={} gates_monotonic={} roots={} remainder={}",
            self.gates, self.monotonic, self.roots, self.remainder,
        )
    }
}
